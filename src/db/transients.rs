// src/db/transients.rs
use crate::errors::AppError;
use rusqlite::{params, Connection, OptionalExtension};

pub fn get_transient(conn: &Connection, name: &str) -> Result<Option<String>, AppError> {
    let value = conn
        .query_row(
            "SELECT value FROM transients WHERE name = ?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_transient(conn: &Connection, name: &str, value: &str) -> Result<(), AppError> {
    conn.execute(
        r#"
        INSERT INTO transients (name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value = excluded.value
        "#,
        params![name, value],
    )?;
    Ok(())
}

/// Returns whether an entry was removed. Deleting a missing entry is fine.
pub fn delete_transient(conn: &Connection, name: &str) -> Result<bool, AppError> {
    let n = conn.execute("DELETE FROM transients WHERE name = ?1", params![name])?;
    Ok(n > 0)
}
