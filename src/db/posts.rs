// src/db/posts.rs
use crate::errors::AppError;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub id: i64,
    pub post_type: String,
    pub title: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaRow {
    pub meta_id: i64,
    pub key: String,
    pub value: String,
}

pub fn insert_post(
    conn: &Connection,
    post_type: &str,
    title: &str,
    now: NaiveDateTime,
) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO posts (post_type, title, created_at) VALUES (?1, ?2, ?3)",
        params![post_type, title, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_post(conn: &Connection, post_id: i64) -> Result<Option<PostRow>, AppError> {
    let row = conn
        .query_row(
            "SELECT id, post_type, title, created_at FROM posts WHERE id = ?1",
            params![post_id],
            |r| {
                Ok(PostRow {
                    id: r.get(0)?,
                    post_type: r.get(1)?,
                    title: r.get(2)?,
                    created_at: r.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn get_post_type(conn: &Connection, post_id: i64) -> Result<Option<String>, AppError> {
    let post_type = conn
        .query_row(
            "SELECT post_type FROM posts WHERE id = ?1",
            params![post_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(post_type)
}

/// First stored value for `key`, the single-value read of post metadata.
pub fn get_post_meta(
    conn: &Connection,
    post_id: i64,
    key: &str,
) -> Result<Option<String>, AppError> {
    let value = conn
        .query_row(
            "SELECT meta_value FROM postmeta WHERE post_id = ?1 AND meta_key = ?2 ORDER BY meta_id LIMIT 1",
            params![post_id, key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn find_meta_id(conn: &Connection, post_id: i64, key: &str) -> Result<Option<i64>, AppError> {
    let id = conn
        .query_row(
            "SELECT meta_id FROM postmeta WHERE post_id = ?1 AND meta_key = ?2 ORDER BY meta_id LIMIT 1",
            params![post_id, key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn insert_meta(
    conn: &Connection,
    post_id: i64,
    key: &str,
    value: &str,
) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO postmeta (post_id, meta_key, meta_value) VALUES (?1, ?2, ?3)",
        params![post_id, key, value],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites every stored row for `key`. Returns the number of rows touched.
pub fn update_meta(
    conn: &Connection,
    post_id: i64,
    key: &str,
    value: &str,
) -> Result<usize, AppError> {
    let n = conn.execute(
        "UPDATE postmeta SET meta_value = ?1 WHERE post_id = ?2 AND meta_key = ?3",
        params![value, post_id, key],
    )?;
    Ok(n)
}

pub fn list_post_meta(conn: &Connection, post_id: i64) -> Result<Vec<MetaRow>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT meta_id, meta_key, meta_value FROM postmeta WHERE post_id = ?1 ORDER BY meta_key, meta_id",
    )?;

    let rows = stmt.query_map(params![post_id], |r| {
        Ok(MetaRow {
            meta_id: r.get(0)?,
            key: r.get(1)?,
            value: r.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
