// src/db/comments.rs
use crate::domain::query::CommentClauses;
use crate::errors::AppError;
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection};

/// A comment about to be written. Notes use the same shape with their own `comment_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub post_id: i64,
    pub author: String,
    pub author_email: String,
    pub author_url: String,
    pub created_at: NaiveDateTime,
    pub content: String,
    pub approved: String,
    pub comment_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub author_email: String,
    pub created_at: NaiveDateTime,
    pub content: String,
    pub approved: String,
    pub comment_type: String,
}

pub fn insert_comment(conn: &Connection, comment: &NewComment) -> Result<i64, AppError> {
    conn.execute(
        r#"
        INSERT INTO comments (
            post_id, author, author_email, author_url,
            created_at, content, approved, comment_type
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            comment.post_id,
            &comment.author,
            &comment.author_email,
            &comment.author_url,
            comment.created_at,
            &comment.content,
            &comment.approved,
            &comment.comment_type,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns false when no comment has that id.
pub fn set_comment_status(
    conn: &Connection,
    comment_id: i64,
    approved: &str,
) -> Result<bool, AppError> {
    let n = conn.execute(
        "UPDATE comments SET approved = ?1 WHERE id = ?2",
        params![approved, comment_id],
    )?;
    Ok(n > 0)
}

/// Runs a listing built from (possibly hook-modified) clauses.
pub fn select_comments(
    conn: &Connection,
    clauses: &CommentClauses,
) -> Result<Vec<CommentRow>, AppError> {
    let mut sql = format!(
        "SELECT id, post_id, author, author_email, created_at, content, approved, comment_type \
         FROM comments WHERE {} ORDER BY {}",
        clauses.where_sql, clauses.order_by
    );
    if let Some(limit) = clauses.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(clauses.params.iter()), |r| {
        Ok(CommentRow {
            id: r.get(0)?,
            post_id: r.get(1)?,
            author: r.get(2)?,
            author_email: r.get(3)?,
            created_at: r.get(4)?,
            content: r.get(5)?,
            approved: r.get(6)?,
            comment_type: r.get(7)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// `(approved, count)` pairs, optionally scoped to one post and/or excluding one comment type.
pub fn count_by_approval(
    conn: &Connection,
    post_id: Option<i64>,
    exclude_type: Option<&str>,
) -> Result<Vec<(String, i64)>, AppError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT approved, COUNT(*) AS num_comments
        FROM comments
        WHERE (?1 IS NULL OR post_id = ?1)
          AND (?2 IS NULL OR comment_type != ?2)
        GROUP BY approved
        "#,
    )?;

    let rows = stmt.query_map(params![post_id, exclude_type], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
