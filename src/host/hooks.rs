// src/host/hooks.rs

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::comments::NewComment;
use crate::db::{posts, transients};
use crate::domain::query::CommentClauses;
use crate::domain::stats::CommentStats;
use crate::errors::AppError;
use crate::host::context::RequestContext;
use crate::host::Host;

/// A post metadata write, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaChange<'a> {
    /// Row being overwritten. `None` when the value is being added.
    pub meta_id: Option<i64>,
    pub post_id: i64,
    pub key: &'a str,
    pub value: &'a str,
}

/// Extension points the host calls out to. Every method defaults to a pass-through,
/// so an integration only overrides what it listens for.
pub trait Hooks: Send + Sync {
    fn name(&self) -> &str;

    /// Filter over the clauses of every comment listing.
    fn comments_clauses(&self, _hx: &HookCtx<'_>, clauses: CommentClauses) -> CommentClauses {
        clauses
    }

    /// Filter over comment statistics. `post_id` is `None` for site-wide counts.
    /// Returning `None` lets the host compute its own.
    fn count_comments(
        &self,
        _hx: &HookCtx<'_>,
        stats: Option<CommentStats>,
        _post_id: Option<i64>,
    ) -> Result<Option<CommentStats>, AppError> {
        Ok(stats)
    }

    fn comment_inserted(&self, _hx: &HookCtx<'_>, _comment_id: i64) -> Result<(), AppError> {
        Ok(())
    }

    fn comment_status_changed(
        &self,
        _hx: &HookCtx<'_>,
        _comment_id: i64,
        _status: &str,
    ) -> Result<(), AppError> {
        Ok(())
    }

    /// Fires before the row is inserted.
    fn post_meta_added(&self, _hx: &HookCtx<'_>, _change: &MetaChange<'_>) -> Result<(), AppError> {
        Ok(())
    }

    /// Fires before the row is overwritten, so storage still holds the old value.
    fn post_meta_updated(
        &self,
        _hx: &HookCtx<'_>,
        _change: &MetaChange<'_>,
    ) -> Result<(), AppError> {
        Ok(())
    }
}

/// Handle given to hooks: the host, the connection of the running operation,
/// and the request it serves. Writes made through it fire hooks in turn.
pub struct HookCtx<'a> {
    pub(crate) host: &'a Host,
    pub(crate) conn: &'a Connection,
    pub request: &'a RequestContext,
}

impl<'a> HookCtx<'a> {
    pub fn conn(&self) -> &Connection {
        self.conn
    }

    pub fn post_type(&self, post_id: i64) -> Result<Option<String>, AppError> {
        posts::get_post_type(self.conn, post_id)
    }

    pub fn get_post_meta(&self, post_id: i64, key: &str) -> Result<Option<String>, AppError> {
        posts::get_post_meta(self.conn, post_id, key)
    }

    pub fn update_post_meta(&self, post_id: i64, key: &str, value: &str) -> Result<i64, AppError> {
        self.host
            .update_post_meta_in(self.conn, self.request, post_id, key, value)
    }

    pub fn insert_comment(&self, comment: &NewComment) -> Result<i64, AppError> {
        self.host.insert_comment_in(self.conn, self.request, comment)
    }

    pub fn get_transient<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, AppError> {
        match transients::get_transient(self.conn, name)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_transient<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        transients::set_transient(self.conn, name, &raw)
    }

    pub fn delete_transient(&self, name: &str) -> Result<bool, AppError> {
        transients::delete_transient(self.conn, name)
    }
}
