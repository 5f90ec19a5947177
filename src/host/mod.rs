//! The content platform the notes integration plugs into: posts with metadata,
//! comments, and a transient cache, all in SQLite, with extension points that
//! registered [`Hooks`] listen on.
//!
//! Every mutating operation runs in one transaction, and hooks run on that
//! same transaction. Transactions begin `IMMEDIATE`, taking the write lock
//! up front, so concurrent writers wait on the busy timeout instead of failing. A hook error rolls back the triggering write along with
//! anything the hook wrote.

pub mod context;
pub mod hooks;

use std::sync::Arc;

use rusqlite::{Connection, TransactionBehavior};
use tracing::debug;

use crate::db::comments::{self, CommentRow, NewComment};
use crate::db::posts::{self, MetaRow, PostRow};
use crate::db::{transients, Database};
use crate::domain::query::{CommentClauses, CommentQuery};
use crate::domain::stats::CommentStats;
use crate::errors::AppError;

pub use context::{AdminScreen, CurrentUser, RequestContext};
pub use hooks::{HookCtx, Hooks, MetaChange};

pub struct Host {
    db: Database,
    hooks: Vec<Arc<dyn Hooks>>,
}

impl Host {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            hooks: Vec::new(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Hooks run in registration order.
    pub fn register(&mut self, hooks: Arc<dyn Hooks>) {
        tracing::info!(hooks = hooks.name(), "hooks registered");
        self.hooks.push(hooks);
    }

    fn ctx<'a>(&'a self, conn: &'a Connection, request: &'a RequestContext) -> HookCtx<'a> {
        HookCtx {
            host: self,
            conn,
            request,
        }
    }

    // ----- Posts & metadata -----

    pub fn insert_post(
        &self,
        request: &RequestContext,
        post_type: &str,
        title: &str,
    ) -> Result<i64, AppError> {
        self.db
            .with_conn(|conn| posts::insert_post(conn, post_type, title, request.now))
    }

    pub fn find_post(&self, post_id: i64) -> Result<Option<PostRow>, AppError> {
        self.db.with_conn(|conn| posts::find_post(conn, post_id))
    }

    pub fn get_post_meta(&self, post_id: i64, key: &str) -> Result<Option<String>, AppError> {
        self.db
            .with_conn(|conn| posts::get_post_meta(conn, post_id, key))
    }

    pub fn list_post_meta(&self, post_id: i64) -> Result<Vec<MetaRow>, AppError> {
        self.db.with_conn(|conn| posts::list_post_meta(conn, post_id))
    }

    /// Adds a metadata row. Fires `post_meta_added`. Returns the new meta id.
    pub fn add_post_meta(
        &self,
        request: &RequestContext,
        post_id: i64,
        key: &str,
        value: &str,
    ) -> Result<i64, AppError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let meta_id = self.add_post_meta_in(&tx, request, post_id, key, value)?;
            tx.commit()?;
            Ok(meta_id)
        })
    }

    /// Overwrites a metadata value, or adds it if the post has none for `key`.
    /// Fires `post_meta_updated` (or `post_meta_added`). Returns the meta id.
    pub fn update_post_meta(
        &self,
        request: &RequestContext,
        post_id: i64,
        key: &str,
        value: &str,
    ) -> Result<i64, AppError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let meta_id = self.update_post_meta_in(&tx, request, post_id, key, value)?;
            tx.commit()?;
            Ok(meta_id)
        })
    }

    pub(crate) fn add_post_meta_in(
        &self,
        conn: &Connection,
        request: &RequestContext,
        post_id: i64,
        key: &str,
        value: &str,
    ) -> Result<i64, AppError> {
        let hx = self.ctx(conn, request);
        let change = MetaChange {
            meta_id: None,
            post_id,
            key,
            value,
        };
        for hooks in &self.hooks {
            hooks.post_meta_added(&hx, &change)?;
        }
        posts::insert_meta(conn, post_id, key, value)
    }

    pub(crate) fn update_post_meta_in(
        &self,
        conn: &Connection,
        request: &RequestContext,
        post_id: i64,
        key: &str,
        value: &str,
    ) -> Result<i64, AppError> {
        let Some(meta_id) = posts::find_meta_id(conn, post_id, key)? else {
            return self.add_post_meta_in(conn, request, post_id, key, value);
        };

        let hx = self.ctx(conn, request);
        let change = MetaChange {
            meta_id: Some(meta_id),
            post_id,
            key,
            value,
        };
        for hooks in &self.hooks {
            hooks.post_meta_updated(&hx, &change)?;
        }
        posts::update_meta(conn, post_id, key, value)?;
        Ok(meta_id)
    }

    // ----- Comments -----

    /// Writes a comment of any type. Fires `comment_inserted`.
    pub fn insert_comment(
        &self,
        request: &RequestContext,
        comment: &NewComment,
    ) -> Result<i64, AppError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let id = self.insert_comment_in(&tx, request, comment)?;
            tx.commit()?;
            Ok(id)
        })
    }

    pub(crate) fn insert_comment_in(
        &self,
        conn: &Connection,
        request: &RequestContext,
        comment: &NewComment,
    ) -> Result<i64, AppError> {
        let id = comments::insert_comment(conn, comment)?;
        debug!(
            comment_id = id,
            post_id = comment.post_id,
            comment_type = comment.comment_type.as_str(),
            "comment inserted"
        );

        let hx = self.ctx(conn, request);
        for hooks in &self.hooks {
            hooks.comment_inserted(&hx, id)?;
        }
        Ok(id)
    }

    /// Returns false (and fires nothing) when the comment does not exist.
    pub fn set_comment_status(
        &self,
        request: &RequestContext,
        comment_id: i64,
        status: &str,
    ) -> Result<bool, AppError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let changed = comments::set_comment_status(&tx, comment_id, status)?;
            if changed {
                let hx = self.ctx(&tx, request);
                for hooks in &self.hooks {
                    hooks.comment_status_changed(&hx, comment_id, status)?;
                }
            }
            tx.commit()?;
            Ok(changed)
        })
    }

    /// Lists comments after every `comments_clauses` filter has had its say.
    pub fn query_comments(
        &self,
        request: &RequestContext,
        query: &CommentQuery,
    ) -> Result<Vec<CommentRow>, AppError> {
        self.db.with_conn(|conn| {
            let hx = self.ctx(conn, request);
            let mut clauses = CommentClauses::from_query(query);
            for hooks in &self.hooks {
                clauses = hooks.comments_clauses(&hx, clauses);
            }
            comments::select_comments(conn, &clauses)
        })
    }

    /// Comment statistics for one post, or site-wide when `post_id` is `None`.
    pub fn count_comments(
        &self,
        request: &RequestContext,
        post_id: Option<i64>,
    ) -> Result<CommentStats, AppError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let hx = self.ctx(&tx, request);

            let mut stats = None;
            for hooks in &self.hooks {
                stats = hooks.count_comments(&hx, stats, post_id)?;
            }
            let stats = match stats {
                Some(stats) => stats,
                None => CommentStats::from_counts(comments::count_by_approval(&tx, post_id, None)?),
            };

            tx.commit()?;
            Ok(stats)
        })
    }

    // ----- Transients -----

    pub fn get_transient(&self, name: &str) -> Result<Option<String>, AppError> {
        self.db
            .with_conn(|conn| transients::get_transient(conn, name))
    }
}
