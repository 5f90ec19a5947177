//! Property notes: audit events stored as comments of their own type.
//!
//! [`CommentNotes`] hooks into the host to
//! - hide notes from comment listings outside the record screens,
//! - serve site-wide comment stats that leave notes out, cached as a transient,
//! - drop that cache whenever a comment is written or changes status,
//! - write notes when a property's price, rent or on-market flag changes.

pub mod counts;
pub mod emit;
pub mod visibility;

use std::sync::Arc;

use crate::config::NotesConfig;
use crate::domain::query::CommentClauses;
use crate::domain::stats::CommentStats;
use crate::errors::AppError;
use crate::host::{HookCtx, Hooks, Host, MetaChange};

pub use visibility::NoteScreens;

#[derive(Debug)]
pub struct CommentNotes {
    config: NotesConfig,
    screens: NoteScreens,
}

impl CommentNotes {
    pub fn new(config: NotesConfig) -> Self {
        let screens = NoteScreens::new(config.post_types_with_notes.clone());
        Self { config, screens }
    }

    /// Register a rewrite of the screen allow-list.
    pub fn filter_screens<F>(mut self, filter: F) -> Self
    where
        F: Fn(Vec<String>) -> Vec<String> + Send + Sync + 'static,
    {
        self.screens.add_filter(filter);
        self
    }

    pub fn screens(&self) -> &NoteScreens {
        &self.screens
    }

    /// Hooks the integration into `host`.
    pub fn register(self, host: &mut Host) -> Arc<CommentNotes> {
        let notes = Arc::new(self);
        host.register(notes.clone());
        notes
    }
}

impl Hooks for CommentNotes {
    fn name(&self) -> &str {
        "comment-notes"
    }

    fn comments_clauses(&self, hx: &HookCtx<'_>, clauses: CommentClauses) -> CommentClauses {
        visibility::exclude_note_comments(
            clauses,
            hx.request.screen_id(),
            &self.screens,
            &self.config.note_comment_type,
        )
    }

    fn count_comments(
        &self,
        hx: &HookCtx<'_>,
        stats: Option<CommentStats>,
        post_id: Option<i64>,
    ) -> Result<Option<CommentStats>, AppError> {
        if post_id.is_some() {
            return Ok(stats);
        }
        counts::site_stats_without_notes(
            hx,
            &self.config.count_cache_key,
            &self.config.note_comment_type,
        )
        .map(Some)
    }

    fn comment_inserted(&self, hx: &HookCtx<'_>, _comment_id: i64) -> Result<(), AppError> {
        counts::delete_count_cache(hx, &self.config.count_cache_key)
    }

    fn comment_status_changed(
        &self,
        hx: &HookCtx<'_>,
        _comment_id: i64,
        _status: &str,
    ) -> Result<(), AppError> {
        counts::delete_count_cache(hx, &self.config.count_cache_key)
    }

    fn post_meta_added(&self, hx: &HookCtx<'_>, change: &MetaChange<'_>) -> Result<(), AppError> {
        emit::check_on_market_add(hx, &self.config, change)?;
        Ok(())
    }

    fn post_meta_updated(&self, hx: &HookCtx<'_>, change: &MetaChange<'_>) -> Result<(), AppError> {
        emit::check_on_market_update(hx, &self.config, change)?;
        emit::check_price_change(hx, &self.config, change)?;
        Ok(())
    }
}
