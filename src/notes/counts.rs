// src/notes/counts.rs

use tracing::{debug, info, warn};

use crate::db::comments::count_by_approval;
use crate::domain::stats::CommentStats;
use crate::errors::AppError;
use crate::host::HookCtx;

/// Site-wide comment stats without notes, served from the transient cache
/// when present and recomputed (then cached, no expiry) otherwise.
pub fn site_stats_without_notes(
    hx: &HookCtx<'_>,
    cache_key: &str,
    note_type: &str,
) -> Result<CommentStats, AppError> {
    match hx.get_transient::<CommentStats>(cache_key) {
        Ok(Some(stats)) => {
            debug!(cache_key, "comment stats served from cache");
            return Ok(stats);
        }
        Ok(None) => {}
        Err(AppError::Payload(e)) => {
            warn!(cache_key, error = %e, "cached comment stats unreadable, recomputing");
        }
        Err(e) => return Err(e),
    }

    let rows = count_by_approval(hx.conn(), None, Some(note_type))?;
    let stats = CommentStats::from_counts(rows);
    hx.set_transient(cache_key, &stats)?;

    debug!(cache_key, total = stats.total_comments, "comment stats recomputed");
    Ok(stats)
}

/// Drops the cached stats. Safe to call when nothing is cached.
pub fn delete_count_cache(hx: &HookCtx<'_>, cache_key: &str) -> Result<(), AppError> {
    if hx.delete_transient(cache_key)? {
        info!(cache_key, "comment stats cache cleared");
    }
    Ok(())
}
