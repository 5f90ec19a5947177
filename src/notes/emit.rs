// src/notes/emit.rs

use tracing::{debug, info};

use crate::config::NotesConfig;
use crate::db::comments::NewComment;
use crate::domain::note::{
    is_price_key, same_meta_value, NoteAction, NotePayload, CHANGE_DATE_FORMAT, NOTE_APPROVED,
    ON_MARKET_CHANGE_DATE_KEY, ON_MARKET_KEY, ON_MARKET_YES, PRICE_CHANGE_DATE_KEY,
    PROPERTY_POST_TYPE,
};
use crate::errors::AppError;
use crate::host::{HookCtx, MetaChange};

fn is_property(hx: &HookCtx<'_>, post_id: i64) -> Result<bool, AppError> {
    Ok(hx.post_type(post_id)?.as_deref() == Some(PROPERTY_POST_TYPE))
}

/// Stored value before the write lands. Missing compares as empty.
fn stored_value(hx: &HookCtx<'_>, change: &MetaChange<'_>) -> Result<String, AppError> {
    Ok(hx
        .get_post_meta(change.post_id, change.key)?
        .unwrap_or_default())
}

/// Writes the note for `action` against `post_id`, then stamps `date_key`.
/// Returns the note's comment id.
pub fn record_note(
    hx: &HookCtx<'_>,
    cfg: &NotesConfig,
    post_id: i64,
    action: NoteAction,
    date_key: &str,
) -> Result<i64, AppError> {
    let payload = NotePayload::action(action);
    let now = hx.request.now;

    let comment = NewComment {
        post_id,
        author: hx.request.user.display_name.clone(),
        author_email: cfg.note_author_email.clone(),
        author_url: String::new(),
        created_at: now,
        content: payload.to_content()?,
        approved: NOTE_APPROVED.to_string(),
        comment_type: cfg.note_comment_type.clone(),
    };
    let comment_id = hx.insert_comment(&comment)?;

    hx.update_post_meta(post_id, date_key, &now.format(CHANGE_DATE_FORMAT).to_string())?;

    info!(
        post_id,
        comment_id,
        note = %payload.summary(),
        "property note recorded"
    );
    Ok(comment_id)
}

/// Price or rent edited on a property: note old and new values as stored.
pub fn check_price_change(
    hx: &HookCtx<'_>,
    cfg: &NotesConfig,
    change: &MetaChange<'_>,
) -> Result<Option<i64>, AppError> {
    if !is_price_key(change.key) || !is_property(hx, change.post_id)? {
        return Ok(None);
    }

    let original_value = stored_value(hx, change)?;
    if same_meta_value(&original_value, change.value) {
        debug!(post_id = change.post_id, key = change.key, "price unchanged");
        return Ok(None);
    }

    let action = NoteAction::PropertyPriceChange {
        original_value,
        new_value: change.value.to_string(),
    };
    record_note(hx, cfg, change.post_id, action, PRICE_CHANGE_DATE_KEY).map(Some)
}

/// On-market flag created on a property. Only an initial `yes` is noteworthy.
pub fn check_on_market_add(
    hx: &HookCtx<'_>,
    cfg: &NotesConfig,
    change: &MetaChange<'_>,
) -> Result<Option<i64>, AppError> {
    if change.key != ON_MARKET_KEY || !is_property(hx, change.post_id)? {
        return Ok(None);
    }
    if change.value != ON_MARKET_YES {
        return Ok(None);
    }

    record_note(
        hx,
        cfg,
        change.post_id,
        NoteAction::PropertyOnMarket,
        ON_MARKET_CHANGE_DATE_KEY,
    )
    .map(Some)
}

/// On-market flag changed on a property. The note follows the new value alone.
pub fn check_on_market_update(
    hx: &HookCtx<'_>,
    cfg: &NotesConfig,
    change: &MetaChange<'_>,
) -> Result<Option<i64>, AppError> {
    if change.key != ON_MARKET_KEY || !is_property(hx, change.post_id)? {
        return Ok(None);
    }

    let original_value = stored_value(hx, change)?;
    if same_meta_value(&original_value, change.value) {
        debug!(post_id = change.post_id, "on-market flag unchanged");
        return Ok(None);
    }

    let action = NoteAction::market(change.value == ON_MARKET_YES);
    record_note(hx, cfg, change.post_id, action, ON_MARKET_CHANGE_DATE_KEY).map(Some)
}
