use crate::config::AppConfig;
use crate::db::comments::CommentRow;
use crate::domain::note::NotePayload;
use crate::domain::query::CommentQuery;
use crate::errors::{AppError, ResultResp};
use crate::host::{Host, RequestContext};
use crate::responses::{html_response, redirect_response};
use crate::templates::pages::{comments_page, record_page, CommentsVm, EntryVm, RecordVm};
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

/// Screen id of the site-wide comment list.
pub const COMMENTS_SCREEN: &str = "edit-comments";

const COMMENT_STATES: [&str; 4] = ["0", "1", "spam", "trash"];

pub struct App {
    pub host: Host,
    pub config: AppConfig,
}

impl App {
    fn request(&self, screen_id: &str) -> RequestContext {
        RequestContext::new(self.config.server.operator_name.clone()).on_screen(screen_id)
    }
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => redirect_response("/admin/comments"),
        ("GET", ["admin", "comments"]) => comments_screen(app),
        ("POST", ["admin", "comments", id, "status"]) => {
            let form = read_form(&mut req)?;
            set_status(app, parse_id(id)?, &form)
        }
        ("GET", ["admin", post_type, id]) => record_screen(app, post_type, parse_id(id)?),
        ("POST", ["admin", post_type, id, "meta"]) => {
            let form = read_form(&mut req)?;
            save_meta(app, post_type, parse_id(id)?, &form)
        }
        _ => Err(AppError::NotFound),
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("invalid id: {raw}")))
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, AppError> {
    let mut raw = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut raw)
        .map_err(|e| AppError::BadRequest(format!("unreadable body: {e}")))?;

    Ok(url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect())
}

fn comments_screen(app: &App) -> ResultResp {
    let request = app.request(COMMENTS_SCREEN);
    let query = CommentQuery {
        limit: Some(100),
        ..CommentQuery::default()
    };

    let comments = app.host.query_comments(&request, &query)?;
    let stats = app.host.count_comments(&request, None)?;

    html_response(comments_page(&CommentsVm { stats, comments }))
}

fn set_status(app: &App, comment_id: i64, form: &HashMap<String, String>) -> ResultResp {
    let status = form
        .get("status")
        .map(String::as_str)
        .filter(|s| COMMENT_STATES.contains(s))
        .ok_or_else(|| AppError::BadRequest("unknown comment status".into()))?;

    let request = app.request(COMMENTS_SCREEN);
    if !app.host.set_comment_status(&request, comment_id, status)? {
        return Err(AppError::NotFound);
    }
    redirect_response("/admin/comments")
}

fn entry(comment: CommentRow, note_type: &str) -> EntryVm {
    let is_note = comment.comment_type == note_type;
    let text = if is_note {
        NotePayload::from_content(&comment.content)
            .map(|p| p.summary())
            .unwrap_or_else(|_| "Unreadable note".to_string())
    } else {
        comment.content
    };

    EntryVm {
        author: comment.author,
        created_at: comment.created_at,
        text,
        is_note,
    }
}

fn record_screen(app: &App, post_type: &str, post_id: i64) -> ResultResp {
    let post = app
        .host
        .find_post(post_id)?
        .filter(|p| p.post_type == post_type)
        .ok_or(AppError::NotFound)?;

    let request = app.request(post_type);
    let note_type = &app.config.notes.note_comment_type;
    let entries = app
        .host
        .query_comments(&request, &CommentQuery::for_post(post_id))?
        .into_iter()
        .map(|c| entry(c, note_type))
        .collect();
    let meta = app.host.list_post_meta(post_id)?;

    html_response(record_page(&RecordVm {
        post,
        meta,
        entries,
    }))
}

fn save_meta(
    app: &App,
    post_type: &str,
    post_id: i64,
    form: &HashMap<String, String>,
) -> ResultResp {
    let key = form
        .get("key")
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing key".into()))?;
    let value = form.get("value").map(String::as_str).unwrap_or("");

    let post = app
        .host
        .find_post(post_id)?
        .filter(|p| p.post_type == post_type)
        .ok_or(AppError::NotFound)?;

    let request = app.request(post_type);
    app.host.update_post_meta(&request, post.id, key, value)?;

    redirect_response(&format!("/admin/{post_type}/{post_id}"))
}
