use crate::config::NotesConfig;
use crate::db::comments::{CommentRow, NewComment};
use crate::db::{init_db, Database};
use crate::domain::note::NotePayload;
use crate::errors::AppError;
use crate::host::{Host, RequestContext};
use crate::notes::CommentNotes;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::params;
use std::sync::Arc;
use tempfile::TempDir;

pub const OPERATOR: &str = "Jane Agent";

/// A host on a throwaway database with the notes integration registered.
/// Keep it alive for the whole test; dropping it removes the database file.
pub struct TestHost {
    pub host: Host,
    pub notes: Arc<CommentNotes>,
    _dir: TempDir,
}

pub fn init_test_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes_test.sqlite");
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    (db, dir)
}

pub fn init_test_host() -> TestHost {
    init_test_host_with(CommentNotes::new(NotesConfig::default()))
}

pub fn init_test_host_with(notes: CommentNotes) -> TestHost {
    let (db, dir) = init_test_db();
    let mut host = Host::new(db);
    let notes = notes.register(&mut host);
    TestHost {
        host,
        notes,
        _dir: dir,
    }
}

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn operator() -> RequestContext {
    RequestContext::new(OPERATOR).at(fixed_now())
}

pub fn new_property(host: &Host) -> i64 {
    host.insert_post(&operator(), "property", "12 Harbour Road")
        .expect("Failed to insert property")
}

pub fn visitor_comment(post_id: i64, approved: &str) -> NewComment {
    NewComment {
        post_id,
        author: "Visitor".to_string(),
        author_email: "visitor@example.com".to_string(),
        author_url: String::new(),
        created_at: fixed_now(),
        content: "Is this still available?".to_string(),
        approved: approved.to_string(),
        comment_type: "comment".to_string(),
    }
}

/// Notes stored against `post_id`, read straight from the table so no filter applies.
pub fn stored_notes(host: &Host, post_id: i64) -> Vec<CommentRow> {
    host.database()
        .with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, author, author_email, created_at, content, approved, comment_type
                 FROM comments WHERE post_id = ?1 AND comment_type = 'propertyhive_note' ORDER BY id",
            )?;
            let rows = stmt.query_map(params![post_id], |r| {
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
            Ok::<_, AppError>(out)
        })
        .expect("Failed to read notes")
}

pub fn payloads(notes: &[CommentRow]) -> Vec<NotePayload> {
    notes
        .iter()
        .map(|n| NotePayload::from_content(&n.content).expect("note payload should decode"))
        .collect()
}
