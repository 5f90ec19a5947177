// src/notes/visibility.rs

use rusqlite::types::Value;
use tracing::debug;

use crate::domain::query::CommentClauses;

type ScreenFilter = dyn Fn(Vec<String>) -> Vec<String> + Send + Sync;

/// Admin screens on which notes stay visible.
///
/// Starts from a base list; other integrations can register filters that
/// rewrite the list, applied in registration order on every check.
pub struct NoteScreens {
    base: Vec<String>,
    filters: Vec<Box<ScreenFilter>>,
}

impl NoteScreens {
    pub fn new<I, S>(base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into_iter().map(Into::into).collect(),
            filters: Vec::new(),
        }
    }

    pub fn add_filter<F>(&mut self, filter: F)
    where
        F: Fn(Vec<String>) -> Vec<String> + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub fn resolve(&self) -> Vec<String> {
        self.filters
            .iter()
            .fold(self.base.clone(), |screens, filter| filter(screens))
    }

    pub fn allows(&self, screen_id: &str) -> bool {
        self.resolve().iter().any(|s| s == screen_id)
    }
}

impl std::fmt::Debug for NoteScreens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteScreens")
            .field("base", &self.base)
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Hides notes from a comment listing unless the request is on a screen that shows them.
///
/// Listings that bypass clause assembly are not affected.
pub fn exclude_note_comments(
    clauses: CommentClauses,
    screen_id: Option<&str>,
    screens: &NoteScreens,
    note_type: &str,
) -> CommentClauses {
    if let Some(id) = screen_id {
        if screens.allows(id) {
            debug!(screen = id, "notes visible on record screen");
            return clauses;
        }
    }

    let mut clauses = clauses;
    clauses.and_where("comment_type != ?", Value::Text(note_type.to_string()));
    clauses
}
