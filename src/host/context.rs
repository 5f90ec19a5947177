// src/host/context.rs

use chrono::{NaiveDateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub display_name: String,
}

/// Identity of the admin page serving the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminScreen {
    pub id: String,
}

/// Who is acting, where, and when. Passed to every host operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: CurrentUser,
    /// `None` outside the admin area.
    pub screen: Option<AdminScreen>,
    pub now: NaiveDateTime,
}

impl RequestContext {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            user: CurrentUser {
                display_name: display_name.into(),
            },
            screen: None,
            now: Utc::now().naive_utc(),
        }
    }

    pub fn on_screen(mut self, screen_id: impl Into<String>) -> Self {
        self.screen = Some(AdminScreen {
            id: screen_id.into(),
        });
        self
    }

    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn screen_id(&self) -> Option<&str> {
        self.screen.as_ref().map(|s| s.id.as_str())
    }
}
