//! Property notes on top of a comment store.
//!
//! Notes are audit events ("price changed", "came on market") kept as comments
//! of their own type against property records. See [`notes::CommentNotes`] for
//! the integration and [`host::Host`] for the platform it hooks into.

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod host;
pub mod notes;
pub mod responses;
pub mod router;
pub mod templates;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, NotesConfig};
pub use errors::AppError;
pub use host::{Host, RequestContext};
pub use notes::CommentNotes;
