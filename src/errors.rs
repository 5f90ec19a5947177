// errors.rs
use astra::Response;

/// Errors originating from either the admin surface
/// (routing, missing records, bad form input) or downstream layers (DB, payloads).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    Db(String),
    #[error("Payload Error: {0}")]
    Payload(String),
    #[error("Internal Server Error")]
    Internal,
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Payload(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, AppError>;
