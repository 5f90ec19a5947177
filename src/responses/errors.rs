use crate::errors::AppError;
use crate::templates::error_page;
use astra::{Body, Response, ResponseBuilder};

/// Convert an AppError into an HTML error page with a matching status.
pub fn html_error_response(err: AppError) -> Response {
    let (status, message) = match &err {
        AppError::NotFound => (404, "Not Found".to_string()),
        AppError::BadRequest(msg) => (400, msg.clone()),
        AppError::Db(_) | AppError::Payload(_) | AppError::Internal => {
            tracing::error!(error = %err, "request failed");
            (500, err.to_string())
        }
    };

    let body = error_page(status, &message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
