//! Pattern preview, expansion and library endpoints.

mod library;
mod preview;

use chrono::NaiveDate;
use salvo::{Request, Response, Router, http::StatusCode, writing::Json};
use serde::Serialize;

use super::PATTERNS_ROUTE_COMPONENT;
use crate::error::AppError;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Expanded dates response payload
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub dates: Vec<NaiveDate>,
}

fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = ?err, "Pattern request failed");
    } else {
        tracing::debug!(error = %err, status = %status, "Pattern request rejected");
    }
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.to_string(),
    }));
}

fn render_bad_request(res: &mut Response, message: &str) {
    res.status_code(StatusCode::BAD_REQUEST);
    res.render(Json(ErrorResponse {
        error: message.to_string(),
    }));
}

/// Reads the `{id}` path parameter, rendering a 400 when it is not a UUID.
fn pattern_id(req: &Request, res: &mut Response) -> Option<uuid::Uuid> {
    let Some(raw) = req.param::<String>("id") else {
        render_bad_request(res, "Pattern ID required");
        return None;
    };
    if let Ok(id) = uuid::Uuid::parse_str(&raw) {
        Some(id)
    } else {
        render_bad_request(res, "Invalid pattern ID format");
        None
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(PATTERNS_ROUTE_COMPONENT)
        .push(preview::routes())
        .push(library::routes())
}

#[cfg(test)]
mod test_support;


#[cfg(test)]
mod preview_tests;
