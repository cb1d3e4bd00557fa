//! Stored pattern library: CRUD plus toggle, regenerate and export actions.

use chrono::NaiveDate;
use salvo::{
    Depot, Request, Response, Router, handler,
    http::StatusCode,
    writing::{Json, Text},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::{DatesResponse, pattern_id, render_bad_request, render_error};
use crate::error::AppError;
use crate::service_handler::get_service_from_depot;
use regimen_pattern::{RecurringPattern, ical::to_rrule_set};
use regimen_service::schedule::{PatternService, ScheduledOccurrence};

/// ## Summary
/// Toggle request payload
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

/// ## Summary
/// Regenerate request payload
#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    pub as_of: NaiveDate,
}

/// ## Summary
/// Stored preview request payload
#[derive(Debug, Deserialize)]
pub struct StoredPreviewRequest {
    pub from: NaiveDate,
    pub count: usize,
}

/// ## Summary
/// Pattern list response payload
#[derive(Debug, Serialize)]
pub struct PatternListResponse {
    pub patterns: Vec<RecurringPattern>,
}

/// ## Summary
/// Materialized occurrences response payload
#[derive(Debug, Serialize)]
pub struct OccurrencesResponse {
    pub occurrences: Vec<ScheduledOccurrence>,
}

/// Fetches the pattern service, rendering a 500 when it is missing.
fn service(depot: &Depot, res: &mut Response) -> Option<std::sync::Arc<PatternService>> {
    match get_service_from_depot(depot) {
        Ok(service) => Some(service),
        Err(e) => {
            render_error(res, &e);
            None
        }
    }
}

/// ## Summary
/// POST /api/patterns - Create a pattern
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid or the pattern fails validation
#[handler]
async fn create_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };

    let pattern: RecurringPattern = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse create pattern request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    match service.create(pattern) {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(created));
        }
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// GET /api/patterns - List stored patterns in creation order
#[handler]
async fn list_handler(depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };

    match service.list() {
        Ok(patterns) => res.render(Json(PatternListResponse { patterns })),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// GET /api/patterns/{id} - Fetch a stored pattern
///
/// ## Errors
/// Returns HTTP 404 if the pattern does not exist
#[handler]
async fn get_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    match service.get(id) {
        Ok(pattern) => res.render(Json(pattern)),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// PUT /api/patterns/{id} - Replace a pattern definition
///
/// Already materialized occurrences are not rewritten until the pattern is
/// regenerated.
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid or the pattern fails validation
/// Returns HTTP 404 if the pattern does not exist
#[handler]
async fn update_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    let pattern: RecurringPattern = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse update pattern request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    match service.update(id, pattern) {
        Ok(updated) => res.render(Json(updated)),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// DELETE /api/patterns/{id}?cascade=true - Delete a pattern
///
/// With `cascade`, the pattern's materialized occurrences are deleted too.
///
/// ## Errors
/// Returns HTTP 404 if the pattern does not exist
#[handler]
async fn delete_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };
    let cascade = req.query::<bool>("cascade").unwrap_or(false);

    match service.delete(id, cascade) {
        Ok(outcome) => res.render(Json(outcome)),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// POST /api/patterns/{id}/toggle - Enable or disable a pattern
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid
/// Returns HTTP 404 if the pattern does not exist
#[handler]
async fn toggle_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    let toggle_req: ToggleRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse toggle request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    match service.set_enabled(id, toggle_req.enabled) {
        Ok(pattern) => res.render(Json(pattern)),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// POST /api/patterns/{id}/regenerate - Rebuild occurrences from `as_of` onward
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid
/// Returns HTTP 404 if the pattern does not exist
/// Returns HTTP 422 if the pattern cannot be expanded
#[handler]
async fn regenerate_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    let regenerate_req: RegenerateRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse regenerate request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    match service.regenerate(id, regenerate_req.as_of) {
        Ok(occurrences) => res.render(Json(OccurrencesResponse { occurrences })),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// GET /api/patterns/{id}/occurrences - Materialized occurrences of a pattern
#[handler]
async fn occurrences_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    match service.occurrences(id) {
        Ok(occurrences) => res.render(Json(OccurrencesResponse { occurrences })),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// POST /api/patterns/{id}/preview - Upcoming dates of a stored pattern
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid
/// Returns HTTP 404 if the pattern does not exist
#[handler]
async fn stored_preview_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    let preview_req: StoredPreviewRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse stored preview request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    match service.preview(id, preview_req.from, preview_req.count) {
        Ok(dates) => res.render(Json(DatesResponse { dates })),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// GET /api/patterns/{id}/rrule - RFC 5545 recurrence set for calendar export
///
/// ## Errors
/// Returns HTTP 404 if the pattern does not exist
/// Returns HTTP 422 if the pattern cannot be expressed as an RRULE
#[handler]
async fn rrule_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = service(depot, res) else {
        return;
    };
    let Some(id) = pattern_id(req, res) else {
        return;
    };

    let rrule_set = match service.get(id) {
        Ok(pattern) => to_rrule_set(&pattern).map_err(AppError::from),
        Err(e) => Err(AppError::from(e)),
    };

    match rrule_set {
        Ok(set) => res.render(Text::Plain(set.to_string())),
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(list_handler)
        .post(create_handler)
        .push(
            Router::with_path("{id}")
                .get(get_handler)
                .put(update_handler)
                .delete(delete_handler)
                .push(Router::with_path("toggle").post(toggle_handler))
                .push(Router::with_path("regenerate").post(regenerate_handler))
                .push(Router::with_path("occurrences").get(occurrences_handler))
                .push(Router::with_path("preview").post(stored_preview_handler))
                .push(Router::with_path("rrule").get(rrule_handler)),
        )
}
