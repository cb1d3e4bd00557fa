//! Stateless preview and expansion of unsaved patterns.

use chrono::NaiveDate;
use salvo::{Depot, Request, Response, Router, handler, writing::Json};
use serde::Deserialize;
use tracing::error;

use super::{DatesResponse, render_bad_request, render_error};
use crate::config::get_config_from_depot;
use crate::error::AppError;
use regimen_core::error::CoreError;
use regimen_pattern::{ExpansionWindow, RecurringPattern, expand, preview_next};

/// ## Summary
/// Preview request payload
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub pattern: RecurringPattern,
    pub from: NaiveDate,
    pub count: usize,
}

/// ## Summary
/// Expand request payload
#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub pattern: RecurringPattern,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// ## Summary
/// POST /api/patterns/preview - Upcoming dates of a pattern being edited
///
/// Looks 90 days ahead of `from`; fewer than `count` dates may come back.
///
/// ## Errors
/// Returns HTTP 400 if the body is not a valid preview request
/// Returns HTTP 422 if the pattern lacks fields its type requires
#[handler]
async fn preview_handler(req: &mut Request, res: &mut Response) {
    let preview_req: PreviewRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse preview request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    match preview_next(&preview_req.pattern, preview_req.from, preview_req.count) {
        Ok(dates) => res.render(Json(DatesResponse { dates })),
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

/// ## Summary
/// POST /api/patterns/expand - Dates of a pattern within an explicit window
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid or the window exceeds the configured maximum
/// Returns HTTP 422 if the pattern lacks fields its type requires
/// Returns HTTP 500 if configuration is missing from the depot
#[handler]
async fn expand_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let settings = match get_config_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    let expand_req: ExpandRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse expand request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };

    let mut window = ExpansionWindow::new(expand_req.start, expand_req.end);
    if let Some(max) = expand_req.max_results {
        window = window.with_max_results(max);
    }

    let max_window_days = settings.schedule.max_window_days;
    if window.len_days() > u64::from(max_window_days) {
        let err = CoreError::InvalidInput(format!(
            "window of {} days exceeds the maximum of {max_window_days}",
            window.len_days()
        ));
        render_error(res, &AppError::from(err));
        return;
    }

    match expand(&expand_req.pattern, &window) {
        Ok(dates) => {
            tracing::debug!(
                pattern = %expand_req.pattern.name,
                count = dates.len(),
                "Expanded pattern"
            );
            res.render(Json(DatesResponse { dates }));
        }
        Err(e) => render_error(res, &AppError::from(e)),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("preview").post(preview_handler))
        .push(Router::with_path("expand").post(expand_handler))
}
