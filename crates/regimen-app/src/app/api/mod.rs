mod app_specific;
mod patterns;

use salvo::Router;

// Re-export route constants from core
pub use regimen_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
    PATTERNS_ROUTE_COMPONENT, PATTERNS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(patterns::routes())
}
