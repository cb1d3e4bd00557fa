use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use regimen_core::error::CoreError;
use regimen_service::schedule::PatternService;

pub struct PatternServiceHandler {
    pub service: PatternService,
}

#[async_trait]
impl salvo::Handler for PatternServiceHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        // Clones share the same repository
        depot.inject(Arc::new(self.service.clone()));
    }
}

/// ## Summary
/// Retrieves the pattern service from the depot.
///
/// ## Errors
/// Returns an error if the pattern service is not found in the depot.
pub fn get_service_from_depot(depot: &salvo::Depot) -> AppResult<Arc<PatternService>> {
    depot
        .obtain::<Arc<PatternService>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Pattern service not found in depot").into())
}
