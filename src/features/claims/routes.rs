use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::claims::handlers::submit_claim;
use crate::features::claims::services::ClaimAdjudicator;

/// Create routes for the claims feature
pub fn routes(adjudicator: Arc<ClaimAdjudicator>) -> Router {
    Router::new()
        .route("/api/claims", post(submit_claim))
        .with_state(adjudicator)
}
