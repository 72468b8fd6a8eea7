use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{farmers, health};
use crate::state::AppState;

/// Application routes. Transport layers (CORS, tracing) are added by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // Farmer routes
        .route("/farmers", post(farmers::create_farmer).get(farmers::list_farmers))
        .route("/farmers/search", get(farmers::search_farmers))
        .route(
            "/farmers/{id}",
            get(farmers::get_farmer)
                .put(farmers::update_farmer)
                .delete(farmers::delete_farmer),
        )
        .route("/farmers/{id}/deactivate", post(farmers::deactivate_farmer))
        .with_state(state)
}
