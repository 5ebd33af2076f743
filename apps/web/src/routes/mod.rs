pub mod health;
pub mod pages;
pub mod proxy;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::handle_jobs_page))
        .route("/health", get(health::health_handler))
        // Pass-through to the upstream search service
        .route("/api", get(proxy::handle_proxy))
        .route("/api/*rest", get(proxy::handle_proxy))
        .with_state(state)
}
