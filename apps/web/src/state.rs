use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::ErrorLog;
use crate::jobs::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Job lookup used by the page handler. Default: `JobService` over HTTP.
    pub jobs: Arc<dyn JobSource>,
    /// Sink for non-fatal diagnostics raised while building views.
    pub log: Arc<dyn ErrorLog>,
    /// Client for the `/api` pass-through to the upstream search service.
    pub http: reqwest::Client,
}
