//! `/api` pass-through to the upstream search service.
//!
//! The `/api` prefix is replaced with the configured upstream path; the query
//! string is forwarded untouched and `Origin` is set to the upstream host.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api, GET /api/*rest
pub async fn handle_proxy(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let target = upstream_url(&state.config, uri.path(), uri.query());
    debug!(from = %uri, to = %target, "Proxying job search request");

    let upstream = state
        .http
        .get(&target)
        .header("Origin", state.config.proxy_target.as_str())
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| HeaderValue::from_str(v).ok());
    let body = upstream
        .bytes()
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let mut response = (status, body).into_response();
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

/// `/api/x?q=1` → `<target><proxy_path>/x?q=1`
pub fn upstream_url(config: &Config, path: &str, query: Option<&str>) -> String {
    let rest = path.strip_prefix("/api").unwrap_or(path);
    let mut url = format!(
        "{}{}{}",
        config.proxy_target.trim_end_matches('/'),
        config.proxy_path,
        rest
    );
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }
    url
}
