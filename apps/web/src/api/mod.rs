#![allow(dead_code)]

//! Fetch client — the single point of entry for outbound calls to the job search API.
//!
//! One GET per call: no retries, no timeout, no caching. Status and transport failures
//! are classified into `FetchError`; anything else is surfaced unchanged.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::{form_urlencoded, Url};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error - please check your connection";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    /// Body was not valid JSON for the requested shape.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Other(anyhow::Error),
}

/// What a transport hands back before status classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, connect or send failure: the request never got a response.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The HTTP seam. `ReqwestTransport` in production, canned responses in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)])
        -> Result<RawResponse, TransportError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(classify_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_connect() || err.is_request() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.into())
    }
}

/// Decoded body paired with the HTTP status it arrived with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub body: T,
    pub status: u16,
}

#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl FetchClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url + endpoint`, plus a form-encoded query string when `params` is given.
    pub fn request_url(&self, endpoint: &str, params: Option<&[(&str, &str)]>) -> String {
        let mut url = format!("{}{}", self.base_url, endpoint);
        if let Some(params) = params {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse<T>, FetchError> {
        let url = self.request_url(endpoint, params);
        debug!(url = %url, "GET");

        let response = self
            .transport
            .get(&url, &[("Content-Type", "application/json")])
            .await
            .map_err(|e| match e {
                TransportError::Connect(reason) => {
                    warn!(url = %url, reason = %reason, "Job search request could not be sent");
                    FetchError::Network
                }
                TransportError::Other(e) => FetchError::Other(e),
            })?;

        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        let body = serde_json::from_slice(&response.body)?;

        Ok(ApiResponse {
            body,
            status: response.status,
        })
    }
}

/// Resolves a possibly relative base URL (`/api`) against the application origin.
/// Absolute base URLs are returned unchanged.
pub fn resolve_base_url(base_url: &str, origin: &str) -> anyhow::Result<String> {
    if Url::parse(base_url).is_ok() {
        return Ok(base_url.to_string());
    }

    let origin = Url::parse(origin).with_context(|| format!("Invalid APP_ORIGIN '{origin}'"))?;
    let resolved = origin
        .join(base_url)
        .with_context(|| format!("Cannot resolve API_BASE_URL '{base_url}'"))?;
    Ok(resolved.to_string())
}
