//! HTTP client for the external school backend.
//!
//! Every resource lives under `{base}/api/v1/` on the backend. The client
//! performs exactly one attempt per call; there are no retries and no
//! backoff, and failures are terminal for the triggering request.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::errors::AppError;

/// Request body to relay upstream.
#[derive(Debug, Clone)]
pub enum RelayBody {
    Empty,
    Json(Value),
    /// Opaque passthrough, e.g. a multipart upload with its boundary intact.
    Raw {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

/// What the backend answered: status and body verbatim, plus the headers
/// the portal cares about.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub set_cookies: Vec<String>,
}

impl BackendResponse {
    /// Parse the body as JSON; an empty body reads as `null`.
    pub fn json(&self) -> Result<Value, AppError> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Non-2xx responses become the relayed backend error.
    pub fn into_success(self) -> Result<Self, AppError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            let body = self.json().unwrap_or(Value::Null);
            Err(AppError::Backend {
                status: self.status,
                body,
            })
        }
    }
}

/// Relay interface to the school backend.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Forward one request. `path` is relative to `/api/v1/` and keeps its
    /// trailing slash; `cookie` is the inbound `Cookie` header, forwarded
    /// whole so the backend sees the session credential it issued.
    async fn relay(
        &self,
        method: &str,
        path: &str,
        query: Option<&str>,
        cookie: Option<&str>,
        body: RelayBody,
    ) -> Result<BackendResponse, AppError>;
}

/// reqwest-backed relay client.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}/api/v1/{}?{}", self.base_url, path, q),
            _ => format!("{}/api/v1/{}", self.base_url, path),
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn relay(
        &self,
        method: &str,
        path: &str,
        query: Option<&str>,
        cookie: Option<&str>,
        body: RelayBody,
    ) -> Result<BackendResponse, AppError> {
        let method = reqwest::Method::from_bytes(method.as_bytes())
            .map_err(|_| AppError::Internal(format!("Invalid method: {}", method)))?;
        let url = self.url(path, query);

        let mut request = self.client.request(method, &url);
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request = match body {
            RelayBody::Empty => request,
            RelayBody::Json(value) => request.json(&value),
            RelayBody::Raw {
                content_type,
                bytes,
            } => {
                if let Some(ct) = content_type {
                    request = request.header(reqwest::header::CONTENT_TYPE, ct);
                }
                request.body(bytes)
            }
        };

        let response = request.send().await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|_| AppError::Upstream("Unreadable backend status".to_string()))?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let set_cookies = response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(%url, status = %status, "relayed backend call");

        Ok(BackendResponse {
            status,
            body,
            content_type,
            set_cookies,
        })
    }
}

/// GET a resource and parse it at the boundary into a typed record.
pub async fn fetch_json<T: DeserializeOwned>(
    api: &dyn BackendApi,
    path: &str,
    query: Option<&str>,
    cookie: &str,
) -> Result<T, AppError> {
    let response = api
        .relay("GET", path, query, Some(cookie), RelayBody::Empty)
        .await?
        .into_success()?;
    Ok(serde_json::from_slice(&response.body)?)
}
