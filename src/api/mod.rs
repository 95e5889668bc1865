//! Data-access layer for the telematics backend.
//!
//! Every exported function issues exactly one HTTP call (the bulk upload flow
//! issues three, one per phase). Calls attach the session's bearer token and
//! return an [`ApiResponse`] for every HTTP status: non-2xx responses are data,
//! not errors. Only a missing token and transport failures are errors.

use crate::auth::TokenProvider;
use crate::config::ApiConfig;
use crate::validation::ValidationError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub mod devices;
pub mod drivers;
pub mod fleets;
pub mod ifta;
pub mod trips;
pub mod upload;
pub mod vehicles;

/// Errors raised by data-access functions.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required: no session token available")]
    Authentication,

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Upload { phase: upload::UploadPhase, message: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Status/data pair returned by every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Whether the HTTP status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `details` message carried by error payloads
    pub fn details(&self) -> Option<&str> {
        self.data.get("details").and_then(Value::as_str)
    }

    /// The application-level failure message, if this response signals one.
    ///
    /// Non-2xx responses always fail (with `details` when present). A 2xx
    /// response fails only when its payload is nothing but a `details` message.
    pub fn failure_message(&self) -> Option<String> {
        if !self.is_success() {
            return Some(
                self.details()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed with status {}", self.status)),
            );
        }

        match &self.data {
            Value::Object(map) if map.len() == 1 => self.details().map(str::to_string),
            _ => None,
        }
    }

    /// Row array of a list payload: a bare array, or the first of `rows`/`data`/`items`
    pub fn rows(&self) -> &[Value] {
        rows_of(&self.data)
    }

    /// Total row count of a list payload, when the server reports one
    pub fn total(&self) -> Option<u64> {
        total_of(&self.data)
    }
}

/// Row array of an opaque list payload.
pub fn rows_of(data: &Value) -> &[Value] {
    if let Some(rows) = data.as_array() {
        return rows;
    }
    ["rows", "data", "items"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Total count of an opaque list payload.
pub fn total_of(data: &Value) -> Option<u64> {
    ["count", "total", "totalCount"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_u64))
}

/// Page/limit pair appended to list endpoints as `?page=&limit=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

/// HTTP client bound to one API origin and one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client for `base_url` (which should end with '/')
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, tokens, None)
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self::with_timeout(config.base_url.clone(), tokens, timeout)
    }

    fn with_timeout(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.tokens.token().ok_or(ApiError::Authentication)
    }

    /// POST a JSON body to `path`
    pub async fn post<B>(&self, path: &str, query: &[(&str, String)], body: &B) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let token = self.bearer()?;
        let url = self.url(path);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .query(query)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        Self::into_api_response(response).await
    }

    /// GET `path`
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, ApiError> {
        let token = self.bearer()?;
        let url = self.url(path);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).query(query).bearer_auth(token).send().await?;

        Self::into_api_response(response).await
    }

    /// PUT raw bytes to an absolute (presigned) URL. No bearer token is attached.
    pub async fn put_bytes(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<u16, ApiError> {
        log::debug!("PUT {} ({} bytes)", url, bytes.len());
        let response = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }

    async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            // Some error pages are plain text; keep them as a string payload
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !(200..300).contains(&status) {
            log::warn!("API responded with status {}", status);
        }

        Ok(ApiResponse { status, data })
    }
}
