//! # Transport
//!
//! Thin wrapper around `reqwest::Client`. Builds absolute URLs from the
//! configured base, attaches the access token as a query parameter, and
//! folds every outcome into a [`RequestResult`].
//!
//! ```text
//! path + options ──► Url ──► reqwest ──► 2xx?  ──yes──► parse T   ──► Ok(T)
//!                                          │
//!                                          └─no──► ErrorResponse ──► Err(Status)
//! ```
//!
//! Nothing is thrown past this boundary: transport failures, bad statuses
//! and undecodable bodies all come back as `Err(RequestError)`.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Query parameter carrying the access token on authenticated requests.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Either the decoded payload or the error that prevented it.
pub type RequestResult<T> = Result<T, RequestError>;

/// The server's error body: `{"err": 7, "msg": "..."}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    pub err: i64,
    pub msg: String,
}

/// Snapshot of a non-2xx response, kept so callers can inspect what the
/// server actually said.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub api_error: Option<ApiError>,
}

impl ErrorResponse {
    fn from_parts(status: StatusCode, body: String) -> Self {
        let api_error = serde_json::from_str::<ApiError>(&body).ok();
        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
            api_error,
        }
    }

    /// Human-readable message: the server's `msg` when present, otherwise the status text.
    pub fn message(&self) -> String {
        match &self.api_error {
            Some(api) => api.msg.clone(),
            None if self.status_text.is_empty() => format!("HTTP {}", self.status),
            None => self.status_text.clone(),
        }
    }
}

/// Errors surfaced by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Base URL or path could not form a valid URL.
    Config(String),
    /// Connection, DNS or timeout failure. No response was received.
    Network(String),
    /// The server answered with a status outside [200, 300).
    Status(ErrorResponse),
    /// A 2xx body did not decode into the expected type.
    Parse(String),
}

impl RequestError {
    /// True for failures of the network call itself (bad status included).
    pub fn is_network(&self) -> bool {
        matches!(self, RequestError::Network(_) | RequestError::Status(_))
    }

    /// The non-2xx response, when one was received.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            RequestError::Status(response) => Some(response),
            _ => None,
        }
    }

    /// Short message suitable for an inline error.
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Status(response) => response.message(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Config(msg) => write!(f, "config error: {msg}"),
            RequestError::Network(msg) => write!(f, "network error: {msg}"),
            RequestError::Status(response) => {
                write!(f, "HTTP {}: {}", response.status, response.message())
            }
            RequestError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RequestError {}

/// Per-request options. `body` is sent as JSON when present.
#[derive(Debug, Clone)]
pub struct RequestOptions<'a> {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub access_token: Option<&'a str>,
}

impl<'a> RequestOptions<'a> {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            access_token: None,
        }
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            access_token: None,
        }
    }

    /// Attaches the token when there is one; an empty token counts as none.
    pub fn with_token(mut self, token: Option<&'a str>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    client: reqwest::Client,
}

impl Transport {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for `path`, setting `access_token` when given.
    pub fn url_for(&self, path: &str, access_token: Option<&str>) -> RequestResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| RequestError::Config(format!("{raw}: {e}")))?;

        if let Some(token) = access_token {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| key != ACCESS_TOKEN_PARAM)
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair(ACCESS_TOKEN_PARAM, token);
        }

        Ok(url)
    }

    /// Performs the request and decodes a 2xx body into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<'_>,
    ) -> RequestResult<T> {
        let url = self.url_for(path, options.access_token)?;
        debug!("{} {}", options.method, redact(&url));

        let mut builder = self.client.request(options.method.clone(), url.clone());
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed: {}", options.method, redact(&url), e);
            RequestError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;
        debug!("{} {} -> {} ({} bytes)", options.method, redact(&url), status, body.len());

        if !status.is_success() {
            let error = ErrorResponse::from_parts(status, body);
            warn!(
                "{} {} returned {}: {}",
                options.method,
                redact(&url),
                error.status,
                error.message()
            );
            return Err(RequestError::Status(error));
        }

        // Empty 2xx bodies decode as JSON null
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(text).map_err(|e| {
            warn!("Failed to decode response from {}: {}", redact(&url), e);
            RequestError::Parse(e.to_string())
        })
    }
}

/// Strips the access token from a URL before it is logged.
fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == ACCESS_TOKEN_PARAM) {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == ACCESS_TOKEN_PARAM { "***".to_string() } else { value.into_owned() };
            (key.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_base_and_path() {
        let transport = Transport::new("http://localhost:8000/api/");
        let url = transport.url_for("/sms", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/sms");
    }

    #[test]
    fn test_url_for_appends_access_token() {
        let transport = Transport::new("http://localhost:8000/api");
        let url = transport.url_for("/me", Some("tok")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/me?access_token=tok");
    }

    #[test]
    fn test_url_for_replaces_existing_token_and_keeps_other_params() {
        let transport = Transport::new("http://localhost:8000/api");
        let url = transport
            .url_for("/values?page=2&access_token=old", Some("new"))
            .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("access_token".to_string(), "new".to_string()),
            ]
        );
    }

    #[test]
    fn test_url_for_rejects_bad_base() {
        let transport = Transport::new("not a url");
        assert!(matches!(
            transport.url_for("/me", None),
            Err(RequestError::Config(_))
        ));
    }

    #[test]
    fn test_with_token_ignores_empty_token() {
        let options = RequestOptions::get().with_token(Some(""));
        assert!(options.access_token.is_none());
    }

    #[test]
    fn test_error_response_parses_server_error_body() {
        let response = ErrorResponse::from_parts(
            StatusCode::BAD_REQUEST,
            r#"{"err":7,"msg":"invalid code"}"#.to_string(),
        );
        assert_eq!(response.status, 400);
        assert_eq!(response.status_text, "Bad Request");
        assert_eq!(response.message(), "invalid code");
    }

    #[test]
    fn test_error_response_falls_back_to_status_text() {
        let response = ErrorResponse::from_parts(StatusCode::BAD_GATEWAY, "<html>".to_string());
        assert!(response.api_error.is_none());
        assert_eq!(response.message(), "Bad Gateway");
    }

    #[test]
    fn test_redact_hides_token() {
        let url = Url::parse("http://h/me?access_token=secret&x=1").unwrap();
        let shown = redact(&url);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("x=1"));
    }

    #[test]
    fn test_is_network_covers_status_and_transport() {
        assert!(RequestError::Network("refused".into()).is_network());
        assert!(!RequestError::Parse("eof".into()).is_network());
    }
}
