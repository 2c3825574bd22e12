//! Thin HTTP transport over the recruitment API.
//!
//! Builds requests against a base URL and decodes FastAPI-style error bodies.
//! Credentials are attached by the session manager, never here.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{SessionError, SessionResult};

/// HTTP client bound to one API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Client with a transport-level timeout applied to every request.
    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> SessionResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an API path such as `/api/auth/me`.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }
}

/// Reads a failed response into its display message.
pub async fn failure_detail(response: Response) -> String {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    extract_detail(status, &body)
}

/// Extracts the message of an error body.
///
/// Understands `{"detail": "..."}` and validation lists
/// `{"detail": [{"msg": "..."}]}`; falls back to the raw body, then to `HTTP <status>`.
pub fn extract_detail(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body)
        && let Some(detail) = json.get("detail")
    {
        match detail {
            Value::String(msg) => return msg.clone(),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join("; ");
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

/// Decodes a successful response body.
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> SessionResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::Decode(e.to_string()))
}

/// Decodes a list body. Anything that is not a JSON array reads as empty.
pub async fn decode_list<T: DeserializeOwned>(response: Response) -> SessionResult<Vec<T>> {
    let value: Value = decode_json(response).await?;
    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| SessionError::Decode(e.to_string()))
        }
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8000/".parse().unwrap());
        assert_eq!(client.url("/api/auth/me"), "http://localhost:8000/api/auth/me");
        assert_eq!(client.url("offres"), "http://localhost:8000/offres");
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let client = ApiClient::new("https://example.com/backend".parse().unwrap());
        assert_eq!(client.url("/cvs/my-cvs"), "https://example.com/backend/cvs/my-cvs");
    }

    #[test]
    fn test_extract_detail_string() {
        assert_eq!(
            extract_detail(401, r#"{"detail":"Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail":[{"loc":["body","password"],"msg":"too short"},{"msg":"bad email"}]}"#;
        assert_eq!(extract_detail(422, body), "too short; bad email");
    }

    #[test]
    fn test_extract_detail_fallbacks() {
        assert_eq!(extract_detail(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_detail(500, "  "), "HTTP 500");
        assert_eq!(extract_detail(400, r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }
}
