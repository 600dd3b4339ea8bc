//! HttpChatBackend - REST client for the Rezzy chat service.
//!
//! Endpoints (relative to `api_base_url`):
//!
//! - `POST /process_query` with `{"question", "chat_session_id"?}`
//! - `GET /chat_sessions?page=&limit=`
//! - `GET /chat_sessions/{id}`
//! - `GET /health`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use rezzy_core::config::{ClientConfig, RetryPolicy};
use rezzy_core::error::{Result, RezzyError};
use rezzy_core::session::{ChatSession, ChatSessionsPage, HealthStatus, QueryReply};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::ChatBackend;

/// Backend implementation that talks to the Rezzy HTTP API.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    base_url: Url,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpChatBackend {
    /// Creates a backend for `base_url` with default timeout and retry policy.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&ClientConfig {
            api_base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.api_base_url.trim()).map_err(|err| {
            RezzyError::config(format!("Invalid api_base_url '{}': {err}", config.api_base_url))
        })?;
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RezzyError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            timeout,
            retry: config.retry.clone(),
        })
    }

    /// Overrides the retry policy after construction.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RezzyError::config(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request built by `build`, retrying transport failures.
    async fn send_json<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 1;
        loop {
            match self.execute(build()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transport() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    tracing::warn!(
                        target: "http_retry",
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Rezzy API request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.map_transport_error(err))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> RezzyError {
        if err.is_timeout() {
            RezzyError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            RezzyError::network(format!("Rezzy API request failed: {err}"))
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn process_query(&self, question: &str, session_id: Option<&str>) -> Result<QueryReply> {
        let url = self.endpoint(&["process_query"])?;
        let body = QueryRequest {
            question,
            chat_session_id: session_id,
        };

        let value: Value = self
            .send_json(|| self.client.post(url.clone()).json(&body))
            .await?;
        QueryReply::from_value(value)
    }

    async fn list_sessions(&self, page: u32, limit: u32) -> Result<ChatSessionsPage> {
        let url = self.endpoint(&["chat_sessions"])?;
        self.send_json(|| {
            self.client
                .get(url.clone())
                .query(&[("page", page), ("limit", limit)])
        })
        .await
    }

    async fn session_detail(&self, session_id: &str) -> Result<ChatSession> {
        let url = self.endpoint(&["chat_sessions", session_id])?;
        self.send_json(|| self.client.get(url.clone())).await
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        self.send_json(|| self.client.get(url.clone())).await
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_session_id: Option<&'a str>,
}

/// Pulls a readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"error": "..."}`,
/// `{"error": {"message": "..."}}` and falls back to the raw body.
fn map_http_error(status: StatusCode, body: String) -> RezzyError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            let detail = value.get("detail").and_then(Value::as_str);
            let error = value.get("error").and_then(|error| {
                error
                    .as_str()
                    .or_else(|| error.get("message").and_then(Value::as_str))
            });
            detail.or(error).map(str::to_string)
        })
        .unwrap_or(body);

    RezzyError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let backend = HttpChatBackend::new("http://localhost:8000/").unwrap();
        assert_eq!(
            backend.endpoint(&["process_query"]).unwrap().as_str(),
            "http://localhost:8000/process_query"
        );

        let backend = HttpChatBackend::new("https://rezzy.example.com/api").unwrap();
        assert_eq!(
            backend
                .endpoint(&["chat_sessions", "a b/c"])
                .unwrap()
                .as_str(),
            "https://rezzy.example.com/api/chat_sessions/a%20b%2Fc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpChatBackend::new("not a url").err().unwrap();
        assert!(matches!(err, RezzyError::Config(_)));
    }

    #[test]
    fn test_map_http_error_messages() {
        let err = map_http_error(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Chat session not found"}"#.to_string(),
        );
        assert_eq!(
            err,
            RezzyError::Http {
                status: 404,
                message: "Chat session not found".into()
            }
        );

        let err = map_http_error(
            StatusCode::BAD_GATEWAY,
            r#"{"error": {"message": "upstream down"}}"#.to_string(),
        );
        assert!(matches!(err, RezzyError::Http { status: 502, ref message } if message == "upstream down"));

        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
        assert!(matches!(err, RezzyError::Http { status: 500, ref message } if message == "boom"));
    }
}
