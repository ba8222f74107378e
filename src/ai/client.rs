//! AI backend REST client
//!
//! HTTP client for the local text-generation backend. Requests are refused
//! up front while the connectivity monitor reports offline, and a failed
//! request is reported once: no retries, no backoff.

use crate::connectivity::ConnectivityHandle;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Endpoint used by [`AiClient::send`] when none is given
pub const DEFAULT_ENDPOINT: &str = "chat";

/// AI backend client
pub struct AiClient {
    client: Client,
    config: AiClientConfig,
    connectivity: ConnectivityHandle,
}

/// Configuration for the AI client
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// Base URL, endpoints are appended as `{base_url}/{endpoint}`
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl AiClient {
    /// Create a client gated on the given connectivity handle
    pub fn new(config: AiClientConfig, connectivity: ConnectivityHandle) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            connectivity,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AiClientConfig {
        &self.config
    }

    /// Gate requests on a different connectivity handle
    pub fn set_connectivity(&mut self, connectivity: ConnectivityHandle) {
        self.connectivity = connectivity;
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Send a prompt and return the `reply` field of the response
    pub async fn send(&self, prompt: &str, endpoint: &str, model: &str) -> Result<String, AiError> {
        let body = ChatRequest {
            message: prompt,
            model,
        };
        self.post(endpoint, &body, "reply").await
    }

    /// `send` to the default chat endpoint
    pub async fn chat(&self, prompt: &str, model: &str) -> Result<String, AiError> {
        self.send(prompt, DEFAULT_ENDPOINT, model).await
    }

    /// Ask for an explanation of a topic, returns the `explanation` field
    pub async fn explain(&self, topic: &str, model: &str) -> Result<String, AiError> {
        let body = ExplainRequest { topic, model };
        self.post("explain", &body, "explanation").await
    }

    async fn post<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        reply_field: &str,
    ) -> Result<String, AiError> {
        if !self.connectivity.is_online() {
            tracing::debug!(endpoint = %endpoint, "Refusing AI request while offline");
            return Err(AiError::Offline);
        }

        let url = self.url(endpoint);
        tracing::debug!(url = %url, "Sending AI request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "AI request failed");
                AiError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %url, status = %status, "AI backend returned an error");
            return Err(AiError::RequestFailed(format!("HTTP {}", status.as_u16())));
        }

        let data: Value = response.json().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "AI response is not JSON");
            AiError::RequestFailed(e.to_string())
        })?;

        match data.get(reply_field) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Null) | None => Err(AiError::RequestFailed(format!(
                "response has no `{reply_field}` field"
            ))),
            Some(other) => Ok(other.to_string()),
        }
    }
}

// ============================================
// Request DTOs
// ============================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct ExplainRequest<'a> {
    topic: &'a str,
    model: &'a str,
}

// ============================================
// Errors
// ============================================

/// Errors surfaced by the AI client
#[derive(Error, Debug)]
pub enum AiError {
    #[error("You are offline. This feature requires internet connection.")]
    Offline,

    #[error("Failed to get AI response: {0}")]
    RequestFailed(String),
}
