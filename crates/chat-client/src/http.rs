//! HTTP implementation of [`ChatClient`]: JSON `POST <base_url>/chat` over reqwest.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::{ChatApiConfig, ChatClient, ChatRequest, ChatResponse, DEFAULT_TIMEOUT_SECS};

/// Longest error-body excerpt kept in error messages and logs.
const BODY_PREVIEW_LEN: usize = 200;

/// reqwest-based [`ChatClient`] talking to the remote chatbot server.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    endpoint: String,
}

impl HttpChatClient {
    /// Client for `<base_url>/chat` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Client for `<base_url>/chat`; a request not finished after `timeout` fails.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: chat_endpoint(base_url),
        })
    }

    /// Builds the client from a [`ChatApiConfig`].
    pub fn from_config(config: &dyn ChatApiConfig) -> Result<Self> {
        Self::with_timeout(config.base_url(), config.timeout())
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Joins the base URL and the `/chat` path, tolerating a trailing slash on the base.
fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat", base_url.trim_end_matches('/'))
}

fn preview(text: &str) -> String {
    if text.chars().count() <= BODY_PREVIEW_LEN {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(BODY_PREVIEW_LEN).collect::<String>())
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        info!(
            endpoint = %self.endpoint,
            message_len = request.message.chars().count(),
            "step: chat API request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Chat API request to {} failed", self.endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read chat API response body")?;

        if !status.is_success() {
            anyhow::bail!("Chat API returned status {}: {}", status, preview(&body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).with_context(|| {
            format!("Malformed chat API response: {}", preview(&body))
        })?;

        info!(
            status = %status,
            response_len = parsed.response.chars().count(),
            "step: chat API response"
        );
        Ok(parsed)
    }
}
