//! Remote chat API configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Base URL used when `CHAT_API_URL` is not set (the chatbot server on its default local port).
pub const DEFAULT_CHAT_API_URL: &str = "http://localhost:3000";
/// Request timeout used when `CHAT_API_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Remote chat API configuration interface.
pub trait ChatApiConfig: Send + Sync {
    /// Base URL; the client posts to `<base_url>/chat`.
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// Chat API config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvChatApiConfig {
    pub chat_api_url: String,
    pub chat_api_timeout_secs: u64,
}

impl ChatApiConfig for EnvChatApiConfig {
    fn base_url(&self) -> &str {
        &self.chat_api_url
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.chat_api_timeout_secs)
    }
}

impl EnvChatApiConfig {
    /// Load from environment variables: CHAT_API_URL, CHAT_API_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        let chat_api_url =
            env::var("CHAT_API_URL").unwrap_or_else(|_| DEFAULT_CHAT_API_URL.to_string());
        let chat_api_timeout_secs = match env::var("CHAT_API_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("CHAT_API_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            chat_api_url,
            chat_api_timeout_secs,
        })
    }

    /// Check that the base URL parses and the timeout is non-zero.
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.chat_api_url).is_err() {
            anyhow::bail!("CHAT_API_URL is not a valid URL: {}", self.chat_api_url);
        }
        if self.chat_api_timeout_secs == 0 {
            anyhow::bail!("CHAT_API_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}
