//! Relay settings: reply chunk size, pause between chunks, and the apology text sent on failure.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::chunk::MAX_CHUNK_UNITS;

/// Pause between consecutive chunks of one reply.
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 1000;
/// Sent to the user when the remote call or a chunk send fails.
pub const DEFAULT_ERROR_MESSAGE: &str =
    "❌ Ocorreu um erro ao processar sua mensagem. Tente novamente.";

#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// RELAY_CHUNK_SIZE, in UTF-16 code units
    pub chunk_size: usize,
    /// RELAY_CHUNK_DELAY_MS
    pub chunk_delay_ms: u64,
    /// RELAY_ERROR_MESSAGE
    pub error_message: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            chunk_size: MAX_CHUNK_UNITS,
            chunk_delay_ms: DEFAULT_CHUNK_DELAY_MS,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

impl RelaySettings {
    /// Load from environment variables; unset values keep their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let chunk_size = parse_env("RELAY_CHUNK_SIZE")?.unwrap_or(defaults.chunk_size);
        let chunk_delay_ms = parse_env("RELAY_CHUNK_DELAY_MS")?.unwrap_or(defaults.chunk_delay_ms);
        let error_message = env::var("RELAY_ERROR_MESSAGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.error_message);
        Ok(Self {
            chunk_size,
            chunk_delay_ms,
            error_message,
        })
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Chunk size must be 1..=4096 so every chunk fits one message.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_UNITS {
            anyhow::bail!(
                "RELAY_CHUNK_SIZE must be between 1 and {}, got {}",
                MAX_CHUNK_UNITS,
                self.chunk_size
            );
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(s) => s
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} is not a valid number: {}", key, s)),
        Err(_) => Ok(None),
    }
}
