//! Base config: which session to run, Telegram connection, logging. Loaded from env.

use anyhow::Result;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Messaging session the relay attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Telegram Bot API via teloxide long polling.
    Telegram,
    /// Local chat simulator on stdin/stdout.
    Console,
}

impl FromStr for SessionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" => Ok(Self::Telegram),
            "console" => Ok(Self::Console),
            other => anyhow::bail!("Unknown SESSION_KIND: {} (expected telegram or console)", other),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telegram => write!(f, "telegram"),
            Self::Console => write!(f, "console"),
        }
    }
}

/// Base config: session selection, Telegram connectivity, log file.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// SESSION_KIND
    pub session_kind: SessionKind,
    /// BOT_TOKEN; required for the Telegram session only
    pub bot_token: Option<String>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let session_kind = match env::var("SESSION_KIND") {
            Ok(s) => s.parse()?,
            Err(_) => SessionKind::Telegram,
        };
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .filter(|t| !t.trim().is_empty());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/chat-relay.log".to_string());

        Ok(Self {
            session_kind,
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Validate config: Telegram needs a token; telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if self.session_kind == SessionKind::Telegram && self.bot_token.is_none() {
            anyhow::bail!("BOT_TOKEN not set (required for the telegram session)");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
