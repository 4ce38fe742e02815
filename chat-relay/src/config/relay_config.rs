//! RelayConfig: BaseConfig + chat API config + RelaySettings. Use load() for env-based loading.

use anyhow::Result;
use chat_client::{ChatApiConfig, EnvChatApiConfig};

use super::{BaseConfig, RelaySettings, SessionKind};

/// Full relay config. Use RelayConfig::load() then validate() before starting.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub base: BaseConfig,
    pub chat_api: EnvChatApiConfig,
    pub relay: RelaySettings,
}

impl RelayConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let chat_api = EnvChatApiConfig::from_env()?;
        let relay = RelaySettings::from_env()?;
        Ok(Self {
            base,
            chat_api,
            relay,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.chat_api.validate()?;
        self.relay.validate()
    }

    pub fn session_kind(&self) -> SessionKind {
        self.base.session_kind
    }
    pub fn bot_token(&self) -> Option<&str> {
        self.base.bot_token.as_deref()
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn chat_api_url(&self) -> &str {
        self.chat_api.base_url()
    }
}
