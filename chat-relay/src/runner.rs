use anyhow::{Context, Result};
use chat_client::{ChatClient, ChatRequest, EnvChatApiConfig, HttpChatClient};
use relay_core::{init_tracing, HandlerChain, Session};
use std::sync::Arc;
use tracing::info;

use crate::config::{RelayConfig, RelaySettings, SessionKind};
use crate::console::ConsoleSession;
use crate::handlers::{LifecycleLogger, RelayHandler};
use crate::telegram::TelegramSession;

/// Builds the session selected by `config` (Telegram needs the bot token).
pub fn build_session(config: &RelayConfig) -> Result<Arc<dyn Session>> {
    match config.session_kind() {
        SessionKind::Telegram => {
            let token = config
                .bot_token()
                .context("BOT_TOKEN not set (required for the telegram session)")?;
            let session = TelegramSession::new(token, config.telegram_api_url())?;
            Ok(Arc::new(session))
        }
        SessionKind::Console => Ok(Arc::new(ConsoleSession::stdio())),
    }
}

/// Handler chain: lifecycle logging first, relay last.
pub fn build_handler_chain(
    settings: &RelaySettings,
    session: Arc<dyn Session>,
    chat_client: Arc<dyn ChatClient>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LifecycleLogger::new()))
        .add_handler(Arc::new(RelayHandler::with_settings(
            session,
            chat_client,
            settings,
        )))
}

/// Main entry: validate config, init logging, build client, session and chain, then relay until the session ends.
pub async fn run_relay(config: RelayConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        session_kind = %config.session_kind(),
        chat_api_url = %config.chat_api_url(),
        chunk_size = config.relay.chunk_size,
        chunk_delay_ms = config.relay.chunk_delay_ms,
        "Initializing relay"
    );

    let chat_client: Arc<dyn ChatClient> = Arc::new(HttpChatClient::from_config(&config.chat_api)?);
    let session = build_session(&config)?;
    let chain = build_handler_chain(&config.relay, session.clone(), chat_client);

    info!("Relay started");
    chain.run(session).await?;
    info!("Relay stopped");

    Ok(())
}

/// Sends one message to the chat API and returns the reply text.
pub async fn ask_once(config: &EnvChatApiConfig, session_id: &str, message: &str) -> Result<String> {
    config.validate()?;
    let client = HttpChatClient::from_config(config)?;
    let reply = client.chat(&ChatRequest::new(session_id, message)).await?;
    Ok(reply.response)
}
