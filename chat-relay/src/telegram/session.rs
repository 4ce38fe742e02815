//! Wraps teloxide::Bot and implements [`Session`]. Production relays over Telegram; tests can point the bot
//! at a mock API server.

use async_trait::async_trait;
use relay_core::{EventSender, LifecycleEvent, RelayError, Result, Session, SessionEvent};
use teloxide::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::adapters::{chat_id_from_target, TelegramMessageWrapper};

/// Telegram Bot API session: `getMe` for authentication, long polling for messages.
#[derive(Clone)]
pub struct TelegramSession {
    bot: teloxide::Bot,
}

impl TelegramSession {
    /// Creates a session for `token`; `api_url` overrides the Bot API server (e.g. a mock in tests).
    pub fn new(token: impl Into<String>, api_url: Option<&str>) -> anyhow::Result<Self> {
        let mut bot = teloxide::Bot::new(token);
        if let Some(url) = api_url {
            bot = bot.set_api_url(reqwest::Url::parse(url)?);
        }
        Ok(Self { bot })
    }
}

fn emit(events: &EventSender, event: LifecycleEvent) {
    if events.send(SessionEvent::Lifecycle(event)).is_err() {
        warn!("Event receiver closed; lifecycle event dropped");
    }
}

#[async_trait]
impl Session for TelegramSession {
    #[instrument(skip(self, events))]
    async fn start(&self, events: EventSender) -> Result<()> {
        let me = match self.bot.get_me().await {
            Ok(me) => me,
            Err(e) => {
                emit(&events, LifecycleEvent::AuthFailure(e.to_string()));
                return Err(RelayError::Session(format!("getMe failed: {}", e)));
            }
        };
        info!(bot_id = me.user.id.0, username = ?me.user.username, "Telegram bot identified");
        emit(&events, LifecycleEvent::Authenticated);
        emit(&events, LifecycleEvent::Ready);

        let bot_id = me.user.id;
        let tx = events.clone();
        teloxide::repl(self.bot.clone(), move |msg: Message| {
            let tx = tx.clone();
            async move {
                match TelegramMessageWrapper(&msg).to_inbound(bot_id) {
                    Some(inbound) => {
                        info!(
                            sender_id = %inbound.sender_id,
                            message_id = %inbound.id,
                            "Received message"
                        );
                        if tx.send(SessionEvent::Message(inbound)).is_err() {
                            warn!("Event receiver closed; message dropped");
                        }
                    }
                    None => debug!(chat_id = msg.chat.id.0, "Received non-text message; skipped"),
                }
                respond(())
            }
        })
        .await;

        emit(&events, LifecycleEvent::Disconnected("polling stopped".to_string()));
        Ok(())
    }

    async fn send_message(&self, target_id: &str, text: &str) -> Result<()> {
        let chat_id = chat_id_from_target(target_id)?;
        self.bot
            .send_message(chat_id, text.to_string())
            .await
            .map_err(|e| RelayError::Session(e.to_string()))?;
        Ok(())
    }
}
