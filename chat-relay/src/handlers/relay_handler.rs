//! Relay handler: forwards a direct message to the remote chat API and sends the reply back in paced chunks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chat_client::{ChatClient, ChatRequest};
use relay_core::{Handler, HandlerResponse, InboundMessage, RelayError, Result, Session};
use tracing::{debug, error, info, instrument, warn};

use crate::chunk::split_into_chunks;
use crate::config::RelaySettings;

/// Strips the network suffix from a sender id (`5511999999999@c.us` → `5511999999999`).
/// Ids without `@` are returned unchanged.
pub fn session_id_from_sender(sender_id: &str) -> &str {
    sender_id
        .split_once('@')
        .map(|(user, _)| user)
        .unwrap_or(sender_id)
}

/// Terminal handler: one remote call per eligible message, reply chunked and paced through the session.
///
/// Any failure (remote call or a chunk send) stops the remaining chunks and sends the fixed apology text
/// once. Group messages and the account's own messages are ignored.
#[derive(Clone)]
pub struct RelayHandler {
    session: Arc<dyn Session>,
    chat_client: Arc<dyn ChatClient>,
    chunk_size: usize,
    chunk_delay: Duration,
    error_message: String,
}

impl RelayHandler {
    /// Relays through `session` using `chat_client`, with default settings.
    pub fn new(session: Arc<dyn Session>, chat_client: Arc<dyn ChatClient>) -> Self {
        Self::with_settings(session, chat_client, &RelaySettings::default())
    }

    pub fn with_settings(
        session: Arc<dyn Session>,
        chat_client: Arc<dyn ChatClient>,
        settings: &RelaySettings,
    ) -> Self {
        Self {
            session,
            chat_client,
            chunk_size: settings.chunk_size,
            chunk_delay: settings.chunk_delay(),
            error_message: settings.error_message.clone(),
        }
    }

    /// Only direct messages from other users are relayed.
    pub fn is_eligible(message: &InboundMessage) -> bool {
        !message.from_self && !message.is_group
    }

    /// Remote call, then chunked sends. Returns the number of chunks sent.
    async fn relay(&self, message: &InboundMessage) -> Result<usize> {
        let session_id = session_id_from_sender(&message.sender_id);
        let request = ChatRequest::new(session_id, message.body.clone());

        let reply = self
            .chat_client
            .chat(&request)
            .await
            .map_err(|e| RelayError::ChatApi(format!("{:#}", e)))?;

        let chunks = split_into_chunks(&reply.response, self.chunk_size);
        if chunks.is_empty() {
            warn!(session_id = %session_id, "Chat API returned an empty response; nothing sent");
            return Ok(0);
        }

        let chunk_count = chunks.len();
        for (chunk_index, chunk) in chunks.into_iter().enumerate() {
            if chunk_index > 0 {
                tokio::time::sleep(self.chunk_delay).await;
            }
            self.session.send_message(&message.sender_id, chunk).await?;
            debug!(
                session_id = %session_id,
                chunk_index,
                chunk_count,
                chunk_units = chunk.encode_utf16().count(),
                "step: chunk sent"
            );
        }
        Ok(chunk_count)
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message), fields(sender_id = %message.sender_id, message_id = %message.id))]
    async fn on_message(&self, message: &InboundMessage) -> Result<HandlerResponse> {
        if !Self::is_eligible(message) {
            debug!(
                from_self = message.from_self,
                is_group = message.is_group,
                "step: message ignored"
            );
            return Ok(HandlerResponse::Ignore);
        }

        info!(body_len = message.body.chars().count(), "step: relaying message");

        match self.relay(message).await {
            Ok(chunk_count) => {
                let elapsed_ms = (chrono::Utc::now() - message.received_at).num_milliseconds();
                info!(chunk_count, elapsed_ms, "step: reply delivered");
            }
            Err(e) => {
                error!(error = %e, "Failed to relay message; notifying sender");
                if let Err(notify_err) = self
                    .session
                    .send_message(&message.sender_id, &self.error_message)
                    .await
                {
                    error!(error = %notify_err, "Failed to send error notification");
                }
            }
        }

        Ok(HandlerResponse::Stop)
    }
}
