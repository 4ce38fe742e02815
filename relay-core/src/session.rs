//! Session abstraction: connection lifecycle, inbound events, and sending text.
//!
//! [`Session`] is transport-agnostic; chat-relay implements it for Telegram (teloxide) and the console.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::types::SessionEvent;

/// Channel a session pushes its events into.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;

/// Messaging-client capability consumed by the relay. Implementations map to a transport.
#[async_trait]
pub trait Session: Send + Sync {
    /// Connects and emits lifecycle and message events into `events` until the session ends.
    /// Emits `Disconnected` before returning normally.
    async fn start(&self, events: EventSender) -> Result<()>;

    /// Sends a text message to `target_id` (a sender id as found in [`crate::InboundMessage`]).
    async fn send_message(&self, target_id: &str, text: &str) -> Result<()>;
}
