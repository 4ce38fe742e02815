//! Core types: inbound message, lifecycle events, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message received by the session. Read-only to handlers; dropped after handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Transport-specific message id (for logs only).
    pub id: String,
    /// Sender identifier including the network suffix, e.g. `5511999999999@c.us`. Replies go here.
    pub sender_id: String,
    pub body: String,
    /// Sent by the account this session is logged in as.
    pub from_self: bool,
    /// Received in a group conversation rather than a direct chat.
    pub is_group: bool,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Direct message from `sender_id` with the given body, received now.
    pub fn direct(id: impl Into<String>, sender_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender_id: sender_id.into(),
            body: body.into(),
            from_self: false,
            is_group: false,
            received_at: Utc::now(),
        }
    }
}

/// Connection lifecycle reported by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Pairing challenge the operator has to confirm (e.g. QR payload).
    Qr(String),
    Authenticated,
    /// Session could not authenticate; carries the diagnostic message.
    AuthFailure(String),
    Ready,
    /// Connection closed; carries the reason.
    Disconnected(String),
}

/// Everything a session emits while running.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Lifecycle(LifecycleEvent),
    Message(InboundMessage),
}

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Handler declined this message; try next.
    Ignore,
    /// Stop the chain for this message.
    Stop,
}

/// Registered against a [`crate::HandlerChain`]; both callbacks default to no-ops.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Called for every lifecycle event, in registration order.
    async fn on_lifecycle(&self, _event: &LifecycleEvent) -> crate::error::Result<()> {
        Ok(())
    }
    /// Processes one inbound message. Return Stop to end the chain. Default: Continue.
    async fn on_message(&self, _message: &InboundMessage) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}
