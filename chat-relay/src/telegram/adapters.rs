//! Converts teloxide messages into [`InboundMessage`]s and sender ids back into chat ids.

use relay_core::{InboundMessage, RelayError, Result};
use teloxide::types::{ChatId, UserId};

use crate::handlers::session_id_from_sender;

/// Network suffix appended to Telegram chat ids to form sender ids (`<chat_id>@telegram`).
pub const TELEGRAM_SUFFIX: &str = "telegram";

/// Telegram message to inbound message converter.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Text messages only; `bot_id` marks the bot's own messages as `from_self`.
    pub fn to_inbound(&self, bot_id: UserId) -> Option<InboundMessage> {
        let text = self.0.text()?;
        Some(InboundMessage {
            id: self.0.id.to_string(),
            sender_id: format!("{}@{}", self.0.chat.id.0, TELEGRAM_SUFFIX),
            body: text.to_string(),
            from_self: self.0.from.as_ref().is_some_and(|u| u.id == bot_id),
            is_group: !self.0.chat.is_private(),
            received_at: self.0.date,
        })
    }
}

/// Parses a sender id (with or without the network suffix) into a Telegram chat id.
pub(crate) fn chat_id_from_target(target_id: &str) -> Result<ChatId> {
    session_id_from_sender(target_id)
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| RelayError::Session(format!("Invalid Telegram target: {}", target_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_ID: UserId = UserId(999);

    fn message_from_json(value: serde_json::Value) -> teloxide::types::Message {
        serde_json::from_value(value).expect("valid telegram message json")
    }

    fn private_text_message(from_id: u64, text: &str) -> teloxide::types::Message {
        message_from_json(serde_json::json!({
            "message_id": 7,
            "date": 1706529600,
            "chat": {"id": 123, "type": "private", "first_name": "Ana"},
            "from": {"id": from_id, "is_bot": false, "first_name": "Ana"},
            "text": text
        }))
    }

    #[test]
    fn test_private_text_message_to_inbound() {
        let msg = private_text_message(123, "olá");
        let inbound = TelegramMessageWrapper(&msg).to_inbound(BOT_ID).unwrap();

        assert_eq!(inbound.id, "7");
        assert_eq!(inbound.sender_id, "123@telegram");
        assert_eq!(inbound.body, "olá");
        assert!(!inbound.from_self);
        assert!(!inbound.is_group);
        assert_eq!(inbound.received_at.timestamp(), 1706529600);
    }

    #[test]
    fn test_group_message_is_marked_group() {
        let msg = message_from_json(serde_json::json!({
            "message_id": 8,
            "date": 1706529600,
            "chat": {"id": -100200, "type": "group", "title": "Viagem"},
            "from": {"id": 123, "is_bot": false, "first_name": "Ana"},
            "text": "oi grupo"
        }));
        let inbound = TelegramMessageWrapper(&msg).to_inbound(BOT_ID).unwrap();

        assert!(inbound.is_group);
        assert_eq!(inbound.sender_id, "-100200@telegram");
    }

    #[test]
    fn test_own_message_is_marked_from_self() {
        let msg = private_text_message(999, "echo");
        let inbound = TelegramMessageWrapper(&msg).to_inbound(BOT_ID).unwrap();
        assert!(inbound.from_self);
    }

    #[test]
    fn test_chat_id_from_target() {
        assert_eq!(chat_id_from_target("123@telegram").unwrap(), ChatId(123));
        assert_eq!(chat_id_from_target("-100200").unwrap(), ChatId(-100200));
        assert!(chat_id_from_target("5511999999999@c.us").is_ok());
        assert!(chat_id_from_target("console@local").is_err());
    }
}
