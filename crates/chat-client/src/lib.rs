//! # Remote chat API client
//!
//! Defines the [`ChatClient`] trait, the request/response bodies of the `/chat` endpoint, and an HTTP
//! implementation. Transport-agnostic; used by the relay handler in chat-relay.
//!
//! [`ChatClient`] goes through async-trait so handlers can hold `Arc<dyn ChatClient>` and tests can swap it.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod config;
mod http;

pub use config::{ChatApiConfig, EnvChatApiConfig, DEFAULT_CHAT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use http::HttpChatClient;

/// Body of `POST /chat`: `{"session_id": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation key on the remote side; one per end user.
    pub session_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
        }
    }
}

/// Reply from `POST /chat`. Only `response` is read; other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Remote chat API: one request in, one full reply out.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends `request` once and returns the reply. Network errors, non-2xx statuses and bodies without a
    /// string `response` field are all errors; nothing is retried.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_format() {
        let request = ChatRequest::new("5511999999999", "hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "session_id": "5511999999999", "message": "hello" })
        );
    }

    #[test]
    fn test_chat_response_ignores_extra_fields() {
        let body = r#"{"response": "hi there", "state": "AGUARDANDO_DESTINO"}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.response, "hi there");
    }

    #[test]
    fn test_chat_response_requires_response_field() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"reply": "x"}"#).is_err());
        assert!(serde_json::from_str::<ChatResponse>(r#"{"response": 5}"#).is_err());
    }
}
