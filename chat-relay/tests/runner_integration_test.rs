//! Integration tests for the relay pipeline: HandlerChain::run driving a scripted session, the chain from
//! `build_handler_chain`, and a real HttpChatClient talking to a mockito chat server.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chat_client::{ChatClient, HttpChatClient};
use chat_relay::{build_handler_chain, RelaySettings};
use mockito::Matcher;
use relay_core::{
    EventSender, InboundMessage, LifecycleEvent, RelayError, Result as RelayResult, Session,
    SessionEvent,
};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per test process; output goes to the test console.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,chat_relay=debug,relay_core=debug"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

/// Emits scripted events, then ends; records every send.
struct ScriptedSession {
    events: Vec<SessionEvent>,
    sent: Mutex<Vec<(String, String)>>,
}

impl ScriptedSession {
    fn new(events: Vec<SessionEvent>) -> Self {
        Self {
            events,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent_to(&self, target: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn start(&self, events: EventSender) -> RelayResult<()> {
        for event in &self.events {
            events
                .send(event.clone())
                .map_err(|e| RelayError::Session(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_message(&self, target_id: &str, text: &str) -> RelayResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((target_id.to_string(), text.to_string()));
        Ok(())
    }
}

fn fast_settings() -> RelaySettings {
    RelaySettings {
        chunk_delay_ms: 10,
        ..RelaySettings::default()
    }
}

/// **Test: lifecycle events flow through, direct messages from two users each get their own reply,
/// and a group message is ignored.**
#[tokio::test]
async fn test_relay_end_to_end_with_http_chat_api() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock_ana = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(serde_json::json!({
            "session_id": "5511999999999",
            "message": "hello"
        })))
        .with_status(200)
        .with_body(format!(r#"{{"response": "{}"}}"#, "A".repeat(5000)))
        .expect(1)
        .create_async()
        .await;
    let mock_bruno = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(serde_json::json!({
            "session_id": "5521988887777",
            "message": "Itália"
        })))
        .with_status(200)
        .with_body(r#"{"response": "Ótima escolha!"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut group = InboundMessage::direct("3", "120363041234@g.us", "hello group");
    group.is_group = true;
    let session = Arc::new(ScriptedSession::new(vec![
        SessionEvent::Lifecycle(LifecycleEvent::Authenticated),
        SessionEvent::Lifecycle(LifecycleEvent::Ready),
        SessionEvent::Message(InboundMessage::direct("1", "5511999999999@c.us", "hello")),
        SessionEvent::Message(InboundMessage::direct("2", "5521988887777@c.us", "Itália")),
        SessionEvent::Message(group),
        SessionEvent::Lifecycle(LifecycleEvent::Disconnected("NAVIGATION".to_string())),
    ]));

    let chat_client: Arc<dyn ChatClient> = Arc::new(HttpChatClient::new(&server.url()).unwrap());
    let chain = build_handler_chain(&fast_settings(), session.clone(), chat_client);
    assert_eq!(chain.len(), 2);

    chain.run(session.clone()).await.unwrap();

    let ana = session.sent_to("5511999999999@c.us");
    assert_eq!(ana.len(), 2);
    assert_eq!(ana[0].len(), 4096);
    assert_eq!(ana[1].len(), 904);
    assert_eq!(session.sent_to("5521988887777@c.us"), vec!["Ótima escolha!".to_string()]);
    assert!(session.sent_to("120363041234@g.us").is_empty());

    mock_ana.assert_async().await;
    mock_bruno.assert_async().await;
}

/// **Test: a failing chat API yields one apology per message and the run still completes.**
#[tokio::test]
async fn test_relay_chat_api_down_sends_apology() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(503)
        .with_body("unavailable")
        .expect(2)
        .create_async()
        .await;

    let session = Arc::new(ScriptedSession::new(vec![
        SessionEvent::Message(InboundMessage::direct("1", "5511999999999@c.us", "a")),
        SessionEvent::Message(InboundMessage::direct("2", "5511999999999@c.us", "b")),
    ]));
    let settings = fast_settings();
    let chat_client: Arc<dyn ChatClient> = Arc::new(HttpChatClient::new(&server.url()).unwrap());
    let chain = build_handler_chain(&settings, session.clone(), chat_client);

    chain.run(session.clone()).await.unwrap();

    assert_eq!(
        session.sent_to("5511999999999@c.us"),
        vec![settings.error_message.clone(), settings.error_message.clone()]
    );
}
