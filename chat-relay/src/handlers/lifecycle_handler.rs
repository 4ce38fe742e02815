//! Logs session lifecycle events. Recovery (re-pairing, reconnecting) is left to the session.

use async_trait::async_trait;
use relay_core::{Handler, LifecycleEvent, Result};
use tracing::{error, info, warn};

/// Writes every lifecycle event to the log; never touches messages.
#[derive(Clone, Default)]
pub struct LifecycleLogger;

impl LifecycleLogger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LifecycleLogger {
    async fn on_lifecycle(&self, event: &LifecycleEvent) -> Result<()> {
        match event {
            LifecycleEvent::Qr(challenge) => {
                info!(challenge = %challenge, "Pairing challenge received; confirm it on the device");
            }
            LifecycleEvent::Authenticated => info!("Session authenticated"),
            LifecycleEvent::Ready => info!("Session ready, relaying messages"),
            LifecycleEvent::AuthFailure(message) => {
                error!(message = %message, "Session authentication failed");
            }
            LifecycleEvent::Disconnected(reason) => {
                warn!(reason = %reason, "Session disconnected");
            }
        }
        Ok(())
    }
}
