//! # Handler chain
//!
//! Dispatches session events to registered handlers. Lifecycle events go to every handler in order;
//! messages run through handlers until one returns Stop. [`HandlerChain::run`] drives a [`Session`],
//! handling each inbound message in its own task.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{RelayError, Result};
use crate::session::Session;
use crate::types::{Handler, HandlerResponse, InboundMessage, LifecycleEvent, SessionEvent};

/// Ordered list of handlers. Cheap to clone; each message task holds its own copy.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler (runs in registration order).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every handler's `on_lifecycle`. A failing handler is logged and the rest still run.
    pub async fn handle_lifecycle(&self, event: &LifecycleEvent) {
        for handler in &self.handlers {
            if let Err(e) = handler.on_lifecycle(event).await {
                let handler_name = std::any::type_name_of_val(handler.as_ref());
                error!(error = %e, handler = %handler_name, event = ?event, "Lifecycle handler failed");
            }
        }
    }

    /// Runs handlers in order until one returns Stop. Returns Stop or, if no handler stopped, Continue.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn handle_message(&self, message: &InboundMessage) -> Result<HandlerResponse> {
        info!(sender_id = %message.sender_id, "step: handler_chain started");

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.on_message(message).await?;
            debug!(handler = %handler_name, response = ?response, "Handler processed");

            if response == HandlerResponse::Stop {
                info!(
                    sender_id = %message.sender_id,
                    handler = %handler_name,
                    "step: handler chain stopped by handler"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        info!(sender_id = %message.sender_id, "step: handler_chain finished");
        Ok(HandlerResponse::Continue)
    }

    /// Starts `session` and dispatches its events until the session ends.
    ///
    /// Lifecycle events are handled inline, in arrival order. Each message is handled in its own task so a
    /// slow remote call or send never blocks other senders. Once the event stream closes, waits for the
    /// in-flight message tasks, then returns the session's own result.
    pub async fn run(&self, session: Arc<dyn Session>) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let driver = {
            let session = session.clone();
            tokio::spawn(async move { session.start(tx).await })
        };

        let mut in_flight = JoinSet::new();
        while let Some(event) = rx.recv().await {
            match event {
                SessionEvent::Lifecycle(event) => self.handle_lifecycle(&event).await,
                SessionEvent::Message(message) => {
                    let chain = self.clone();
                    in_flight.spawn(async move {
                        if let Err(e) = chain.handle_message(&message).await {
                            error!(error = %e, sender_id = %message.sender_id, "Handler chain failed");
                        }
                    });
                }
            }
            while let Some(done) = in_flight.try_join_next() {
                log_task_outcome(done);
            }
        }

        if !in_flight.is_empty() {
            info!(pending = in_flight.len(), "Session ended; waiting for in-flight messages");
        }
        while let Some(done) = in_flight.join_next().await {
            log_task_outcome(done);
        }

        driver
            .await
            .map_err(|e| RelayError::Session(format!("session task failed: {}", e)))?
    }
}

fn log_task_outcome(outcome: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = outcome {
        warn!(error = %e, "Message task did not complete");
    }
}
