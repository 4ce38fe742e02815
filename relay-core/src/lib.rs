//! # relay-core
//!
//! Core types and traits for the chat relay: [`Session`], [`Handler`], [`HandlerChain`], inbound message
//! and lifecycle event types, and tracing initialization. Transport-agnostic; used by chat-relay.

pub mod chain;
pub mod error;
pub mod logger;
pub mod session;
pub mod types;

pub use chain::HandlerChain;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use session::{EventSender, Session};
pub use types::{Handler, HandlerResponse, InboundMessage, LifecycleEvent, SessionEvent};
