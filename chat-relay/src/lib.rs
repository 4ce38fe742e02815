//! # Chat relay
//!
//! Bridges a messaging session to a remote chatbot HTTP API: direct messages are forwarded to `/chat`
//! and the reply is sent back to the sender in bounded, paced chunks.
//! Core (Session, Handler, HandlerChain) comes from relay-core; the HTTP client from chat-client.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod console;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use chunk::split_into_chunks;
pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, RelayConfig, RelaySettings, SessionKind};
pub use console::ConsoleSession;
pub use handlers::{session_id_from_sender, LifecycleLogger, RelayHandler};
pub use runner::{ask_once, build_handler_chain, build_session, run_relay};
pub use telegram::{TelegramMessageWrapper, TelegramSession};
