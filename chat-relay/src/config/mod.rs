//! Relay configuration: BaseConfig (session + logging) + chat API config + RelaySettings (chunking, pacing, error text).

mod base;
mod relay;
mod relay_config;


pub use base::{BaseConfig, SessionKind};
pub use relay::{RelaySettings, DEFAULT_CHUNK_DELAY_MS, DEFAULT_ERROR_MESSAGE};
pub use relay_config::RelayConfig;
