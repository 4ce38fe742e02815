//! Handler implementations: the relay itself and lifecycle logging.

mod lifecycle_handler;
mod relay_handler;

pub use lifecycle_handler::LifecycleLogger;
pub use relay_handler::{session_id_from_sender, RelayHandler};
