//! Telegram session: teloxide long polling behind the [`relay_core::Session`] capability.

mod adapters;
mod session;

pub use adapters::{TelegramMessageWrapper, TELEGRAM_SUFFIX};
pub use session::TelegramSession;
