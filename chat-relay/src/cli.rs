//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{RelayConfig, SessionKind};

#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(about = "Relays chat messages to a remote chatbot API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Use the stdin/stdout chat simulator instead of Telegram.
        #[arg(long)]
        console: bool,
    },
    /// Send one message to the chat API and print the reply.
    Ask {
        message: String,
        #[arg(short, long, default_value = "teste_console")]
        session_id: String,
    },
}

/// Load RelayConfig from environment. `token` overrides BOT_TOKEN; `console` forces the console session.
pub fn load_config(token: Option<String>, console: bool) -> Result<RelayConfig> {
    let mut config = RelayConfig::load(token)?;
    if console {
        config.base.session_kind = SessionKind::Console;
    }
    Ok(config)
}
