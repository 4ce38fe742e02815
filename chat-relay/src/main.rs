//! Binary for the chat relay.

use anyhow::Result;
use chat_client::EnvChatApiConfig;
use chat_relay::{ask_once, load_config, run_relay, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, console } => {
            let config = load_config(token, console)?;
            run_relay(config).await
        }
        Commands::Ask {
            message,
            session_id,
        } => {
            let config = EnvChatApiConfig::from_env()?;
            let reply = ask_once(&config, &session_id, &message).await?;
            println!("{}", reply);
            Ok(())
        }
    }
}
