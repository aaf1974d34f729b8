pub mod activation;
pub mod announcement;
pub mod commands;
pub mod configuration;
pub mod discord;
pub mod error;
mod event_handler;
pub mod platform;
#[cfg(test)]
mod testing;
pub mod utils;

use std::sync::Arc;

use anyhow::Context as AnyhowContext;
use configuration::Configuration;
use event_handler::Handler;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = dotenv::dotenv() {
        eprintln!("No .env file loaded: {}", err);
    }
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to start the logger")?;

    let config = Arc::new(Configuration::from_env().context("Invalid configuration")?);
    info!("Loaded {:?}", config);

    // Slash commands arrive as interactions, which need no privileged intents.
    let mut client = Client::builder(&config.token, GatewayIntents::GUILDS)
        .event_handler(Handler::new(config.clone()))
        .await
        .context("Error creating client")?;

    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Could not register ctrl+c handler: {}", err);
            return;
        }
        info!("Shutting down");
        shard_manager.shutdown_all().await;
    });

    client.start().await.context("Client error")?;
    Ok(())
}
