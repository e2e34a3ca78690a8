#![warn(clippy::pedantic)]

use anyhow::Context as _;
use cogbot::{cogs::database, config::Config, error::is_login_failure};
use poise::serenity_prelude::GatewayIntents;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::metadata::LevelFilter::INFO.into())
                .from_env_lossy()
                .add_directive("cogbot=debug".parse()?)
                .add_directive("serenity::gateway::shard=warn".parse()?),
        )
        .finish()
        .with(tracing_error::ErrorLayer::default())
        .init();

    let token = std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;

    let config = Config::load().context("Loading config")?;

    let db = database::connect(&database::url_from_env())
        .await
        .context("Opening database")?;

    let framework = cogbot::framework(config, db);

    let mut client = serenity::client::ClientBuilder::new(&token, GatewayIntents::all())
        .framework(framework)
        .await
        .context("Creating client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!(?error, "error waiting for shutdown signal");
            return;
        }
        info!("shutdown signal received");
        shard_manager.shutdown_all().await;
    });

    if let Err(error) = client.start().await {
        if is_login_failure(&error) {
            error!("login failed, check the Discord token");
        }
        return Err(error).context("Running client");
    }

    Ok(())
}
