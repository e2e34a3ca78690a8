#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod cogs;
mod commands;
pub mod config;
pub mod error;

use std::time::Instant;

use poise::serenity_prelude::Ready;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::{config::Config, error::Error};

pub struct Data {
    pub config: Config,
    pub db: SqlitePool,
    pub started: Instant,
}

pub type PoiseContext<'a> = poise::Context<'a, Data, Error>;
pub type PoiseFrameworkError<'a> = poise::FrameworkError<'a, Data, Error>;

fn commands(config: &Config) -> Vec<poise::Command<Data, Error>> {
    let mut commands = cogs::collect_commands(config);
    commands.push(commands::reload::reload());
    commands
}

/// Publish global slash-command metadata, returning the platform's view of
/// what is now registered.
pub async fn sync_commands(
    http: &serenity::http::Http,
    commands: &[poise::Command<Data, Error>],
) -> crate::error::Result<Vec<serenity::all::Command>> {
    let builders = poise::builtins::create_application_commands(commands);
    let synced = serenity::all::Command::set_global_commands(http, builders).await?;

    let names: Vec<_> = synced.iter().map(|command| command.name.as_str()).collect();
    info!(?names, "registered commands");

    Ok(synced)
}

#[tracing::instrument(skip_all)]
async fn setup(
    serenity_context: &serenity::client::Context,
    ready: &Ready,
    framework: &poise::Framework<Data, Error>,
    config: Config,
    db: SqlitePool,
) -> crate::error::Result<Data> {
    info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected");

    let data = Data {
        config,
        db,
        started: Instant::now(),
    };

    // Neither a failed sync nor a failed cog setup should take the bot down.
    match sync_commands(&serenity_context.http, &framework.options().commands).await {
        Ok(synced) => info!(commands = synced.len(), "synced commands"),
        Err(error) => error!(?error, "error syncing commands"),
    }

    cogs::run_setups(&data).await;

    Ok(data)
}

async fn dynamic_prefix(
    ctx: poise::PartialContext<'_, Data, Error>,
) -> crate::error::Result<Option<String>> {
    let Some(guild_id) = ctx.guild_id else {
        return Ok(Some(ctx.data.config.prefix.clone()));
    };

    let prefix = match cogs::database::guild_prefix(&ctx.data.db, guild_id).await? {
        Some(prefix) => prefix,
        None => ctx.data.config.prefix.clone(),
    };

    Ok(Some(prefix))
}

async fn on_error(error: PoiseFrameworkError<'_>) {
    match &error {
        poise::FrameworkError::Setup { error, .. } => error!(?error, "setup error"),
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, ?error, "command error");
        }
        poise::FrameworkError::CommandPanic { payload, .. } => {
            error!(?payload, "command panicked");
        }
        _ => {}
    }

    if let Err(error) = poise::builtins::on_error(error).await {
        error!(?error, "error while handling error");
    }
}

pub fn framework(config: Config, db: SqlitePool) -> poise::Framework<Data, Error> {
    let commands = commands(&config);
    let prefix = config.prefix.clone();

    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                dynamic_prefix: Some(|ctx| Box::pin(dynamic_prefix(ctx))),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|serenity_context, ready, framework| {
            Box::pin(setup(serenity_context, ready, framework, config, db))
        })
        .build()
}
