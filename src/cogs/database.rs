use std::str::FromStr;

use anyhow::Context as _;
use serenity::all::GuildId;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::{error::Result, PoiseContext};

const DEFAULT_URL: &str = "sqlite:bot.db";

const SCHEMA: &[&str] = &["create table if not exists guild_settings (
        guild_id integer primary key,
        prefix text
    )"];

pub fn cog() -> super::Cog {
    super::Cog {
        name: "database",
        commands: || vec![prefix()],
        setup: Some(|data| Box::pin(init_db(&data.db))),
    }
}

pub fn url_from_env() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string())
}

#[tracing::instrument]
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Apply the schema. Every statement is `create ... if not exists`, so
/// re-running (including via `/reload`) never touches existing data.
#[tracing::instrument(skip(db))]
pub async fn init_db(db: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(db).await?;
    }

    info!("database initialized");
    Ok(())
}

#[allow(clippy::cast_possible_wrap)]
#[tracing::instrument(skip(db))]
pub async fn guild_prefix<'db, DB: sqlx::SqliteExecutor<'db>>(
    db: DB,
    guild_id: GuildId,
) -> Result<Option<String>> {
    let row: Option<Option<String>> =
        sqlx::query_scalar("select prefix from guild_settings where guild_id = ?")
            .bind(guild_id.get() as i64)
            .fetch_optional(db)
            .await?;

    Ok(row.flatten())
}

#[allow(clippy::cast_possible_wrap)]
#[tracing::instrument(skip(db))]
pub async fn set_guild_prefix<'db, DB: sqlx::SqliteExecutor<'db>>(
    db: DB,
    guild_id: GuildId,
    prefix: &str,
) -> Result<()> {
    sqlx::query(
        "insert into guild_settings (guild_id, prefix) values (?, ?)
         on conflict (guild_id) do update set prefix = excluded.prefix",
    )
    .bind(guild_id.get() as i64)
    .bind(prefix)
    .execute(db)
    .await?;

    Ok(())
}

/// Show or change the command prefix for this guild
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
#[tracing::instrument(skip(ctx))]
pub async fn prefix(
    ctx: PoiseContext<'_>,
    #[description = "New prefix; omit to show the current one"] new_prefix: Option<String>,
) -> Result<()> {
    let guild_id = ctx.guild_id().context("prefix command outside a guild")?;

    match new_prefix {
        Some(new_prefix) => {
            set_guild_prefix(&ctx.data().db, guild_id, &new_prefix).await?;
            ctx.say(format!("Prefix set to `{new_prefix}`")).await?;
        }
        None => {
            let current = guild_prefix(&ctx.data().db, guild_id)
                .await?
                .unwrap_or_else(|| ctx.data().config.prefix.clone());
            ctx.say(format!("Current prefix is `{current}`")).await?;
        }
    }

    Ok(())
}
