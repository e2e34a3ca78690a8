use tracing::info;

use crate::{cogs, error::Result, sync_commands, PoiseContext};

/// Reload cogs and resync commands
#[poise::command(slash_command, owners_only)]
#[tracing::instrument(skip(ctx))]
pub async fn reload(ctx: PoiseContext<'_>) -> Result<()> {
    cogs::run_setups(ctx.data()).await;

    let synced = sync_commands(
        &ctx.serenity_context().http,
        &ctx.framework().options().commands,
    )
    .await?;
    info!(commands = synced.len(), "resynced commands");

    ctx.say("Reloaded cogs").await?;
    Ok(())
}
