use std::time::Duration;

use crate::{error::Result, PoiseContext};

pub fn cog() -> super::Cog {
    super::Cog {
        name: "general",
        commands: || vec![ping(), uptime()],
        setup: None,
    }
}

/// Check that the bot is alive
#[poise::command(slash_command, prefix_command)]
#[tracing::instrument(skip(ctx))]
pub async fn ping(ctx: PoiseContext<'_>) -> Result<()> {
    ctx.say("Pong!").await?;
    Ok(())
}

/// Show how long the bot has been running
#[poise::command(slash_command, prefix_command)]
#[tracing::instrument(skip(ctx))]
pub async fn uptime(ctx: PoiseContext<'_>) -> Result<()> {
    // Truncate to whole seconds, humantime spells out the nanos otherwise.
    let elapsed = Duration::from_secs(ctx.data().started.elapsed().as_secs());
    ctx.say(format!("Up for {}", humantime::format_duration(elapsed)))
        .await?;
    Ok(())
}
