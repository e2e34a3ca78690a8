pub mod database;
pub mod general;

use poise::BoxFuture;
use tracing::{info, warn};

use crate::{config::Config, error::Error, Data};

type CommandSource = fn() -> Vec<poise::Command<Data, Error>>;
type SetupHook = for<'a> fn(&'a Data) -> BoxFuture<'a, crate::error::Result<()>>;

/// A named bundle of commands with an optional startup hook.
pub struct Cog {
    pub name: &'static str,
    commands: CommandSource,
    setup: Option<SetupHook>,
}

/// Every built-in cog, in load order.
pub fn all() -> Vec<Cog> {
    vec![general::cog(), database::cog()]
}

/// Gather the commands of every enabled cog, logging each load.
pub fn collect_commands(config: &Config) -> Vec<poise::Command<Data, Error>> {
    let mut commands = Vec::new();

    for cog in all() {
        if !config.cog_enabled(cog.name) {
            info!(cog = cog.name, "skipped disabled cog");
            continue;
        }

        let mut cog_commands = (cog.commands)();
        info!(cog = cog.name, commands = cog_commands.len(), "loaded cog");
        commands.append(&mut cog_commands);
    }

    commands
}

/// Run every enabled cog's setup hook. A failing hook is logged and skipped
/// so the remaining cogs still get set up.
pub async fn run_setups(data: &Data) {
    for cog in all() {
        if !data.config.cog_enabled(cog.name) {
            continue;
        }

        let Some(setup) = cog.setup else {
            continue;
        };

        if let Err(error) = setup(data).await {
            warn!(cog = cog.name, ?error, "failed to set up cog");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use serenity::all::GuildId;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    use super::*;

    fn config(disabled: &[&str]) -> Config {
        Config {
            prefix: "!".to_string(),
            disabled_cogs: disabled.iter().map(ToString::to_string).collect(),
        }
    }

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<_> = all().iter().map(|cog| cog.name).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn collects_commands_from_every_enabled_cog() {
        let commands = collect_commands(&config(&[]));
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();

        assert!(names.contains(&"ping"));
        assert!(names.contains(&"uptime"));
        assert!(names.contains(&"prefix"));
    }

    #[test]
    fn disabled_cog_contributes_no_commands() {
        let commands = collect_commands(&config(&["general"]));
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();

        assert!(!names.contains(&"ping"));
        assert!(names.contains(&"prefix"));
    }

    #[test]
    fn unknown_disabled_name_is_ignored() {
        let commands = collect_commands(&config(&["no_such_cog"]));

        assert_eq!(commands.len(), collect_commands(&config(&[])).len());
    }

    #[tokio::test]
    async fn run_setups_initializes_the_database() {
        let db = memory_pool().await;
        let data = Data {
            config: config(&[]),
            db: db.clone(),
            started: Instant::now(),
        };

        run_setups(&data).await;

        // The schema is in place afterwards.
        database::set_guild_prefix(&db, GuildId::new(1), "?")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn run_setups_skips_disabled_cogs() {
        let db = memory_pool().await;
        let data = Data {
            config: config(&["database"]),
            db: db.clone(),
            started: Instant::now(),
        };

        run_setups(&data).await;

        assert!(database::guild_prefix(&db, GuildId::new(1)).await.is_err());
    }
}
