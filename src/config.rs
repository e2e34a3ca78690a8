use std::{fs, io::ErrorKind, path::Path};

use serde_derive::Deserialize;
use tracing::info;

/// Optional TOML config, read from `$BOT_CONFIG` or `./bot.toml`.
///
/// ```toml
/// prefix = "?"
/// disabled_cogs = ["general"]
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prefix: String,
    pub disabled_cogs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: "!".to_string(),
            disabled_cogs: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> crate::error::Result<Self> {
        let path = std::env::var("BOT_CONFIG").unwrap_or_else(|_| "bot.toml".to_string());
        Self::load_from(path)
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn cog_enabled(&self, name: &str) -> bool {
        !self.disabled_cogs.iter().any(|disabled| disabled == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            prefix = "?"
            disabled_cogs = ["general"]
            "#,
        )
        .unwrap();

        assert_eq!(config.prefix, "?");
        assert!(!config.cog_enabled("general"));
        assert!(config.cog_enabled("database"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.prefix, "!");
        assert!(config.disabled_cogs.is_empty());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.prefix, "!");
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.toml");
        fs::write(&path, "prefix = \">>\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.prefix, ">>");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.toml");
        fs::write(&path, "prefix = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
