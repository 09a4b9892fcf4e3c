use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Cache database used when `--db` is not given
    pub database_path: Option<PathBuf>,
    /// JSON feed file used by `refresh`; the built-in sample feed when unset
    pub feed_path: Option<PathBuf>,
    /// JSON user directory read by `users`
    pub users_path: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Show the favorites counter even when there are none
    pub show_zero_favorites: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            feed_path: None,
            users_path: None,
            log_filter: "warn".to_string(),
            show_zero_favorites: false,
        }
    }
}

pub const DEFAULT_DATABASE_PATH: &str = "newsdesk.db";

/// `--db`, then `database_path` from the config, then [`DEFAULT_DATABASE_PATH`]
pub fn resolve_database_path(cli_db: Option<&Path>, config: &Config) -> PathBuf {
    cli_db
        .map(Path::to_path_buf)
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
}

/// `config.toml` in the same directory as the database
pub fn default_config_path(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Load the config file, writing the defaults first if it does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).context("Failed to serialize default config")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}
