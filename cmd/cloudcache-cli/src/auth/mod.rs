use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cloudcache::Config;
use colored::Colorize;

/// Resolve the config file path, preferring an explicit `--config`.
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Config::default_path().context("Could not determine config file location"),
    }
}

/// Load config from file, apply environment overrides and check required keys.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load(path)?;
    config
        .apply_env()
        .context("Invalid config override in environment")?;
    config.check()?;
    Ok(config)
}

/// Load config from file only, for commands that write it back.
///
/// Environment overrides are left out so they never get persisted.
pub fn load_stored_config(path: &Path) -> Result<Config> {
    Ok(Config::load(path)?)
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    config.save(path)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Whether two configs authenticate as the same user against the same server.
pub fn same_identity(a: &Config, b: &Config) -> bool {
    a.server == b.server && a.port == b.port && a.username == b.username && a.api_key == b.api_key
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Expired,
    Missing,
}

pub fn token_status(config: &Config, now: DateTime<Utc>) -> TokenStatus {
    if config.token_valid_at(now) {
        TokenStatus::Valid
    } else if config.access_token.is_some() {
        TokenStatus::Expired
    } else {
        TokenStatus::Missing
    }
}

/// Tell the user when requests will go out without a usable token.
pub fn warn_if_token_unusable(config: &Config) {
    match token_status(config, Utc::now()) {
        TokenStatus::Valid => {}
        TokenStatus::Expired => {
            tracing::warn!("access token expired");
            eprintln!(
                "{}  Access token expired. Run 'cloudcache login' to refresh it.",
                "⚠️".yellow()
            );
        }
        TokenStatus::Missing => {
            tracing::debug!("no access token, sending API key only");
        }
    }
}
