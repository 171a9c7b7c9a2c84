use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use cloudcache::commands::Login;
use cloudcache::{Config, Invocation};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::client::ApiClient;
use crate::utils::spinner;
use crate::{Output, OutputFormat};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct LoginSummary<'a> {
    user: &'a str,
    expires_at: Option<DateTime<Utc>>,
}

/// Load the file the token will be written to.
///
/// The token must belong to the identity stored there, so environment
/// overrides that change it are refused.
fn stored_for_token(path: &Path, effective: &Config) -> Result<Config> {
    let stored = auth::load_stored_config(path)?;
    if !auth::same_identity(&stored, effective) {
        anyhow::bail!(
            "CLOUDCACHE_* environment overrides differ from the settings in {}; \
             unset them or save them with 'cloudcache config' before logging in",
            path.display()
        );
    }
    Ok(stored)
}

pub async fn handle(path: &Path, output: &Output) -> Result<()> {
    let config = auth::load_config(path)?;
    let invocation = Invocation::new(Login::from_config(&config), &config)?;

    let mut stored = stored_for_token(path, &config)?;
    let client = ApiClient::new(&config)?;

    let _spinner = spinner::new(&format!("Logging in as {}...", config.username));
    let token: TokenResponse = client.execute(&invocation).await?;
    drop(_spinner);

    stored.set_token(token.access_token, token.expires_at);
    auth::save_config(&stored, path)?;

    match output.format {
        OutputFormat::Json => {
            let summary = LoginSummary {
                user: &config.username,
                expires_at: token.expires_at,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Compact => {
            println!(
                "{}\t{}",
                config.username,
                token.expires_at.map(|t| t.to_rfc3339()).unwrap_or_default()
            );
        }
        OutputFormat::Pretty => {
            println!("{} Logged in as: {}", "✓".green(), config.username.cyan());
            if let Some(expires) = token.expires_at {
                println!("  Token expires: {}", expires.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Config {
        Config {
            username: "alice".to_string(),
            api_key: "key".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_token_target_matches_effective_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        auth::save_config(&stored(), &path).unwrap();

        let loaded = stored_for_token(&path, &stored()).unwrap();
        assert_eq!(loaded, stored());
    }

    #[test]
    fn test_env_override_blocks_token_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        auth::save_config(&stored(), &path).unwrap();

        let mut effective = stored();
        effective
            .apply_overrides(|key| (key == cloudcache::config::ENV_USER).then(|| "bob".to_string()))
            .unwrap();

        let err = stored_for_token(&path, &effective).unwrap_err();
        assert!(err.to_string().contains("environment overrides differ"));
        assert_eq!(auth::load_stored_config(&path).unwrap(), stored());
    }
}
