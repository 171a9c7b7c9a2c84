use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use cloudcache::commands::ConfigApp;
use cloudcache::{Config, Invocation};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::auth::{self, TokenStatus};
use crate::client::ApiClient;
use crate::commands::ConfigArgs;
use crate::utils::{pretty_table, spinner};
use crate::{Output, OutputFormat};

#[derive(Deserialize, Serialize)]
struct StatusResponse {
    status: String,
    version: Option<String>,
}

impl From<ConfigArgs> for ConfigApp {
    fn from(args: ConfigArgs) -> Self {
        ConfigApp {
            server: args.server,
            port: args.port,
            username: args.user,
            api_key: args.api_key,
        }
    }
}

pub async fn handle(path: &Path, args: ConfigArgs, output: &Output) -> Result<()> {
    let check = args.check;
    let command = ConfigApp::from(args);
    let stored = auth::load_stored_config(path)?;

    if command.is_empty() {
        if check {
            let invocation = Invocation::new(ConfigApp::current(&stored), &stored)?;
            return check_status(&invocation, output).await;
        }
        show_config(&stored, path, output)?;
        return Ok(());
    }

    let mut updated = stored.clone();
    let changed = command.apply(&mut updated);
    let invocation = Invocation::new(command, &updated)?;

    if changed {
        auth::save_config(&updated, path)?;
    }

    if output.format != OutputFormat::Json {
        if changed {
            println!("{} Config saved to: {}", "✓".green(), path.display());
            if stored.access_token.is_some() && updated.access_token.is_none() {
                println!("  Access token cleared, run 'cloudcache login' to obtain a new one");
            }
        } else {
            println!("{} Config unchanged", "•".blue());
        }
    }

    if check {
        check_status(&invocation, output).await?;
    } else if output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&masked(&updated))?);
    }

    Ok(())
}

async fn check_status(invocation: &Invocation<'_, ConfigApp>, output: &Output) -> Result<()> {
    let client = ApiClient::new(invocation.config())?;

    let _spinner = spinner::new(&format!("Contacting {}...", invocation.base_url()));
    let status: StatusResponse = client.execute(invocation).await?;
    drop(_spinner);

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Compact => {
            println!("{}\t{}", status.status, status.version.unwrap_or_default());
        }
        OutputFormat::Pretty => {
            println!(
                "{} Server {} is {}",
                "✓".green(),
                invocation.base_url().cyan(),
                status.status.green()
            );
            if let Some(version) = status.version {
                println!("  Version: {}", version);
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config, path: &Path, output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&masked(config))?);
        }
        OutputFormat::Compact => {
            for [key, value] in settings_rows(config) {
                println!("{}\t{}", key, value);
            }
        }
        OutputFormat::Pretty => {
            println!("{} {}", "Config:".bold().cyan(), path.display());
            println!("{}", pretty_table(settings_rows(config), &["Setting", "Value"], output.table_format));
        }
    }
    Ok(())
}

/// Copy of `config` safe to print.
fn masked(config: &Config) -> Config {
    Config {
        api_key: config.masked_api_key(),
        access_token: config.access_token.as_ref().map(|_| "********".to_string()),
        ..config.clone()
    }
}

fn settings_rows(config: &Config) -> Vec<[String; 2]> {
    let token = match auth::token_status(config, Utc::now()) {
        TokenStatus::Missing => "none".to_string(),
        TokenStatus::Expired => "expired".to_string(),
        TokenStatus::Valid => match config.token_expires {
            Some(expires) => format!("valid until {}", expires.format("%Y-%m-%d %H:%M:%S UTC")),
            None => "valid".to_string(),
        },
    };

    vec![
        ["server".to_string(), config.server.clone()],
        ["port".to_string(), config.port.to_string()],
        ["user".to_string(), config.username.clone()],
        ["api_key".to_string(), config.masked_api_key()],
        ["access_token".to_string(), token],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: "example.com".to_string(),
            port: 8080,
            username: "alice".to_string(),
            api_key: "secret-1234".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_args_into_command() {
        let args = ConfigArgs {
            server: Some("example.com".to_string()),
            port: None,
            user: Some("alice".to_string()),
            api_key: None,
            check: true,
        };
        let command = ConfigApp::from(args);
        assert_eq!(command.server.as_deref(), Some("example.com"));
        assert_eq!(command.username.as_deref(), Some("alice"));
        assert!(command.port.is_none());
    }

    #[test]
    fn test_masked_hides_secrets() {
        let mut config = config();
        config.set_token("real-token".to_string(), None);

        let shown = masked(&config);
        assert_eq!(shown.api_key, "*******1234");
        assert_eq!(shown.access_token.as_deref(), Some("********"));
        assert_eq!(shown.server, "example.com");
    }

    #[test]
    fn test_settings_rows() {
        let rows = settings_rows(&config());
        assert_eq!(rows[0], ["server".to_string(), "example.com".to_string()]);
        assert_eq!(rows[3][1], "*******1234");
        assert_eq!(rows[4][1], "none");
    }

    #[tokio::test]
    async fn test_invalid_settings_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let args = ConfigArgs {
            server: Some("http://example.com".to_string()),
            port: None,
            user: None,
            api_key: None,
            check: false,
        };
        let output = Output {
            format: OutputFormat::Compact,
            table_format: Default::default(),
        };

        let err = handle(&path, args, &output).await.unwrap_err();
        assert!(err.downcast_ref::<cloudcache::ValidationError>().is_some());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_settings_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let args = ConfigArgs {
            server: Some("cache.internal".to_string()),
            port: Some(9000),
            user: Some("alice".to_string()),
            api_key: None,
            check: false,
        };
        let output = Output {
            format: OutputFormat::Compact,
            table_format: Default::default(),
        };

        handle(&path, args, &output).await.unwrap();
        let saved = Config::load(&path).unwrap();
        assert_eq!(saved.server, "cache.internal");
        assert_eq!(saved.port, 9000);
        assert_eq!(saved.username, "alice");
    }
}
