use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudcache::{TableFormat, ValidationError};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod auth;
mod client;
mod commands;
mod utils;

use commands::*;

#[derive(Parser)]
#[command(
    name = "cloudcache",
    version,
    about = "Cloud cache CLI",
    long_about = "Command-line interface for managing users and notebooks on a cloud cache server\n\n\
                  Examples:\n  \
                  cloudcache config --server cache.example.com --port 8080 --user alice --api-key <key>\n  \
                  cloudcache login\n  \
                  cloudcache users list --limit 20\n  \
                  cloudcache notebooks list --all",
    after_help = "Use 'cloudcache <command> --help' for more information about a command."
)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "CLOUDCACHE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    output: OutputFormat,

    /// Table style for pretty output (fancy_grid, grid, rounded, psql, markdown, simple, plain)
    #[arg(long, global = true, default_value = "fancy_grid")]
    table_format: TableFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Compact,
}

/// How handlers print their results.
#[derive(Clone, Copy, Debug)]
pub struct Output {
    pub format: OutputFormat,
    pub table_format: TableFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change client settings
    Config(ConfigArgs),

    /// Obtain an access token for the configured user
    Login,

    /// Manage users
    #[command(subcommand)]
    Users(UsersCommands),

    /// Manage notebooks
    #[command(subcommand)]
    Notebooks(NotebooksCommands),

    /// List every available command
    Commands,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = auth::config_path(cli.config)?;
    let output = Output {
        format: cli.output,
        table_format: cli.table_format,
    };

    match cli.command {
        Commands::Config(args) => config::handle(&config_path, args, &output).await,
        Commands::Login => login::handle(&config_path, &output).await,
        Commands::Users(cmd) => users::handle(&config_path, cmd, &output).await,
        Commands::Notebooks(cmd) => notebooks::handle(&config_path, cmd, &output).await,
        Commands::Commands => registry::handle(&output),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.downcast_ref::<ValidationError>().is_some() => {
            eprintln!("{} {}", "✗".red(), err);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_globals() {
        let cli = Cli::parse_from([
            "cloudcache",
            "--output",
            "json",
            "--table-format",
            "psql",
            "-vv",
            "commands",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.table_format, TableFormat::Psql);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Commands));
    }

    #[test]
    fn test_default_globals() {
        let cli = Cli::parse_from(["cloudcache", "login"]);
        assert_eq!(cli.output, OutputFormat::Pretty);
        assert_eq!(cli.table_format, TableFormat::FancyGrid);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_unknown_table_format_rejected() {
        let result = Cli::try_parse_from(["cloudcache", "--table-format", "html", "commands"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_users_list() {
        let cli = Cli::parse_from(["cloudcache", "users", "list", "--limit", "5", "--admins"]);
        match cli.command {
            Commands::Users(UsersCommands::List { limit, search, admins }) => {
                assert_eq!(limit, 5);
                assert_eq!(search, None);
                assert!(admins);
            }
            _ => panic!("expected users list"),
        }
    }

    #[test]
    fn test_parse_users_new() {
        let cli = Cli::parse_from(["cloudcache", "users", "new", "carol", "--email", "carol@example.com"]);
        match cli.command {
            Commands::Users(UsersCommands::New { username, email, admin }) => {
                assert_eq!(username, "carol");
                assert_eq!(email, "carol@example.com");
                assert!(!admin);
            }
            _ => panic!("expected users new"),
        }
    }

    #[test]
    fn test_parse_notebooks_list() {
        // --owner with --all is rejected by command validation, not by the parser
        let cli = Cli::parse_from(["cloudcache", "notebooks", "list", "--owner", "bob", "--all"]);
        match cli.command {
            Commands::Notebooks(NotebooksCommands::List { owner, all }) => {
                assert_eq!(owner.as_deref(), Some("bob"));
                assert!(all);
            }
            _ => panic!("expected notebooks list"),
        }
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::parse_from(["cloudcache", "config", "--server", "example.com", "--port", "9000", "--check"]);
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.server.as_deref(), Some("example.com"));
                assert_eq!(args.port, Some(9000));
                assert!(args.check);
                assert!(args.user.is_none());
            }
            _ => panic!("expected config"),
        }
    }
}
