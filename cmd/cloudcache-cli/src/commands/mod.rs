pub mod config;
pub mod login;
pub mod notebooks;
pub mod registry;
pub mod users;

use clap::{Args, Subcommand};

/// Settings accepted by `cloudcache config`
///
/// Examples:
///   cloudcache config
///   cloudcache config --server cache.example.com --port 8080
///   cloudcache config --user alice --api-key <key> --check
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Cache server host name
    #[arg(long)]
    pub server: Option<String>,

    /// Cache server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Username to authenticate as
    #[arg(long)]
    pub user: Option<String>,

    /// API key for the user
    #[arg(long)]
    pub api_key: Option<String>,

    /// Contact the server after saving to verify the settings
    #[arg(long)]
    pub check: bool,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List users
    ///
    /// Examples:
    ///   cloudcache users list
    ///   cloudcache users list --search ali --limit 20
    ///   cloudcache users list --admins
    List {
        /// Maximum number of users to return
        #[arg(long, default_value = "50")]
        limit: usize,

        /// Only users whose name or email contains this text
        #[arg(long)]
        search: Option<String>,

        /// Only administrators
        #[arg(long)]
        admins: bool,
    },

    /// Create a new user
    ///
    /// Examples:
    ///   cloudcache users new carol --email carol@example.com
    ///   cloudcache users new dave --email dave@example.com --admin
    New {
        /// Username (3-32 chars, lowercase letters, digits, '_', '.', '-')
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Grant administrator rights
        #[arg(long)]
        admin: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotebooksCommands {
    /// List notebooks
    ///
    /// Lists the configured user's notebooks unless --owner or --all is given.
    List {
        /// Owner whose notebooks to list
        #[arg(long)]
        owner: Option<String>,

        /// List notebooks of every user
        #[arg(long)]
        all: bool,
    },
}
