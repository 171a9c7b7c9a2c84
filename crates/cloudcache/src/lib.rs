//! Cloud cache client core
//!
//! Shared pieces of the `cloudcache` command-line client:
//! - the [`Command`] contract every API command implements, and the
//!   validating [`Invocation`] that binds a command to a [`Config`]
//! - the concrete commands in [`commands`] and their [`registry`]
//! - configuration loading and persistence
//! - an indented text [`table`] renderer
//!
//! # Examples
//!
//! ```rust
//! use cloudcache::{commands::ShowUsers, Config, Invocation};
//!
//! let config = Config {
//!     server: "example.com".to_string(),
//!     port: 8080,
//!     ..Config::default()
//! };
//! let invocation = Invocation::new(ShowUsers::default(), &config)?;
//! assert_eq!(invocation.url(), "http://example.com:8080/api/v1/users?limit=50");
//! # Ok::<(), cloudcache::ValidationError>(())
//! ```

pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod registry;
pub mod table;

// Re-export common types
pub use command::{base_url, Command, Invocation, Method};
pub use config::Config;
pub use error::{ConfigError, UnknownTableFormat, ValidationError};
pub use table::{render, TableFormat};
