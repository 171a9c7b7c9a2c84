//! The contract every cache API command satisfies.
//!
//! A command is a plain value holding its parsed arguments. It supplies two
//! hooks: [`Command::validate`] decides whether the arguments are acceptable,
//! and [`Command::url`] turns them into the endpoint it targets. Neither hook
//! has a default, so a command that forgets one does not compile.
//!
//! Commands are never used directly against a server. They are bound to a
//! [`Config`] through [`Invocation::new`], which validates first and only
//! hands back an invocation when the arguments pass.

use std::fmt;

use serde_json::Value;

use crate::config::Config;
use crate::error::ValidationError;

/// HTTP method a command is issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        f.write_str(name)
    }
}

pub trait Command {
    /// Name the command is registered under.
    const NAME: &'static str;

    /// Check the arguments. Must be deterministic and free of side effects.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Full endpoint URL: `base_url` followed by the command's path and query.
    fn url(&self, base_url: &str) -> String;

    fn method(&self) -> Method {
        Method::Get
    }

    /// JSON request body, if the command sends one.
    fn body(&self) -> Option<Value> {
        None
    }
}

/// `http://{server}:{port}` for the given configuration.
pub fn base_url(config: &Config) -> String {
    format!("http://{}:{}", config.server, config.port)
}

/// A validated command bound to the configuration it runs against.
#[derive(Debug)]
pub struct Invocation<'c, C: Command> {
    command: C,
    config: &'c Config,
}

impl<'c, C: Command> Invocation<'c, C> {
    /// Bind `command` to `config`, failing when the arguments do not validate.
    pub fn new(command: C, config: &'c Config) -> Result<Self, ValidationError> {
        command.validate()?;
        Ok(Self { command, config })
    }

    pub fn command(&self) -> &C {
        &self.command
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn base_url(&self) -> String {
        base_url(self.config)
    }

    pub fn url(&self) -> String {
        self.command.url(&self.base_url())
    }

    pub fn method(&self) -> Method {
        self.command.method()
    }

    pub fn body(&self) -> Option<Value> {
        self.command.body()
    }

    pub fn name(&self) -> &'static str {
        C::NAME
    }
}

/// Build a query string (without the leading `?`) from key/value pairs.
pub(crate) fn query_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}

/// Usernames appear as path segments, so they are limited to URL-safe characters.
pub(crate) fn validate_username(field: &str, username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(ValidationError::new(format!(
            "{field} must be between 3 and 32 characters, got {len}"
        )));
    }
    if !username.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(ValidationError::new(format!(
            "{field} must start with a lowercase letter"
        )));
    }
    if let Some(bad) = username
        .chars()
        .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')))
    {
        return Err(ValidationError::new(format!(
            "{field} contains invalid character '{bad}'"
        )));
    }
    Ok(())
}
