use crate::command::{validate_username, Command};
use crate::config::{is_valid_host, Config};
use crate::error::ValidationError;

/// Change the client's stored settings.
///
/// The URL is the service status endpoint, used to check the new settings
/// reach a live server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigApp {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub api_key: Option<String>,
}

impl ConfigApp {
    /// Re-state the server and port already in `config`, changing nothing.
    /// Used to check connectivity of the current settings.
    pub fn current(config: &Config) -> Self {
        Self {
            server: Some(config.server.clone()),
            port: Some(config.port),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.server.is_none() && self.port.is_none() && self.username.is_none() && self.api_key.is_none()
    }

    /// Merge the given settings into `config`. Returns whether anything changed.
    ///
    /// A stored token belongs to one server and identity, so it is dropped
    /// whenever the server, user or API key changes.
    pub fn apply(&self, config: &mut Config) -> bool {
        let mut changed = false;
        let mut identity_changed = false;

        if let Some(server) = &self.server {
            identity_changed |= config.server != *server;
            config.server = server.clone();
        }
        if let Some(port) = self.port {
            changed |= config.port != port;
            config.port = port;
        }
        if let Some(username) = &self.username {
            identity_changed |= config.username != *username;
            config.username = username.clone();
        }
        if let Some(api_key) = &self.api_key {
            identity_changed |= config.api_key != *api_key;
            config.api_key = api_key.clone();
        }

        if identity_changed {
            config.clear_token();
        }
        changed || identity_changed
    }
}

impl Command for ConfigApp {
    const NAME: &'static str = "config";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::new(
                "at least one of --server, --port, --user or --api-key is required",
            ));
        }
        if let Some(server) = &self.server {
            if !is_valid_host(server) {
                return Err(ValidationError::new(format!(
                    "server '{server}' must be a bare host name, without scheme, port or path"
                )));
            }
        }
        if self.port == Some(0) {
            return Err(ValidationError::new("port must be between 1 and 65535"));
        }
        if let Some(username) = &self.username {
            validate_username("user", username)?;
        }
        if matches!(&self.api_key, Some(k) if k.trim().is_empty()) {
            return Err(ValidationError::new("api key must not be blank"));
        }
        Ok(())
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/api/v1/status")
    }
}
