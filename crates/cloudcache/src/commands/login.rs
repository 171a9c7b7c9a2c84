use serde_json::{json, Value};

use crate::command::{validate_username, Command, Method};
use crate::config::Config;
use crate::error::ValidationError;

/// Exchange a username and API key for an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub username: String,
    pub api_key: String,
}

impl Login {
    /// Take the credentials stored in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            username: config.username.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl Command for Login {
    const NAME: &'static str = "login";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::new(
                "no username configured, run `cloudcache config --user <name>`",
            ));
        }
        validate_username("user", &self.username)?;
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::new(
                "no API key configured, run `cloudcache config --api-key <key>`",
            ));
        }
        Ok(())
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/api/v1/auth/token")
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "username": self.username,
            "api_key": self.api_key,
        }))
    }
}
