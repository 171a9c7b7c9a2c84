use serde_json::{json, Value};

use crate::command::{validate_username, Command, Method};
use crate::error::ValidationError;

/// Create a user account on the cache service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub admin: bool,
}

impl NewUser {
    fn validate_email(&self) -> Result<(), ValidationError> {
        let invalid = || ValidationError::new(format!("'{}' is not a valid email address", self.email));

        let (local, domain) = self.email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') || self.email.contains(char::is_whitespace) {
            return Err(invalid());
        }
        match domain.split_once('.') {
            Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => Ok(()),
            _ => Err(invalid()),
        }
    }
}

impl Command for NewUser {
    const NAME: &'static str = "new-user";

    fn validate(&self) -> Result<(), ValidationError> {
        validate_username("username", &self.username)?;
        self.validate_email()
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/api/v1/users")
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "username": self.username,
            "email": self.email,
            "is_admin": self.admin,
        }))
    }
}
