use crate::command::{query_string, Command};
use crate::error::ValidationError;

pub const MAX_LIMIT: usize = 1000;

/// List registered users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowUsers {
    pub limit: usize,
    pub search: Option<String>,
    pub admins_only: bool,
}

impl Default for ShowUsers {
    fn default() -> Self {
        Self {
            limit: 50,
            search: None,
            admins_only: false,
        }
    }
}

impl Command for ShowUsers {
    const NAME: &'static str = "show-users";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ValidationError::new(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        if matches!(&self.search, Some(s) if s.trim().is_empty()) {
            return Err(ValidationError::new("search term must not be blank"));
        }
        Ok(())
    }

    fn url(&self, base_url: &str) -> String {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search", search.trim().to_string()));
        }
        if self.admins_only {
            pairs.push(("admins", "true".to_string()));
        }
        format!("{base_url}/api/v1/users?{}", query_string(pairs))
    }
}
