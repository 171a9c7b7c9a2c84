use crate::command::{validate_username, Command};
use crate::error::ValidationError;

/// List notebooks, either for one owner or across every user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowNotebooks {
    pub owner: Option<String>,
    pub all: bool,
}

impl Command for ShowNotebooks {
    const NAME: &'static str = "show-notebooks";

    fn validate(&self) -> Result<(), ValidationError> {
        match (&self.owner, self.all) {
            (Some(_), true) => Err(ValidationError::new(
                "an owner and --all cannot be used together",
            )),
            (None, false) => Err(ValidationError::new(
                "an owner is required unless --all is given",
            )),
            (Some(owner), false) => validate_username("owner", owner),
            (None, true) => Ok(()),
        }
    }

    fn url(&self, base_url: &str) -> String {
        match &self.owner {
            Some(owner) => format!("{base_url}/api/v1/users/{owner}/notebooks"),
            None => format!("{base_url}/api/v1/notebooks"),
        }
    }
}
