//! Concrete cache API commands.

pub mod config_app;
pub mod login;
pub mod new_user;
pub mod show_notebooks;
pub mod show_users;

pub use config_app::ConfigApp;
pub use login::Login;
pub use new_user::NewUser;
pub use show_notebooks::ShowNotebooks;
pub use show_users::ShowUsers;

#[cfg(test)]
pub(crate) fn test_config() -> crate::Config {
    crate::Config {
        server: "example.com".to_string(),
        port: 8080,
        username: "alice".to_string(),
        api_key: "key-0001".to_string(),
        ..crate::Config::default()
    }
}
