use std::path::Path;

use anyhow::Result;
use cloudcache::commands::{NewUser, ShowUsers};
use cloudcache::Invocation;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::client::ApiClient;
use crate::commands::UsersCommands;
use crate::utils::{pretty_table, spinner};
use crate::{Output, OutputFormat};

#[derive(Deserialize, Serialize)]
struct User {
    username: String,
    email: String,
    #[serde(default)]
    is_admin: bool,
    created_at: String,
}

#[derive(Deserialize, Serialize)]
struct UserListResponse {
    users: Vec<User>,
    total: usize,
}

pub async fn handle(path: &Path, command: UsersCommands, output: &Output) -> Result<()> {
    match command {
        UsersCommands::List {
            limit,
            search,
            admins,
        } => {
            let command = ShowUsers {
                limit,
                search,
                admins_only: admins,
            };
            list_users(path, command, output).await
        }
        UsersCommands::New {
            username,
            email,
            admin,
        } => {
            let command = NewUser {
                username,
                email,
                admin,
            };
            new_user(path, command, output).await
        }
    }
}

async fn list_users(path: &Path, command: ShowUsers, output: &Output) -> Result<()> {
    let config = auth::load_config(path)?;
    let invocation = Invocation::new(command, &config)?;
    auth::warn_if_token_unusable(&config);
    let client = ApiClient::new(&config)?;

    let _spinner = spinner::new("Fetching users...");
    let response: UserListResponse = client.execute(&invocation).await?;
    drop(_spinner);

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for user in response.users {
                println!(
                    "{}\t{}\t{}\t{}",
                    user.username, user.email, user.is_admin, user.created_at
                );
            }
        }
        OutputFormat::Pretty => {
            if response.users.is_empty() {
                println!("{}", "No users found".yellow());
                return Ok(());
            }

            println!(
                "{} (showing {} of {})",
                "Users:".bold().cyan(),
                response.users.len(),
                response.total
            );
            println!(
                "{}",
                pretty_table(user_rows(&response.users), &["Username", "Email", "Admin", "Created"], output.table_format)
            );
        }
    }

    Ok(())
}

async fn new_user(path: &Path, command: NewUser, output: &Output) -> Result<()> {
    let config = auth::load_config(path)?;
    let invocation = Invocation::new(command, &config)?;
    auth::warn_if_token_unusable(&config);
    let client = ApiClient::new(&config)?;

    let _spinner = spinner::new(&format!("Creating user {}...", invocation.command().username));
    let user: User = client.execute(&invocation).await?;
    drop(_spinner);

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        OutputFormat::Compact => {
            println!("{}\t{}\t{}", user.username, user.email, user.is_admin);
        }
        OutputFormat::Pretty => {
            println!("{} User created: {}", "✓".green(), user.username.cyan());
            println!("  Email: {}", user.email);
            if user.is_admin {
                println!("  Role: {}", "admin".yellow());
            }
        }
    }

    Ok(())
}

fn user_rows(users: &[User]) -> Vec<[String; 4]> {
    users
        .iter()
        .map(|user| {
            [
                user.username.clone(),
                user.email.clone(),
                if user.is_admin { "yes" } else { "no" }.to_string(),
                user.created_at.clone(),
            ]
        })
        .collect()
}
