use std::path::Path;

use anyhow::Result;
use cloudcache::commands::ShowNotebooks;
use cloudcache::{Config, Invocation};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::client::ApiClient;
use crate::commands::NotebooksCommands;
use crate::utils::{pretty_table, spinner};
use crate::{Output, OutputFormat};

#[derive(Deserialize, Serialize)]
struct Notebook {
    id: String,
    name: String,
    owner: String,
    #[serde(default)]
    entries: u64,
    updated_at: String,
}

#[derive(Deserialize, Serialize)]
struct NotebookListResponse {
    notebooks: Vec<Notebook>,
    total: usize,
}

pub async fn handle(path: &Path, command: NotebooksCommands, output: &Output) -> Result<()> {
    match command {
        NotebooksCommands::List { owner, all } => list_notebooks(path, owner, all, output).await,
    }
}

/// Without --owner or --all, list the configured user's notebooks.
fn resolve_command(owner: Option<String>, all: bool, config: &Config) -> ShowNotebooks {
    let owner = match owner {
        None if !all && !config.username.is_empty() => Some(config.username.clone()),
        owner => owner,
    };
    ShowNotebooks { owner, all }
}

async fn list_notebooks(
    path: &Path,
    owner: Option<String>,
    all: bool,
    output: &Output,
) -> Result<()> {
    let config = auth::load_config(path)?;
    let invocation = Invocation::new(resolve_command(owner, all, &config), &config)?;
    auth::warn_if_token_unusable(&config);
    let client = ApiClient::new(&config)?;

    let _spinner = spinner::new("Fetching notebooks...");
    let response: NotebookListResponse = client.execute(&invocation).await?;
    drop(_spinner);

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for notebook in response.notebooks {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    notebook.id, notebook.name, notebook.owner, notebook.entries, notebook.updated_at
                );
            }
        }
        OutputFormat::Pretty => {
            if response.notebooks.is_empty() {
                println!("{}", "No notebooks found".yellow());
                return Ok(());
            }

            let title = match &invocation.command().owner {
                Some(owner) => format!("Notebooks of {}:", owner),
                None => "Notebooks:".to_string(),
            };
            println!(
                "{} (showing {} of {})",
                title.bold().cyan(),
                response.notebooks.len(),
                response.total
            );
            println!(
                "{}",
                pretty_table(
                    notebook_rows(&response.notebooks),
                    &["ID", "Name", "Owner", "Entries", "Updated"],
                    output.table_format
                )
            );
        }
    }

    Ok(())
}

fn notebook_rows(notebooks: &[Notebook]) -> Vec<[String; 5]> {
    notebooks
        .iter()
        .map(|nb| {
            [
                nb.id.clone(),
                nb.name.clone(),
                nb.owner.clone(),
                nb.entries.to_string(),
                nb.updated_at.clone(),
            ]
        })
        .collect()
}
