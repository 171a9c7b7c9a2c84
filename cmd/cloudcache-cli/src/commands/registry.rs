use anyhow::Result;
use cloudcache::registry;
use colored::Colorize;

use crate::utils::pretty_table;
use crate::{Output, OutputFormat};

pub fn handle(output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            let commands: Vec<_> = registry::COMMANDS
                .iter()
                .map(|info| {
                    serde_json::json!({
                        "name": info.name,
                        "category": info.category,
                        "summary": info.summary,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&commands)?);
        }
        OutputFormat::Compact => {
            for info in registry::COMMANDS {
                println!("{}\t{}\t{}", info.category, info.name, info.summary);
            }
        }
        OutputFormat::Pretty => {
            println!("{}", "Commands:".bold().cyan());
            println!(
                "{}",
                pretty_table(registry::rows(), &["Category", "Command", "Summary"], output.table_format)
            );
        }
    }

    Ok(())
}
