//! Static listing of every command the client can dispatch.

use crate::command::Command;
use crate::commands::{ConfigApp, Login, NewUser, ShowNotebooks, ShowUsers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: ConfigApp::NAME,
        category: "Client",
        summary: "Change the server, port, user or API key the client uses.",
    },
    CommandInfo {
        name: Login::NAME,
        category: "Client",
        summary: "Exchange the configured API key for an access token.",
    },
    CommandInfo {
        name: ShowUsers::NAME,
        category: "Users",
        summary: "List registered users.",
    },
    CommandInfo {
        name: NewUser::NAME,
        category: "Users",
        summary: "Create a user account.",
    },
    CommandInfo {
        name: ShowNotebooks::NAME,
        category: "Notebooks",
        summary: "List notebooks for one owner or for all users.",
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.name == name)
}

/// Registry rows as `[category, name, summary]`, ready for table rendering.
pub fn rows() -> Vec<[&'static str; 3]> {
    COMMANDS
        .iter()
        .map(|info| [info.category, info.name, info.summary])
        .collect()
}
