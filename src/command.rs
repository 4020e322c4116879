use crate::navigator::NavigatorEvent;
use serde::{Deserialize, Serialize};

/// Navigation commands accepted by the `execute` subcommand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    ChangeDirectory(String),
    NavigateUp,
    GoToRoot,
    Search(String),
    ClearSearch,

    // Multi-step commands
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "up" | "navigate_up" | ".." => return Ok(Command::NavigateUp),
            "root" | "home" => return Ok(Command::GoToRoot),
            "clear_search" | "escape" => return Ok(Command::ClearSearch),
            _ => {}
        }

        if let Some(path) = s.strip_prefix("cd:") {
            let path = path.trim_end_matches('/');
            return Ok(Command::ChangeDirectory(path.to_string()));
        }

        if let Some(term) = s.strip_prefix("search:") {
            return Ok(Command::Search(term.to_string()));
        }

        if let Some(inner) = s.strip_prefix("sequence:[").and_then(|rest| rest.strip_suffix(']')) {
            if inner.trim().is_empty() {
                return Ok(Command::Sequence(vec![]));
            }

            // A piece that is not a command continues the previous `cd:` or
            // `search:` argument, so terms and paths may contain commas
            let mut parts: Vec<String> = Vec::new();
            for piece in inner.split(',') {
                match parts.last_mut() {
                    Some(last) if Command::from_string(piece).is_err() && takes_argument(last) => {
                        last.push(',');
                        last.push_str(piece);
                    }
                    _ => parts.push(piece.trim_start().to_string()),
                }
            }

            let mut commands = Vec::new();
            for cmd_str in &parts {
                match Command::from_string(cmd_str) {
                    Ok(cmd) => commands.push(cmd),
                    Err(e) => return Err(format!("Invalid command in sequence '{}': {}", cmd_str.trim(), e)),
                }
            }
            return Ok(Command::Sequence(commands));
        }

        Err(format!("Unknown command: {}", s))
    }

    /// Convert command to string representation
    pub fn to_command_string(&self) -> String {
        match self {
            Command::ChangeDirectory(path) => format!("cd:{}", path),
            Command::NavigateUp => "up".to_string(),
            Command::GoToRoot => "root".to_string(),
            Command::Search(term) => format!("search:{}", term),
            Command::ClearSearch => "clear_search".to_string(),
            Command::Sequence(commands) => {
                let inner: Vec<String> = commands.iter().map(|c| c.to_command_string()).collect();
                format!("sequence:[{}]", inner.join(","))
            }
        }
    }

    /// Events to feed the navigator, in order
    pub fn to_events(&self) -> Vec<NavigatorEvent> {
        match self {
            Command::ChangeDirectory(path) => vec![NavigatorEvent::SetCurrentPath(path.clone())],
            Command::NavigateUp => vec![NavigatorEvent::NavigateUp],
            Command::GoToRoot => vec![NavigatorEvent::SetCurrentPath(String::new())],
            Command::Search(term) => vec![NavigatorEvent::SetSearchTerm(term.clone())],
            Command::ClearSearch => vec![NavigatorEvent::ClearSearch],
            Command::Sequence(commands) => commands.iter().flat_map(|c| c.to_events()).collect(),
        }
    }
}

fn takes_argument(command_str: &str) -> bool {
    command_str.starts_with("cd:") || command_str.starts_with("search:")
}
