// Library module containing testable functions behind the CLI

use crate::command::Command;
use crate::config::Config;
use crate::error::{FileManagerError, Result};
use crate::navigator::{NavigationState, Navigator, NavigatorEvent};
use crate::store::FileStore;
use crate::tree::{FileTree, TreeNode};
use serde::Serialize;
use std::fs;

/// Serializable summary of a navigation state
#[derive(Debug, Serialize)]
pub struct StateReport<'a> {
    pub current_path: &'a str,
    pub search_term: &'a str,
    pub current_folder: Option<&'a crate::entry::Entry>,
    pub current_path_files: &'a [crate::entry::Entry],
}

impl<'a> From<&'a NavigationState> for StateReport<'a> {
    fn from(state: &'a NavigationState) -> Self {
        Self {
            current_path: state.current_path(),
            search_term: state.search_term(),
            current_folder: state.current_folder(),
            current_path_files: state.current_path_files(),
        }
    }
}

pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_file(path),
        None => Ok(Config::default()),
    }
}

/// Navigator with `store`'s current snapshot already applied
pub fn loaded_navigator(store: &FileStore, config: &Config) -> Navigator {
    let mut navigator = Navigator::new(config);
    navigator.handle_event(NavigatorEvent::FilesChanged(store.snapshot()));
    navigator
}

/// Indented tree listing, one node per line
pub fn render_tree(tree: &FileTree) -> String {
    let mut out = String::new();
    tree.walk(|node, depth| {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&describe(node));
        out.push('\n');
    });
    out
}

fn describe(node: &TreeNode) -> String {
    if node.is_directory() {
        format!("{}/", node.name())
    } else {
        match node.entry.size {
            Some(size) => format!("{} ({} bytes)", node.name(), size),
            None => node.name().to_string(),
        }
    }
}

/// One line per displayed entry
pub fn render_listing(state: &NavigationState) -> String {
    let mut out = String::new();
    for entry in state.current_path_files() {
        let kind = if entry.is_directory { "dir " } else { "file" };
        let updated = entry
            .updated_at_utc()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{}  {:>16}  {}\n", kind, updated, entry.path));
    }
    out
}

pub fn list_folder(files_path: &str, config: &Config, path: &str, search: Option<&str>) -> Result<String> {
    let store = FileStore::load_from_file(files_path)?;
    let mut navigator = loaded_navigator(&store, config);
    navigator.handle_event(NavigatorEvent::SetCurrentPath(path.to_string()));
    if let Some(term) = search {
        navigator.handle_event(NavigatorEvent::SetSearchTerm(term.to_string()));
    }
    Ok(render_listing(navigator.state()))
}

pub fn find_node(files_path: &str, path: &str) -> Result<String> {
    let store = FileStore::load_from_file(files_path)?;
    let snapshot = store.snapshot();
    let node = snapshot
        .node_by_path(path)
        .ok_or_else(|| FileManagerError::NotFound(path.to_string()))?;
    Ok(serde_json::to_string_pretty(node)?)
}

pub fn execute_command(
    files_path: &str,
    config: &Config,
    command_str: &str,
    output_path: Option<&str>,
) -> Result<String> {
    let store = FileStore::load_from_file(files_path)?;
    let command = Command::from_string(command_str).map_err(FileManagerError::Generic)?;

    let mut navigator = loaded_navigator(&store, config);
    for event in command.to_events() {
        let changed = navigator.handle_event(event);
        log::debug!("execute_command: state changed = {}", changed);
    }

    let result_json = serde_json::to_string_pretty(&StateReport::from(navigator.state()))?;

    if let Some(path) = output_path {
        fs::write(path, &result_json)?;
    }

    Ok(result_json)
}
