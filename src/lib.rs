pub mod actions;
pub mod cli;
pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod main_lib;
pub mod navigator;
pub mod path;
pub mod search;
pub mod sort;
pub mod store;
pub mod tree;

pub use entry::Entry;
pub use error::{FileManagerError, Result};
pub use navigator::{NavigationState, Navigator, NavigatorEvent};
pub use store::{FileSnapshot, FileStore};
pub use tree::{FileTree, TreeNode};
