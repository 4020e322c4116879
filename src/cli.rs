use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "file-navigator")]
#[command(about = "Inspect a flat file list as a navigable folder tree")]
pub struct Cli {
    /// Path to a JSON array of entries
    #[arg(short, long, global = true, default_value = "files.json")]
    pub files: String,
    /// Optional JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the folder tree (default)
    Tree,
    /// List the contents of a folder, optionally filtered by a search term
    List {
        /// Folder to list ("" is the root)
        #[arg(short, long, default_value = "")]
        path: String,
        /// Search term scoped to the folder
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Resolve a path and print the node as JSON
    Find {
        path: String,
    },
    /// Run navigation commands and print the resulting state as JSON
    Execute {
        /// Command to execute (e.g., "cd:catalog", "search:png", "sequence:[cd:a,up]")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting state (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}
