use thiserror::Error;

pub type Result<T> = std::result::Result<T, FileManagerError>;

#[derive(Debug, Error)]
pub enum FileManagerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
    #[error("An item named {name:?} already exists in {parent:?}")]
    NameConflict { name: String, parent: String },
    #[error("Cannot paste into {destination:?}: {reason}")]
    InvalidDestination { destination: String, reason: String },
    #[error("No files selected")]
    EmptySelection,
    #[error("Clipboard is empty")]
    EmptyClipboard,
    #[error("Upload rejected for {name:?}: {reason}")]
    UploadRejected { name: String, reason: String },
    #[error("Path not found: {0:?}")]
    NotFound(String),
    #[error("Error: {0}")]
    Generic(String),
}
