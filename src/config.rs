use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder to open once the first non-empty file list arrives
    pub initial_path: String,
    pub sort: SortConfig,
    pub search: SearchConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub directories_first: bool,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Match root-level searches without folding case
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    pub max_file_size: Option<u64>,
    /// Accepted extensions such as `.png`; empty accepts everything
    pub accepted_file_types: Vec<String>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            directories_first: true,
            case_sensitive: false,
        }
    }
}

impl UploadConfig {
    /// Parse a comma-separated list such as `".png, .jpg"`
    pub fn with_accepted_file_types(mut self, accepted: &str) -> Self {
        self.accepted_file_types = accepted
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        log::debug!("Config loaded from {}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
