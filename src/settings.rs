use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Panel configuration. Missing or unreadable settings degrade to the
/// defaults so the panel always starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Application name shown in document titles.
    pub app_name: String,
    /// Remote query-execution endpoint.
    pub execute_url: String,
    pub request_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            app_name: "PgPanel".to_string(),
            execute_url: "http://localhost:8080/api/execute".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Failed to parse settings, using defaults: {}", e);
                Settings::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                log::warn!("Failed to read settings, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Atomic write: tmp + rename.
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, path)?;

        Ok(())
    }
}
