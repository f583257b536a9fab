//! User settings for PaySphere
//!
//! Manages preferences that shape what the core reports, such as how many
//! recent transactions the dashboard summary carries and whether mutations
//! are written to the audit log.

use serde::{Deserialize, Serialize};

use super::paths::PaySpherePaths;
use crate::error::PaySphereError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of transactions in the dashboard's recent list
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,

    /// Whether mutations are appended to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Whether the ledger starts with the demo transactions
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_recent_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            recent_transactions_limit: default_recent_limit(),
            audit_enabled: true,
            seed_demo_data: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PaySpherePaths) -> Result<Self, PaySphereError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PaySphereError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PaySphereError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PaySpherePaths) -> Result<(), PaySphereError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PaySphereError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PaySphereError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
