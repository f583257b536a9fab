//! Path management for PaySphere
//!
//! Provides XDG-compliant path resolution for settings, the persisted
//! session and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `PAYSPHERE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/paysphere` or `~/.config/paysphere`
//! 3. Windows: `%APPDATA%\paysphere`

use std::path::PathBuf;

use crate::error::PaySphereError;

/// Manages all paths used by PaySphere
#[derive(Debug, Clone)]
pub struct PaySpherePaths {
    /// Base directory for all PaySphere data
    base_dir: PathBuf,
}

impl PaySpherePaths {
    /// Create a new PaySpherePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory can be
    /// determined.
    pub fn new() -> Result<Self, PaySphereError> {
        let base_dir = if let Ok(custom) = std::env::var("PAYSPHERE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PaySpherePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the key-value file backing the identity store
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PaySphereError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PaySphereError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PaySphereError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                PaySphereError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("paysphere"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PaySphereError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PaySphereError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("paysphere"))
}
