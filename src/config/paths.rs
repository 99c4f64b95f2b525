//! Path management for the OneDrip CLI
//!
//! Provides XDG-compliant path resolution for configuration, data, and
//! backups.
//!
//! ## Path Resolution Order
//!
//! 1. `ONEDRIP_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/onedrip` or `~/.config/onedrip`
//! 3. Windows: `%APPDATA%\onedrip`

use std::path::PathBuf;

use crate::error::OneDripError;

/// Manages all paths used by the OneDrip CLI
#[derive(Debug, Clone)]
pub struct OneDripPaths {
    /// Base directory for all OneDrip data
    base_dir: PathBuf,
}

impl OneDripPaths {
    /// Create a new OneDripPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, OneDripError> {
        let base_dir = if let Ok(custom) = std::env::var("ONEDRIP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OneDripPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/onedrip/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/onedrip/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (~/.config/onedrip/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to budgets.json
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Get the path to the key-value store file
    pub fn kv_file(&self) -> PathBuf {
        self.data_dir().join("kv.json")
    }

    /// Create the data and backup directories if they don't exist
    pub fn ensure_directories(&self) -> Result<(), OneDripError> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            OneDripError::Config(format!("Failed to create data directory: {}", e))
        })?;
        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            OneDripError::Config(format!("Failed to create backup directory: {}", e))
        })?;
        Ok(())
    }
}

/// Resolve the platform default base directory
fn resolve_default_path() -> Result<PathBuf, OneDripError> {
    #[cfg(windows)]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| OneDripError::Config("APPDATA environment variable not set".into()))?;
        Ok(PathBuf::from(appdata).join("onedrip"))
    }

    #[cfg(not(windows))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return Ok(PathBuf::from(xdg).join("onedrip"));
            }
        }

        let home = std::env::var("HOME")
            .map_err(|_| OneDripError::Config("HOME environment variable not set".into()))?;
        Ok(PathBuf::from(home).join(".config").join("onedrip"))
    }
}
