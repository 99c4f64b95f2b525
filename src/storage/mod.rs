//! Storage layer for the OneDrip CLI
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod budgets;
pub mod file_io;
pub mod kv;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use kv::KvStore;

use crate::config::paths::OneDripPaths;
use crate::error::OneDripError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: OneDripPaths,
    pub budgets: BudgetRepository,
    pub kv: KvStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: OneDripPaths) -> Result<Self, OneDripError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            kv: KvStore::new(paths.kv_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &OneDripPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), OneDripError> {
        self.budgets.load()?;
        self.kv.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), OneDripError> {
        self.budgets.save()?;
        self.kv.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
