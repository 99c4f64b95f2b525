//! Budget repository for JSON storage
//!
//! Keeps budgets in an in-memory map backed by a single JSON file with
//! atomic writes. This repository is the persistence collaborator behind
//! the budget service, the importer, and the exporter.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OneDripError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable on-disk shape of the budget database
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), OneDripError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), OneDripError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = BudgetData { budgets: list };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, OneDripError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get all budgets, including soft-deleted ones (oldest first)
    pub fn get_all(&self) -> Result<Vec<Budget>, OneDripError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// Get all non-deleted budgets, newest first
    pub fn list_active(&self) -> Result<Vec<Budget>, OneDripError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().filter(|b| !b.deleted).cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), OneDripError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Soft-delete a budget; returns false if the ID is unknown
    pub fn soft_delete(&self, id: BudgetId) -> Result<bool, OneDripError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match budgets.get_mut(&id) {
            Some(budget) => {
                budget.deleted = true;
                budget.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count all budgets, including soft-deleted ones
    pub fn count(&self) -> Result<usize, OneDripError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }

    /// Count non-deleted budgets
    pub fn count_active(&self) -> Result<usize, OneDripError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.values().filter(|b| !b.deleted).count())
    }
}
