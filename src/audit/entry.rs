//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types
//! and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
    /// A batch of entities was imported from a file
    Import,
    /// Entities were exported to a file
    Export,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
            Operation::Export => write!(f, "EXPORT"),
        }
    }
}

/// A single audit log entry
///
/// Records one operation on a budget (or a batch of budgets) with an
/// optional entity snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected entity, or a batch label for import/export
    pub entity_id: String,

    /// Human-readable description (e.g. the service description)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Operation detail (e.g. "3 imported, 1 failed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// JSON snapshot of the entity after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_id: entity_id.into(),
            entity_name,
            detail: None,
            after: serde_json::to_value(entity).ok(),
        }
    }

    /// Create a new audit entry for an update operation
    pub fn update<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_id: entity_id.into(),
            entity_name,
            detail: None,
            after: serde_json::to_value(entity).ok(),
        }
    }

    /// Create a new audit entry for a delete operation
    pub fn delete(entity_id: impl Into<String>, entity_name: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_id: entity_id.into(),
            entity_name,
            detail: None,
            after: None,
        }
    }

    /// Create a new audit entry summarizing an import batch
    pub fn import_batch(success: usize, failed: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Import,
            entity_id: "batch".to_string(),
            entity_name: None,
            detail: Some(format!("{} imported, {} failed", success, failed)),
            after: None,
        }
    }

    /// Create a new audit entry for an export
    pub fn export(count: usize, filename: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Export,
            entity_id: filename.into(),
            entity_name: None,
            detail: Some(format!("{} budgets exported", count)),
            after: None,
        }
    }
}
