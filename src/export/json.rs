//! JSON full-storage export
//!
//! Produces a complete snapshot of the local database for backups, with a
//! metadata block describing what was captured.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{OneDripError, OneDripResult};
use crate::models::Budget;
use crate::storage::Storage;

/// Schema version of the backup format
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Build the backup filename ("onedrip-storage-backup-1754550000000.json")
pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("onedrip-storage-backup-{}.json", now.timestamp_millis())
}

/// Summary counts for a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub budget_count: usize,
    pub active_budget_count: usize,
}

/// A complete snapshot of the local database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: u32,
    pub app_version: String,
    pub exported_at: DateTime<Utc>,
    pub metadata: ExportMetadata,
    pub budgets: Vec<Budget>,
}

impl FullExport {
    /// Snapshot the current storage state
    pub fn from_storage(storage: &Storage) -> OneDripResult<Self> {
        let budgets = storage.budgets.get_all()?;
        let active_budget_count = budgets.iter().filter(|b| !b.deleted).count();

        Ok(Self {
            schema_version: BACKUP_SCHEMA_VERSION,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            metadata: ExportMetadata {
                budget_count: budgets.len(),
                active_budget_count,
            },
            budgets,
        })
    }
}

/// Write the full database as JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> OneDripResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
            .map_err(|e| OneDripError::Export(e.to_string()))?;
    } else {
        serde_json::to_writer(writer, &export)
            .map_err(|e| OneDripError::Export(e.to_string()))?;
    }

    Ok(())
}
