//! CLI command handler for the status overview

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OneDripResult;
use crate::storage::Storage;

/// KV key holding the last import summary
pub const LAST_IMPORT_KEY: &str = "last_import";

/// KV key holding the last export summary
pub const LAST_EXPORT_KEY: &str = "last_export";

/// Cached summary of the most recent import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastImport {
    pub at: DateTime<Utc>,
    pub success: usize,
    pub error_count: usize,
}

/// Cached summary of the most recent export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastExport {
    pub at: DateTime<Utc>,
    pub count: usize,
    pub filename: String,
}

/// Handle the status command
pub fn handle_status_command(storage: &Storage) -> OneDripResult<()> {
    println!("OneDrip - situação atual");
    println!("{}", "=".repeat(40));
    println!(
        "  Orçamentos ativos:  {}",
        storage.budgets.count_active()?
    );
    println!("  Total (com removidos): {}", storage.budgets.count()?);
    println!();

    match storage.kv.get::<LastImport>(LAST_IMPORT_KEY)? {
        Some(last) => println!(
            "  Última importação:  {} ({} ok, {} com erro)",
            last.at.format("%d/%m/%Y %H:%M"),
            last.success,
            last.error_count
        ),
        None => println!("  Última importação:  nenhuma"),
    }

    match storage.kv.get::<LastExport>(LAST_EXPORT_KEY)? {
        Some(last) => println!(
            "  Última exportação:  {} ({} orçamentos, {})",
            last.at.format("%d/%m/%Y %H:%M"),
            last.count,
            last.filename
        ),
        None => println!("  Última exportação:  nenhuma"),
    }

    Ok(())
}
