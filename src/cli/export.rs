//! CLI command handler for CSV export

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Duration, Utc};

use crate::audit::{AuditEntry, AuditLogger};
use crate::cli::status::{LastExport, LAST_EXPORT_KEY};
use crate::error::{OneDripError, OneDripResult};
use crate::export::csv::{export_budgets_csv, export_filename};
use crate::services::BudgetService;
use crate::storage::Storage;

/// How long the last-export summary stays visible in `onedrip status`
const LAST_EXPORT_TTL_DAYS: i64 = 30;

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    audit: &AuditLogger,
    output_dir: Option<PathBuf>,
) -> OneDripResult<()> {
    let service = BudgetService::new(storage);
    let budgets = service.list()?;

    // Not an error: there is simply nothing to write
    if budgets.is_empty() {
        println!("Nenhum orçamento para exportar.");
        return Ok(());
    }

    let now = Utc::now();
    let filename = export_filename(now.date_naive());
    let path = output_dir.unwrap_or_else(|| PathBuf::from(".")).join(&filename);

    let file = File::create(&path).map_err(|e| {
        OneDripError::Export(format!("Falha ao criar {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    export_budgets_csv(&budgets, &mut writer, now)?;

    println!(
        "Exportado(s) {} orçamento(s) para: {}",
        budgets.len(),
        path.display()
    );

    audit.log(&AuditEntry::export(budgets.len(), filename.clone()))?;

    storage.kv.set(
        LAST_EXPORT_KEY,
        &LastExport {
            at: now,
            count: budgets.len(),
            filename,
        },
        Some(Duration::days(LAST_EXPORT_TTL_DAYS)),
    )?;
    storage.kv.save()?;

    Ok(())
}
