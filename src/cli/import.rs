//! CLI command handler for CSV import
//!
//! Wires the import pipeline to the terminal: read the file, render the
//! validated preview, gate the import behind explicit confirmation, and
//! report the batch outcome.

use std::io::Write;
use std::path::Path;

use chrono::{Duration, Utc};

use crate::audit::{AuditEntry, AuditLogger};
use crate::cli::status::{LastImport, LAST_IMPORT_KEY};
use crate::config::Settings;
use crate::display::{format_import_result, format_preview};
use crate::error::{OneDripError, OneDripResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// How long the last-import summary stays visible in `onedrip status`
const LAST_IMPORT_TTL_DAYS: i64 = 30;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    audit: &AuditLogger,
    file: &str,
    assume_yes: bool,
) -> OneDripResult<()> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(OneDripError::Import(format!(
            "Arquivo não encontrado: {}",
            file
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| OneDripError::Import(format!("Falha ao ler o arquivo: {}", e)))?;

    let import_service = ImportService::new(storage);
    let preview = import_service.parse_preview(&content)?;

    println!("Pré-visualização de '{}'", file);
    println!("{}", "=".repeat(40));
    print!("{}", format_preview(&preview));

    if preview.valid_count() == 0 {
        println!("Nenhuma linha válida; nada foi importado.");
        return Ok(());
    }

    if !assume_yes && !confirm(preview.valid_count())? {
        println!("Importação cancelada; nada foi alterado.");
        return Ok(());
    }

    let result = import_service.import_from_preview(&preview)?;

    println!();
    print!(
        "{}",
        format_import_result(&result, settings.import_error_sample)
    );

    audit.log(&AuditEntry::import_batch(result.success, result.errors.len()))?;

    storage.kv.set(
        LAST_IMPORT_KEY,
        &LastImport {
            at: Utc::now(),
            success: result.success,
            error_count: result.errors.len(),
        },
        Some(Duration::days(LAST_IMPORT_TTL_DAYS)),
    )?;
    storage.kv.save()?;

    Ok(())
}

/// Ask the user to confirm importing the valid rows
fn confirm(valid_count: usize) -> OneDripResult<bool> {
    print!("Importar {} linha(s) válida(s)? [s/N] ", valid_count);
    std::io::stdout()
        .flush()
        .map_err(|e| OneDripError::Io(e.to_string()))?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| OneDripError::Io(e.to_string()))?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "sim"))
}
