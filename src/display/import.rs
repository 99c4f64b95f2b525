//! Import preview and result display formatting

use crate::services::{ImportPreview, ImportPreviewRow, ImportResult};

use super::budget::truncate;

/// Format one preview row with its validity marker
pub fn format_preview_row(row: &ImportPreviewRow) -> String {
    let marker = if row.is_valid { "✓" } else { "✗" };

    let mut output = format!(
        "{} linha {:>3}  {:12} {:28} {:>12}",
        marker,
        row.line_number,
        truncate(&row.device_type, 12),
        truncate(&row.service_description, 28),
        row.cash_price.to_string(),
    );

    for error in &row.errors {
        output.push_str(&format!("\n      ! {}", error));
    }

    output
}

/// Format the whole preview as a table with a validity summary
pub fn format_preview(preview: &ImportPreview) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:1} {:>9}  {:12} {:28} {:>12}\n",
        "", "Linha", "Aparelho", "Serviço", "À vista"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for row in &preview.rows {
        output.push_str(&format_preview_row(row));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "{} linha(s) válida(s), {} inválida(s)\n",
        preview.valid_count(),
        preview.invalid_count()
    ));

    output
}

/// Format the outcome of a confirmed import
///
/// Shows the success count, and when rows failed, the error count plus a
/// truncated sample of the messages.
pub fn format_import_result(result: &ImportResult, error_sample: usize) -> String {
    let mut output = format!("{} orçamento(s) importado(s)\n", result.success);

    if !result.errors.is_empty() {
        output.push_str(&format!("{} linha(s) com erro:\n", result.errors.len()));
        for error in result.errors.iter().take(error_sample) {
            output.push_str(&format!("  {}\n", error));
        }
        if result.errors.len() > error_sample {
            output.push_str(&format!(
                "  ... e mais {}\n",
                result.errors.len() - error_sample
            ));
        }
    }

    output
}
