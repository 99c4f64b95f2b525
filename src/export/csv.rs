//! CSV export functionality
//!
//! Serializes budgets to the `;`-delimited text format the importer reads
//! back. Currency values leave the centavo representation only here, at
//! the file boundary.

use chrono::{DateTime, NaiveDate, Utc};
use std::io::Write;

use crate::error::{OneDripError, OneDripResult};
use crate::models::Budget;

/// Header row written before the data rows
pub const CSV_HEADER: &str = "Tipo Aparelho;Serviço/Aparelho;Qualidade;Observações;\
                              Preço à Vista;Preço Parcelado;Parcelas;Método de Pagamento;\
                              Garantia (meses);Validade (dias);Inclui Entrega;Inclui Película";

/// Build the timestamped export filename ("orcamentos_2026-08-07.csv")
pub fn export_filename(date: NaiveDate) -> String {
    format!("orcamentos_{}.csv", date.format("%Y-%m-%d"))
}

/// Write budgets as `;`-delimited CSV
///
/// `now` anchors the validity-days derivation so output is reproducible in
/// tests. The caller is responsible for skipping file creation when there
/// is nothing to export.
pub fn export_budgets_csv<W: Write>(
    budgets: &[Budget],
    writer: &mut W,
    now: DateTime<Utc>,
) -> OneDripResult<()> {
    writeln!(writer, "{}", CSV_HEADER)
        .map_err(|e| OneDripError::Export(e.to_string()))?;

    for budget in budgets {
        writeln!(writer, "{}", render_row(budget, now))
            .map_err(|e| OneDripError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Render one budget as a data row
fn render_row(budget: &Budget, now: DateTime<Utc>) -> String {
    let columns = [
        escape_csv(&budget.device_type),
        escape_csv(&budget.service_description),
        escape_csv(budget.part_quality.as_deref().unwrap_or("")),
        escape_csv(budget.notes.as_deref().unwrap_or("")),
        budget.cash_price.to_decimal_string(),
        budget.installment_price.to_decimal_string(),
        budget.installments.to_string(),
        escape_csv(budget.payment_method.as_deref().unwrap_or("")),
        budget.warranty_months.to_string(),
        budget.validity_days_from(now).to_string(),
        yes_no(budget.includes_delivery),
        yes_no(budget.includes_screen_protector),
    ];

    columns.join(";")
}

/// Render a boolean as the yes/no token the importer matches against
fn yes_no(value: bool) -> String {
    if value { "Sim" } else { "Não" }.to_string()
}

/// Escape a field for the `;`-delimited format
fn escape_csv(s: &str) -> String {
    if s.contains(';') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OneDripPaths;
    use crate::models::Money;
    use crate::services::ImportService;
    use crate::storage::Storage;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_budget() -> Budget {
        let mut budget = Budget::new("Celular", "iPhone 12 Tela", Money::from_cents(15000));
        budget.part_quality = Some("A".to_string());
        budget.notes = Some("Sem obs".to_string());
        budget.installment_price = Money::from_cents(16000);
        budget.installments = 2;
        budget.payment_method = Some("Cartão".to_string());
        budget.warranty_months = 3;
        budget.includes_delivery = true;
        budget
    }

    #[test]
    fn test_export_header_and_row() {
        let now = Utc::now();
        let mut budget = test_budget();
        budget.valid_until = Some(now + Duration::days(30));

        let mut output = Vec::new();
        export_budgets_csv(&[budget], &mut output, now).unwrap();

        let csv = String::from_utf8(output).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER);
        assert_eq!(
            lines.next().unwrap(),
            "Celular;iPhone 12 Tela;A;Sem obs;150.00;160.00;2;Cartão;3;30;Sim;Não"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_no_expiry_exports_zero_validity() {
        let now = Utc::now();
        let mut output = Vec::new();
        export_budgets_csv(&[test_budget()], &mut output, now).unwrap();

        let csv = String::from_utf8(output).unwrap();
        let row = csv.lines().nth(1).unwrap();
        let columns: Vec<&str> = row.split(';').collect();
        assert_eq!(columns[9], "0");
    }

    #[test]
    fn test_fields_with_delimiter_are_quoted() {
        let now = Utc::now();
        let mut budget = test_budget();
        budget.notes = Some("meia tela; resto depois".to_string());

        let mut output = Vec::new();
        export_budgets_csv(&[budget], &mut output, now).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert!(csv.contains("\"meia tela; resto depois\""));
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(export_filename(date), "orcamentos_2026-08-07.csv");
    }

    #[test]
    fn test_export_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OneDripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let now = Utc::now();
        let budgets = vec![
            {
                let mut b = test_budget();
                b.valid_until = Some(now + Duration::days(30));
                b
            },
            {
                let mut b = Budget::new("Notebook", "Troca de teclado", Money::from_cents(30000));
                b.notes = Some("meia tela; resto depois".to_string());
                b
            },
        ];

        let mut output = Vec::new();
        export_budgets_csv(&budgets, &mut output, now).unwrap();
        let csv = String::from_utf8(output).unwrap();

        let import = ImportService::new(&storage);
        let preview = import.parse_preview(&csv).unwrap();

        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.valid_count(), 2);

        let first = &preview.rows[0];
        assert_eq!(first.device_type, "Celular");
        assert_eq!(first.cash_price.cents(), 15000);
        assert_eq!(first.installment_price.cents(), 16000);
        assert_eq!(first.installments, 2);
        assert_eq!(first.warranty_months, 3);
        assert_eq!(first.validity_days, 30);
        assert!(first.includes_delivery);
        assert!(!first.includes_screen_protector);

        // Quoted field with an embedded delimiter survives the trip
        let second = &preview.rows[1];
        assert_eq!(second.notes.as_deref(), Some("meia tela; resto depois"));
    }
}
