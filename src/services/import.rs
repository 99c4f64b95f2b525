//! CSV budget import service
//!
//! Turns an uploaded `;`-delimited file into validated preview rows, holds
//! them for explicit confirmation, and persists only the valid subset,
//! tolerating individual row failures without aborting the batch.

use csv::{ReaderBuilder, StringRecord};

use crate::error::{OneDripError, OneDripResult};
use crate::models::Money;
use crate::services::budget::{BudgetService, CreateBudgetInput};
use crate::storage::Storage;

/// Number of columns a data row must provide
pub const EXPECTED_COLUMNS: usize = 12;

/// A decoded and validated representation of one input line
///
/// Numeric fields degrade to safe defaults when malformed so a broken row
/// can still be rendered in the preview table; `errors` carries every
/// problem found, and `is_valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreviewRow {
    /// Source line number (1-based, counting the header as line 1)
    pub line_number: usize,
    pub device_type: String,
    pub service_description: String,
    pub part_quality: Option<String>,
    pub notes: Option<String>,
    pub cash_price: Money,
    pub installment_price: Money,
    pub installments: u32,
    pub payment_method: Option<String>,
    pub warranty_months: u32,
    pub validity_days: i64,
    pub includes_delivery: bool,
    pub includes_screen_protector: bool,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Parsed rows held pending explicit confirmation
///
/// Cancelling is simply dropping the preview; nothing has been persisted
/// yet. Confirming hands only the valid subset to the importer.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    pub rows: Vec<ImportPreviewRow>,
}

impl ImportPreview {
    /// Rows that passed validation, in file order
    pub fn valid_rows(&self) -> Vec<&ImportPreviewRow> {
        self.rows.iter().filter(|r| r.is_valid).collect()
    }

    /// Number of rows that passed validation
    pub fn valid_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_valid).count()
    }

    /// Number of rows that failed validation
    pub fn invalid_count(&self) -> usize {
        self.rows.len() - self.valid_count()
    }
}

/// Aggregate outcome of a confirmed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of rows persisted successfully
    pub success: usize,
    /// One "Linha N: message" entry per failed persistence attempt
    pub errors: Vec<String>,
}

/// Service for CSV budget import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse raw file content into an ordered preview
    ///
    /// Structural problems (fewer than two non-blank lines) fail the whole
    /// operation; per-row problems never do, they are recorded on the row.
    /// The header line is discarded without inspecting its content.
    pub fn parse_preview(&self, content: &str) -> OneDripResult<ImportPreview> {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        if lines.len() < 2 {
            return Err(OneDripError::Import(
                "Arquivo deve conter um cabeçalho e pelo menos uma linha de dados".to_string(),
            ));
        }

        // Re-join the non-blank data lines so line numbers stay stable
        // regardless of blank lines in the original file
        let data = lines[1..].join("\n");

        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let line_number = i + 2;
            let row = match result {
                Ok(record) => decode_record(&record, line_number),
                Err(e) => unreadable_row(line_number, format!("Erro ao ler a linha: {}", e)),
            };
            rows.push(row);
        }

        Ok(ImportPreview { rows })
    }

    /// Persist the valid subset of a confirmed preview
    ///
    /// Rows are written strictly sequentially, in file order. A failing row
    /// is recorded as "Linha N: message" and does not stop the loop; rows
    /// already persisted are never rolled back. Confirming a preview with
    /// zero valid rows is blocked.
    pub fn import_from_preview(&self, preview: &ImportPreview) -> OneDripResult<ImportResult> {
        let valid = preview.valid_rows();
        if valid.is_empty() {
            return Err(OneDripError::Import(
                "Nenhuma linha válida para importar".to_string(),
            ));
        }

        let budget_service = BudgetService::new(self.storage);
        let mut result = ImportResult::default();

        for row in valid {
            let input = CreateBudgetInput {
                device_type: row.device_type.clone(),
                service_description: row.service_description.clone(),
                part_quality: row.part_quality.clone(),
                notes: row.notes.clone(),
                client_name: None,
                cash_price: row.cash_price,
                installment_price: row.installment_price,
                installments: row.installments,
                payment_method: row.payment_method.clone(),
                warranty_months: row.warranty_months,
                validity_days: row.validity_days,
                includes_delivery: row.includes_delivery,
                includes_screen_protector: row.includes_screen_protector,
            };

            match budget_service.create(input) {
                Ok(_) => result.success += 1,
                Err(e) => {
                    let message = match e {
                        OneDripError::Validation(m) => m,
                        other => other.to_string(),
                    };
                    result
                        .errors
                        .push(format!("Linha {}: {}", row.line_number, message));
                }
            }
        }

        // Flush the batch; a failure here is batch-level and fatal
        self.storage.budgets.save()?;

        Ok(result)
    }
}

/// Decode and validate one delimited record
///
/// Field checks are independent and cumulative: every problem is recorded
/// so the caller can display all of them at once. Validation never fails
/// the operation.
fn decode_record(record: &StringRecord, line_number: usize) -> ImportPreviewRow {
    let mut errors = Vec::new();

    if record.len() < EXPECTED_COLUMNS {
        errors.push(format!(
            "Número insuficiente de colunas ({}/{})",
            record.len(),
            EXPECTED_COLUMNS
        ));
    }

    let device_type = column(record, 0);
    if device_type.is_empty() {
        errors.push("Tipo de aparelho obrigatório".to_string());
    }

    let service_description = column(record, 1);
    if service_description.is_empty() {
        errors.push("Serviço/Aparelho obrigatório".to_string());
    }

    // Columns beyond the required three parse leniently: malformed numbers
    // degrade to defaults instead of producing errors
    let cash_price = Money::parse_decimal_or_zero(&column(record, 4));
    if !cash_price.is_positive() {
        errors.push("Preço à vista deve ser maior que 0".to_string());
    }

    let installment_price = Money::parse_decimal_or_zero(&column(record, 5));
    let installments = column(record, 6).parse::<u32>().unwrap_or(1);
    let warranty_months = column(record, 8).parse::<u32>().unwrap_or(0);
    let validity_days = column(record, 9).parse::<i64>().unwrap_or(0);

    let includes_delivery = column(record, 10).eq_ignore_ascii_case("sim");
    let includes_screen_protector = column(record, 11).eq_ignore_ascii_case("sim");

    let is_valid = errors.is_empty();

    ImportPreviewRow {
        line_number,
        device_type,
        service_description,
        part_quality: optional_column(record, 2),
        notes: optional_column(record, 3),
        cash_price,
        installment_price,
        installments,
        payment_method: optional_column(record, 7),
        warranty_months,
        validity_days,
        includes_delivery,
        includes_screen_protector,
        is_valid,
        errors,
    }
}

/// Get a trimmed column value; missing columns read as empty
fn column(record: &StringRecord, index: usize) -> String {
    record.get(index).map(str::trim).unwrap_or("").to_string()
}

/// Get a trimmed optional column value; empty reads as None
fn optional_column(record: &StringRecord, index: usize) -> Option<String> {
    let value = column(record, index);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Placeholder row for a line the CSV reader could not decode
fn unreadable_row(line_number: usize, message: String) -> ImportPreviewRow {
    ImportPreviewRow {
        line_number,
        device_type: String::new(),
        service_description: String::new(),
        part_quality: None,
        notes: None,
        cash_price: Money::zero(),
        installment_price: Money::zero(),
        installments: 1,
        payment_method: None,
        warranty_months: 0,
        validity_days: 0,
        includes_delivery: false,
        includes_screen_protector: false,
        is_valid: false,
        errors: vec![message],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OneDripPaths;
    use tempfile::TempDir;

    const HEADER: &str = "Tipo Aparelho;Serviço/Aparelho;Qualidade;Observações;Preço à Vista;\
                          Preço Parcelado;Parcelas;Método de Pagamento;Garantia (meses);\
                          Validade (dias);Inclui Entrega;Inclui Película";

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OneDripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn file_with_rows(rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content
    }

    #[test]
    fn test_parse_complete_row() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content =
            file_with_rows(&["Celular;iPhone 12 Tela;A;Sem obs;150,00;160,00;2;Cartão;3;30;sim;não"]);
        let preview = service.parse_preview(&content).unwrap();

        assert_eq!(preview.rows.len(), 1);
        let row = &preview.rows[0];
        assert_eq!(row.line_number, 2);
        assert_eq!(row.device_type, "Celular");
        assert_eq!(row.service_description, "iPhone 12 Tela");
        assert_eq!(row.part_quality.as_deref(), Some("A"));
        assert_eq!(row.notes.as_deref(), Some("Sem obs"));
        assert_eq!(row.cash_price.cents(), 15000);
        assert_eq!(row.installment_price.cents(), 16000);
        assert_eq!(row.installments, 2);
        assert_eq!(row.payment_method.as_deref(), Some("Cartão"));
        assert_eq!(row.warranty_months, 3);
        assert_eq!(row.validity_days, 30);
        assert!(row.includes_delivery);
        assert!(!row.includes_screen_protector);
        assert!(row.is_valid);
        assert!(row.errors.is_empty());
    }

    #[test]
    fn test_empty_required_fields_accumulate_errors() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&[";;;;0;0;1;;0;0;não;não"]);
        let preview = service.parse_preview(&content).unwrap();

        let row = &preview.rows[0];
        assert!(!row.is_valid);
        assert!(row.errors.contains(&"Tipo de aparelho obrigatório".to_string()));
        assert!(row.errors.contains(&"Serviço/Aparelho obrigatório".to_string()));
        assert!(row
            .errors
            .contains(&"Preço à vista deve ser maior que 0".to_string()));
    }

    #[test]
    fn test_too_few_columns() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&["Celular;Tela;A;obs;150,00"]);
        let preview = service.parse_preview(&content).unwrap();

        let row = &preview.rows[0];
        assert!(!row.is_valid);
        assert!(row
            .errors
            .contains(&"Número insuficiente de colunas (5/12)".to_string()));
        // Field-level checks still ran on the columns that exist
        assert_eq!(row.device_type, "Celular");
        assert_eq!(row.cash_price.cents(), 15000);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&[
            "Celular;Tela;A;obs;150,00;160,00;2;Cartão;3;30;sim;não;extra;mais-extra",
        ]);
        let preview = service.parse_preview(&content).unwrap();

        let row = &preview.rows[0];
        assert!(row.is_valid);
        assert_eq!(row.installments, 2);
    }

    #[test]
    fn test_malformed_numbers_degrade_to_defaults() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&["Celular;Tela;;;150,00;abc;xyz;;n/a;n/a;talvez;sim"]);
        let preview = service.parse_preview(&content).unwrap();

        let row = &preview.rows[0];
        assert!(row.is_valid);
        assert_eq!(row.installment_price.cents(), 0);
        assert_eq!(row.installments, 1);
        assert_eq!(row.warranty_months, 0);
        assert_eq!(row.validity_days, 0);
        assert!(!row.includes_delivery);
        assert!(row.includes_screen_protector);
    }

    #[test]
    fn test_unparseable_cash_price_fails_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&["Celular;Tela;;;grátis;0;1;;0;0;não;não"]);
        let preview = service.parse_preview(&content).unwrap();

        let row = &preview.rows[0];
        assert!(!row.is_valid);
        assert_eq!(row.cash_price.cents(), 0);
        assert!(row
            .errors
            .contains(&"Preço à vista deve ser maior que 0".to_string()));
    }

    #[test]
    fn test_sim_token_case_insensitive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&["Celular;Tela;;;150,00;0;1;;0;0;SIM;Sim"]);
        let preview = service.parse_preview(&content).unwrap();

        let row = &preview.rows[0];
        assert!(row.includes_delivery);
        assert!(row.includes_screen_protector);
    }

    #[test]
    fn test_blank_lines_filtered() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = format!(
            "{}\n\nCelular;Tela;;;150,00;0;1;;0;0;não;não\n   \n\n",
            HEADER
        );
        let preview = service.parse_preview(&content).unwrap();

        assert_eq!(preview.rows.len(), 1);
        assert_eq!(preview.rows[0].line_number, 2);
    }

    #[test]
    fn test_header_only_file_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let err = service.parse_preview(HEADER).unwrap_err();
        assert!(matches!(err, OneDripError::Import(_)));

        let err = service.parse_preview("").unwrap_err();
        assert!(matches!(err, OneDripError::Import(_)));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&[
            "Celular;Tela;;;150,00;160,00;2;Cartão;3;30;sim;não",
            ";;;;0;0;1;;0;0;não;não",
        ]);

        let first = service.parse_preview(&content).unwrap();
        let second = service.parse_preview(&content).unwrap();

        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_import_skips_invalid_rows() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&[
            "Celular;Tela frontal;;;150,00;0;1;;0;0;não;não",
            ";;;;0;0;1;;0;0;não;não",
            "Notebook;Troca de teclado;;;300,00;0;1;;0;0;não;não",
            "Celular;Sem preço;;;0;0;1;;0;0;não;não",
            "Tablet;Bateria;;;120,00;0;1;;0;0;sim;não",
        ]);
        let preview = service.parse_preview(&content).unwrap();
        assert_eq!(preview.valid_count(), 3);
        assert_eq!(preview.invalid_count(), 2);

        let result = service.import_from_preview(&preview).unwrap();
        assert_eq!(result.success, 3);
        assert!(result.errors.is_empty());
        assert_eq!(storage.budgets.count_active().unwrap(), 3);
    }

    #[test]
    fn test_import_partial_failure_continues() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        // The middle row passes preview validation but is rejected at
        // persistence time (zero installments)
        let content = file_with_rows(&[
            "Celular;Tela;;;150,00;0;1;;0;0;não;não",
            "Celular;Bateria;;;90,00;90,00;0;;0;0;não;não",
            "Notebook;Teclado;;;300,00;0;1;;0;0;não;não",
        ]);
        let preview = service.parse_preview(&content).unwrap();
        assert_eq!(preview.valid_count(), 3);

        let result = service.import_from_preview(&preview).unwrap();
        assert_eq!(result.success, 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Linha 3:"));
        assert_eq!(storage.budgets.count_active().unwrap(), 2);
    }

    #[test]
    fn test_import_blocked_when_no_valid_rows() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&[";;;;0;0;1;;0;0;não;não"]);
        let preview = service.parse_preview(&content).unwrap();
        assert_eq!(preview.valid_count(), 0);

        let err = service.import_from_preview(&preview).unwrap_err();
        assert!(matches!(err, OneDripError::Import(_)));
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_imported_budget_defaults_and_expiry() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = file_with_rows(&[
            "Celular;Tela;;;150,00;160,00;2;Cartão;3;30;sim;não",
            "Notebook;Teclado;;;300,00;0;1;;0;0;não;não",
        ]);
        let preview = service.parse_preview(&content).unwrap();
        service.import_from_preview(&preview).unwrap();

        let budgets = storage.budgets.list_active().unwrap();
        assert_eq!(budgets.len(), 2);

        for budget in &budgets {
            assert_eq!(budget.status, crate::models::BudgetStatus::Pending);
            assert!(!budget.is_paid);
            assert!(!budget.is_delivered);
        }

        let with_expiry = budgets
            .iter()
            .find(|b| b.device_type == "Celular")
            .unwrap();
        assert!(with_expiry.valid_until.is_some());

        let without_expiry = budgets
            .iter()
            .find(|b| b.device_type == "Notebook")
            .unwrap();
        assert!(without_expiry.valid_until.is_none());
    }
}
