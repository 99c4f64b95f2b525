//! YAML full-storage export
//!
//! Human-readable alternative to the JSON backup format.

use std::io::Write;

use crate::error::{OneDripError, OneDripResult};
use crate::storage::Storage;

use super::json::FullExport;

/// Write the full database as YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> OneDripResult<()> {
    let export = FullExport::from_storage(storage)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| OneDripError::Yaml(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OneDripPaths;
    use crate::models::{Budget, Money};
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_parses_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OneDripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage
            .budgets
            .upsert(Budget::new("Celular", "Tela", Money::from_cents(15000)))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();

        let parsed: FullExport = serde_yaml::from_slice(&output).unwrap();
        assert_eq!(parsed.budgets.len(), 1);
    }
}
