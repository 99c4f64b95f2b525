//! Data export for the OneDrip CLI
//!
//! CSV export of budgets (the format the importer reads back) and full
//! database snapshots in JSON or YAML for backups.

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_budgets_csv, export_filename, CSV_HEADER};
pub use json::{backup_filename, export_full_json, FullExport};
pub use yaml::export_full_yaml;
