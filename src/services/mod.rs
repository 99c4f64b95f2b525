//! Service layer for the OneDrip CLI
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and the import pipeline.

pub mod budget;
pub mod import;

pub use budget::{BudgetService, CreateBudgetInput};
pub use import::{ImportPreview, ImportPreviewRow, ImportResult, ImportService};
