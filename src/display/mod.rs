//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and status indicators.

pub mod budget;
pub mod import;

pub use budget::{format_budget_details, format_budget_list, format_budget_row};
pub use import::{format_import_result, format_preview, format_preview_row};
