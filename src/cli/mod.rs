//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod budget;
pub mod export;
pub mod import;
pub mod status;

pub use backup::{handle_backup_command, BackupFormat};
pub use budget::{handle_budget_command, BudgetCommands};
pub use export::handle_export_command;
pub use import::handle_import_command;
pub use status::handle_status_command;
