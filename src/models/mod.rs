//! Core data models for the OneDrip CLI
//!
//! This module contains the data structures that represent the quoting
//! domain: budgets, money amounts, and entity identifiers.

pub mod budget;
pub mod ids;
pub mod money;

pub use budget::{Budget, BudgetStatus, BudgetValidationError};
pub use ids::BudgetId;
pub use money::Money;
