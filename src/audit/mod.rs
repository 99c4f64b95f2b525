//! Audit logging for the OneDrip CLI
//!
//! Records every mutating operation (budget create/update/delete, import
//! batches, exports) to an append-only JSONL log so changes can be traced
//! after the fact.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
