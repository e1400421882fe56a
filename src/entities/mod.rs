//! Rows read from and written back to the snapshot
//!
//! Row ids are `BIGINT` primary keys. Every PII column is nullable and read as
//! `Option<String>` so NULL and empty stay distinguishable.

pub mod addresses;
pub mod organizations;
pub mod receipts;
pub mod users;

// Type re-exports
pub use addresses::*;
pub use organizations::*;
pub use receipts::*;
pub use users::*;

/// Primary key of every table the anonymizer touches
pub type RowId = i64;
