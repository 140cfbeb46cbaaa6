//! Record module
//!
//! Defines the normalized output record, the selectable process types, and
//! the builders that turn API results into records.

pub mod builders;
mod types;

pub use builders::{derive_successful_keywords, RecordBuilders};
pub use types::{ProcessType, Record, RecordContext, RecordKind, RecordPayload};
