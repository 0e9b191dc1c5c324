//! Rollcall Domain Layer
//!
//! This crate contains the data model and the pure merge logic for Rollcall.
//! Apart from `chrono` for timestamps it has no external dependencies, and it
//! defines the trait interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **PersonRecord**: A raw `{name, interests}` entry as returned by the completion service
//! - **NormalizedRecord**: A trimmed, deduplicated record ready to be merged
//! - **TableRow**: A persisted row keyed by case-insensitive name
//! - **Upsert**: Union interests into existing rows, insert new ones, re-sort by recency
//!
//! ## Data Flow
//!
//! ```text
//! PersonRecord → normalize → NormalizedRecord → upsert → TableRow (recency order)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod interests;
pub mod normalize;
pub mod person;
pub mod table;
pub mod traits;

// Re-exports for convenience
pub use interests::{InterestSet, INTEREST_SEPARATOR};
pub use normalize::{normalize, normalize_name, normalize_record};
pub use person::{name_key, NormalizedRecord, PersonRecord};
pub use table::{merge_records, upsert, TableRow, UpsertOutcome};
