//! Rollcall Storage Layer
//!
//! Implements the `TableStore` trait for the people table.
//!
//! # Table format
//!
//! A CSV file with a header row and one row per person, most recently
//! updated first:
//!
//! ```text
//! name,interests,last_updated
//! Ana Ruiz,hiking; cooking,2024-06-01T09:30:00Z
//! Lee,chess,2024-01-15T17:02:11Z
//! ```
//!
//! Older tables whose `interests` column holds a JSON array are still read.
//!
//! # Stores
//!
//! - [`CsvTableStore`]: the persisted table, with optional locking and
//!   atomic replacement (see [`StoreOptions`])
//! - [`MemoryTableStore`]: shared in-memory rows for tests

#![warn(missing_docs)]

mod codec;
mod csv_store;
mod error;
mod memory;
mod options;

pub use codec::{decode_interests, encode_interests, format_timestamp, parse_timestamp, HEADER};
pub use csv_store::CsvTableStore;
pub use error::StoreError;
pub use memory::MemoryTableStore;
pub use options::StoreOptions;
