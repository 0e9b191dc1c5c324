//! Command implementations.

pub mod config;
pub mod ingest;
pub mod show;

pub use self::config::execute_config;
pub use self::ingest::execute_ingest;
pub use self::show::execute_show;

use crate::config::Config;
use rollcall_store::{CsvTableStore, StoreOptions};
use std::path::Path;

/// Open the table named by `out`, falling back to the configured path.
pub(crate) fn open_store(out: Option<&Path>, options: StoreOptions, config: &Config) -> CsvTableStore {
    let path = out.unwrap_or(&config.store.path);
    CsvTableStore::with_options(path, options)
}
