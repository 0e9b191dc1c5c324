//! Store configuration

use serde::{Deserialize, Serialize};

/// How the CSV store guards its read-modify-write cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Hold an exclusive advisory lock on `<table>.lock` while merging
    pub lock: bool,

    /// Write to a temporary sibling file and rename it over the table
    pub atomic: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            lock: true,
            atomic: true,
        }
    }
}

impl StoreOptions {
    /// Plain full rewrite with no lock and no rename
    pub fn unguarded() -> Self {
        Self {
            lock: false,
            atomic: false,
        }
    }
}
