//! In-memory table store for tests and dry runs

use crate::StoreError;
use rollcall_domain::traits::TableStore;
use rollcall_domain::TableRow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Table store that keeps rows in memory
///
/// Clones share the same rows, so a test can hand one clone to the pipeline
/// and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<TableRow>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryTableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `rows`
    pub fn with_rows(rows: Vec<TableRow>) -> Self {
        let store = Self::default();
        store.state().rows = rows;
        store
    }

    /// Make every subsequent save fail, as an unwritable destination would
    pub fn fail_saves(&self) {
        self.state().fail_saves = true;
    }

    /// Current rows
    pub fn rows(&self) -> Vec<TableRow> {
        self.state().rows.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.state().saves
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableStore for MemoryTableStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<TableRow>, Self::Error> {
        Ok(self.rows())
    }

    fn save(&self, rows: &[TableRow]) -> Result<(), Self::Error> {
        let mut state = self.state();
        if state.fail_saves {
            return Err(StoreError::io(
                "<memory>",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "store is read-only"),
            ));
        }
        state.rows = rows.to_vec();
        state.saves += 1;
        Ok(())
    }
}
