//! CSV-backed table store

use crate::codec::{StoredRow, HEADER};
use crate::{StoreError, StoreOptions};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use rollcall_domain::table::collapse_duplicates;
use rollcall_domain::traits::TableStore;
use rollcall_domain::{merge_records, NormalizedRecord, TableRow, UpsertOutcome};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Table store persisting rows to a CSV file
///
/// Every save rewrites the whole file. With the default [`StoreOptions`] a
/// merge holds an exclusive advisory lock on `<table>.lock` from load to
/// save, and the new contents are written to a temporary sibling that is
/// renamed over the table.
///
/// # Examples
///
/// ```no_run
/// use rollcall_domain::traits::TableStore;
/// use rollcall_store::CsvTableStore;
///
/// let store = CsvTableStore::new("results.csv");
/// for row in store.load()? {
///     println!("{}: {}", row.name, row.interests);
/// }
/// # Ok::<(), rollcall_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    path: PathBuf,
    options: StoreOptions,
}

impl CsvTableStore {
    /// Create a store for `path` with default options
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, StoreOptions::default())
    }

    /// Create a store for `path` with explicit options
    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Path of the table file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Options in effect
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Path of the advisory lock file next to the table
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "table".into());
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn acquire_lock(&self) -> Result<Option<TableLock>, StoreError> {
        if !self.options.lock {
            return Ok(None);
        }

        let path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::Lock {
                path: path.clone(),
                source,
            })?;

        if file.try_lock_exclusive().is_err() {
            info!("Waiting for another writer to release {}", path.display());
            file.lock_exclusive().map_err(|source| StoreError::Lock {
                path: path.clone(),
                source,
            })?;
        }
        debug!("Locked {}", path.display());

        Ok(Some(TableLock { file, path }))
    }

    fn read_rows(&self) -> Result<Vec<TableRow>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| StoreError::csv(&self.path, e))?
            .clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if !headers.iter().any(|header| header == "name") {
            return Err(StoreError::InvalidData(format!(
                "{} has no 'name' column (found: {})",
                self.path.display(),
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.deserialize::<StoredRow>().enumerate() {
            // Header is line 1
            let line = index + 2;
            match result.map_err(|e| e.to_string()).and_then(StoredRow::into_row) {
                Ok(row) => rows.push(row),
                Err(reason) => warn!("Skipping line {} of {}: {}", line, self.path.display(), reason),
            }
        }

        let loaded = rows.len();
        let rows = collapse_duplicates(rows);
        if rows.len() < loaded {
            warn!(
                "Collapsed {} duplicate name(s) in {}",
                loaded - rows.len(),
                self.path.display()
            );
        }

        debug!("Loaded {} row(s) from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    fn write_rows(&self, rows: &[TableRow]) -> Result<(), StoreError> {
        if !self.options.atomic {
            let file = File::create(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
            return write_csv(file, rows).map_err(|e| StoreError::csv(&self.path, e));
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::Builder::new()
            .prefix(".rollcall-")
            .suffix(".csv.tmp")
            .tempfile_in(dir)
            .map_err(|e| StoreError::io(&self.path, e))?;

        write_csv(temp.as_file_mut(), rows).map_err(|e| StoreError::csv(&self.path, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(&self.path, e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        Ok(())
    }
}

fn write_csv<W: Write>(writer: W, rows: &[TableRow]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(StoredRow::from_row(row))?;
    }
    writer.flush()?;
    Ok(())
}

impl TableStore for CsvTableStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<TableRow>, Self::Error> {
        self.read_rows()
    }

    fn save(&self, rows: &[TableRow]) -> Result<(), Self::Error> {
        let _lock = self.acquire_lock()?;
        self.write_rows(rows)?;
        info!("Wrote {} row(s) to {}", rows.len(), self.path.display());
        Ok(())
    }

    fn merge(&self, records: &[NormalizedRecord], now: DateTime<Utc>) -> Result<UpsertOutcome, Self::Error> {
        let _lock = self.acquire_lock()?;

        let existing = self.read_rows()?;
        let outcome = merge_records(existing, records, now);
        self.write_rows(&outcome.rows)?;

        info!(
            "Merged {} record(s) into {}: {} inserted, {} updated, {} row(s) total",
            records.len(),
            self.path.display(),
            outcome.inserted.len(),
            outcome.updated.len(),
            outcome.rows.len()
        );
        Ok(outcome)
    }
}

/// Exclusive lock held for the lifetime of the guard
struct TableLock {
    file: File,
    path: PathBuf,
}

impl Drop for TableLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to unlock {}: {}", self.path.display(), e);
        } else {
            debug!("Unlocked {}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path_is_sibling() {
        let store = CsvTableStore::new("/data/results.csv");
        assert_eq!(store.lock_path(), PathBuf::from("/data/results.csv.lock"));

        let bare = CsvTableStore::new("results.csv");
        assert_eq!(bare.lock_path(), PathBuf::from("results.csv.lock"));
    }

    #[test]
    fn test_unlocked_store_creates_no_lock_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvTableStore::with_options(dir.path().join("t.csv"), StoreOptions::unguarded());

        store.save(&[]).unwrap();

        assert!(!store.lock_path().exists());
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.trim(), "name,interests,last_updated");
    }
}
