//! Integration tests for rollcall-store
//!
//! These tests exercise the CSV table on a real filesystem.

use chrono::{DateTime, TimeZone, Utc};
use rollcall_domain::table::{has_unique_names, is_recency_ordered};
use rollcall_domain::traits::TableStore;
use rollcall_domain::{InterestSet, NormalizedRecord, TableRow};
use rollcall_store::{CsvTableStore, StoreError, StoreOptions};
use std::sync::Arc;
use std::thread;

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

fn interests(items: &[&str]) -> InterestSet {
    items.iter().collect()
}

fn record(name: &str, items: &[&str]) -> NormalizedRecord {
    NormalizedRecord {
        name: name.to_string(),
        interests: interests(items),
    }
}

#[test]
fn test_missing_table_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvTableStore::new(dir.path().join("results.csv"));

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvTableStore::new(dir.path().join("results.csv"));
    let rows = vec![
        TableRow::new("Ana Ruiz", interests(&["hiking", "cooking"]), at(3)),
        TableRow::new("Lee, Jr.", interests(&["chess"]), at(1)),
    ];

    store.save(&rows).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, rows);
    let contents = std::fs::read_to_string(store.path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("name,interests,last_updated"));
    assert_eq!(lines.next(), Some("Ana Ruiz,hiking; cooking,2024-05-03T12:00:00Z"));
    assert_eq!(lines.next(), Some("\"Lee, Jr.\",chess,2024-05-01T12:00:00Z"));
}

#[test]
fn test_ana_ruiz_scenario_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvTableStore::new(dir.path().join("results.csv"));
    store
        .save(&[TableRow::new("Ana Ruiz", interests(&["hiking"]), at(1))])
        .unwrap();

    let outcome = store.merge(&[record("ana ruiz", &["cooking"])], at(2)).unwrap();

    assert_eq!(outcome.updated, vec!["Ana Ruiz".to_string()]);
    assert!(outcome.inserted.is_empty());
    let rows = store.load().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ana Ruiz");
    assert_eq!(rows[0].interests, interests(&["hiking", "cooking"]));
    assert_eq!(rows[0].last_updated, at(2));
}

#[test]
fn test_merge_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvTableStore::new(dir.path().join("results.csv"));
    store
        .save(&[
            TableRow::new("Old Friend", interests(&["letters"]), at(1)),
            TableRow::new("Lee", interests(&["chess"]), at(2)),
        ])
        .unwrap();
    let batch = [record("lee", &["go"]), record("Mia", &["violin"])];

    store.merge(&batch, at(5)).unwrap();
    let once = std::fs::read_to_string(store.path()).unwrap();
    store.merge(&batch, at(5)).unwrap();
    let twice = std::fs::read_to_string(store.path()).unwrap();

    assert_eq!(once, twice);
    let rows = store.load().unwrap();
    assert!(is_recency_ordered(&rows));
    assert_eq!(rows.last().unwrap().name, "Old Friend");
}

#[test]
fn test_merge_with_separator_in_interest_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvTableStore::new(dir.path().join("results.csv"));
    let batch = [record("Lee", &["rock; roll"])];

    store.merge(&batch, at(5)).unwrap();
    let once = std::fs::read_to_string(store.path()).unwrap();
    store.merge(&batch, at(5)).unwrap();
    let twice = std::fs::read_to_string(store.path()).unwrap();

    assert_eq!(once, twice);
    assert!(once.contains("Lee,\"rock, roll\",2024-05-05T12:00:00Z"));
    assert_eq!(store.load().unwrap()[0].interests.len(), 1);
}

#[test]
fn test_reads_legacy_json_interests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "filename,name,interests\n\
         notes.docx,Ana Ruiz,\"[\"\"hiking\"\", \"\"tea\"\"]\"\n\
         notes.docx,Lee,[]\n",
    )
    .unwrap();
    let store = CsvTableStore::new(&path);

    let rows = store.load().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Ana Ruiz");
    assert_eq!(rows[0].interests, interests(&["hiking", "tea"]));
    assert!(rows[1].interests.is_empty());
}

#[test]
fn test_skips_bad_rows_and_collapses_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "name,interests,last_updated\n\
         Ana,hiking,2024-05-03T12:00:00Z\n\
         ,orphan,2024-05-03T12:00:00Z\n\
         Lee,chess,not-a-date\n\
         ANA,cooking,2024-05-01T12:00:00Z\n",
    )
    .unwrap();
    let store = CsvTableStore::new(&path);

    let rows = store.load().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ana");
    assert_eq!(rows[0].interests, interests(&["hiking", "cooking"]));
    assert_eq!(rows[0].last_updated, at(3));
}

#[test]
fn test_rejects_file_without_name_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.csv");
    std::fs::write(&path, "id,price\n1,9.99\n").unwrap();
    let store = CsvTableStore::new(&path);

    assert!(matches!(store.load(), Err(StoreError::InvalidData(_))));
    // A merge must not clobber a file it could not read
    assert!(store.merge(&[record("Lee", &["chess"])], at(1)).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "id,price\n1,9.99\n");
}

#[test]
fn test_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("results.csv");

    for options in [StoreOptions::default(), StoreOptions::unguarded()] {
        let store = CsvTableStore::with_options(&path, options);
        let err = store.merge(&[record("Lee", &["chess"])], at(1)).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. } | StoreError::Lock { .. }));
    }
}

#[test]
fn test_atomic_save_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvTableStore::new(dir.path().join("results.csv"));

    store.merge(&[record("Lee", &["chess"])], at(1)).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["results.csv".to_string(), "results.csv.lock".to_string()]);
}

#[test]
fn test_concurrent_merges_keep_every_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CsvTableStore::new(dir.path().join("results.csv")));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let name = format!("Person {}", i);
                store.merge(&[record(&name, &["reading"])], at(1 + i)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let rows = store.load().unwrap();
    assert_eq!(rows.len(), 8);
    assert!(has_unique_names(&rows));
    assert!(is_recency_ordered(&rows));
}
