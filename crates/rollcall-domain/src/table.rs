//! Table rows and the upsert algorithm
//!
//! The table is an ordered sequence of rows, most recently updated first,
//! with no two rows sharing a case-insensitive name.

use crate::{name_key, InterestSet, NormalizedRecord};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A persisted row of the people table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Canonical name (first-seen casing)
    pub name: String,

    /// Union of every interest seen for this person
    pub interests: InterestSet,

    /// When this row was last inserted or merged into
    pub last_updated: DateTime<Utc>,
}

impl TableRow {
    /// Create a new row
    pub fn new(name: impl Into<String>, interests: InterestSet, last_updated: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            interests,
            last_updated,
        }
    }

    /// Case-insensitive key of this row
    pub fn key(&self) -> String {
        name_key(&self.name)
    }
}

/// Result of merging a batch of records into a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The full table in recency order
    pub rows: Vec<TableRow>,

    /// Names of rows created by this batch, in first-seen order
    pub inserted: Vec<String>,

    /// Names of pre-existing rows touched by this batch, in first-touched order
    pub updated: Vec<String>,
}

/// Merge records into existing rows and return the re-sorted table
///
/// See [`merge_records`] for the algorithm.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rollcall_domain::{upsert, InterestSet, NormalizedRecord, TableRow};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let existing = vec![TableRow::new("Ana Ruiz", ["hiking"].into_iter().collect(), t0)];
/// let batch = vec![NormalizedRecord {
///     name: "ana ruiz".to_string(),
///     interests: ["cooking"].into_iter().collect(),
/// }];
///
/// let rows = upsert(existing, &batch, t1);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].name, "Ana Ruiz");
/// assert_eq!(rows[0].last_updated, t1);
/// ```
pub fn upsert(existing: Vec<TableRow>, records: &[NormalizedRecord], now: DateTime<Utc>) -> Vec<TableRow> {
    merge_records(existing, records, now).rows
}

/// Merge records into existing rows, reporting which names were touched
///
/// 1. Rows are indexed by case-insensitive name.
/// 2. A record matching a row unions its interests into the row and sets
///    `last_updated` to `now`. A record matching nothing appends a new row,
///    which later records in the same batch can then match.
/// 3. All rows are stable-sorted by `last_updated` descending, so rows
///    sharing a timestamp keep their stored order.
///
/// Applying the same batch twice with the same `now` yields the same table as
/// applying it once.
pub fn merge_records(
    existing: Vec<TableRow>,
    records: &[NormalizedRecord],
    now: DateTime<Utc>,
) -> UpsertOutcome {
    let mut rows = existing;
    let existing_len = rows.len();

    let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len() + records.len());
    for (position, row) in rows.iter().enumerate() {
        index.entry(row.key()).or_insert(position);
    }

    let mut touched = vec![false; existing_len];
    let mut inserted = Vec::new();
    let mut updated = Vec::new();

    for record in records {
        match index.get(&record.key()) {
            Some(&position) => {
                let row = &mut rows[position];
                row.interests.union_with(&record.interests);
                row.last_updated = now;
                if position < existing_len && !touched[position] {
                    touched[position] = true;
                    updated.push(row.name.clone());
                }
            }
            None => {
                index.insert(record.key(), rows.len());
                rows.push(TableRow::new(record.name.clone(), record.interests.clone(), now));
                inserted.push(record.name.clone());
            }
        }
    }

    sort_by_recency(&mut rows);

    UpsertOutcome {
        rows,
        inserted,
        updated,
    }
}

/// Stable sort, most recently updated first
pub fn sort_by_recency(rows: &mut [TableRow]) {
    rows.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
}

/// Collapse rows sharing a case-insensitive name into the first occurrence
///
/// Later duplicates contribute their interests and, if newer, their timestamp.
/// The result is re-sorted by recency. Used to repair tables edited by hand.
pub fn collapse_duplicates(rows: Vec<TableRow>) -> Vec<TableRow> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    let mut collapsed: Vec<TableRow> = Vec::with_capacity(rows.len());

    for row in rows {
        match index.get(&row.key()) {
            Some(&position) => {
                let kept = &mut collapsed[position];
                kept.interests.union_with(&row.interests);
                if row.last_updated > kept.last_updated {
                    kept.last_updated = row.last_updated;
                }
            }
            None => {
                index.insert(row.key(), collapsed.len());
                collapsed.push(row);
            }
        }
    }

    sort_by_recency(&mut collapsed);
    collapsed
}

/// Whether `last_updated` is non-increasing across the rows
pub fn is_recency_ordered(rows: &[TableRow]) -> bool {
    rows.windows(2).all(|pair| pair[0].last_updated >= pair[1].last_updated)
}

/// Whether no two rows share a case-insensitive name
pub fn has_unique_names(rows: &[TableRow]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(rows.len());
    rows.iter().all(|row| seen.insert(row.key()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn arb_interests() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-cA-C]{1,2}", 0..4)
    }

    fn arb_table() -> impl Strategy<Value = Vec<TableRow>> {
        prop::collection::vec(("[a-dA-D]{1,2}", arb_interests(), 0i64..1_000), 0..8).prop_map(|rows| {
            let rows = rows
                .into_iter()
                .map(|(name, interests, offset)| {
                    TableRow::new(name, interests.iter().collect(), base() + Duration::seconds(offset))
                })
                .collect();
            collapse_duplicates(rows)
        })
    }

    fn arb_batch() -> impl Strategy<Value = Vec<NormalizedRecord>> {
        prop::collection::vec(("[a-dA-D]{1,2}", arb_interests()), 0..8).prop_map(|records| {
            records
                .into_iter()
                .map(|(name, interests)| NormalizedRecord {
                    name,
                    interests: interests.iter().collect(),
                })
                .collect()
        })
    }

    proptest! {
        /// Property: applying a batch twice with the same timestamp equals applying it once
        #[test]
        fn test_upsert_idempotent(table in arb_table(), batch in arb_batch(), offset in 0i64..2_000) {
            let now = base() + Duration::seconds(offset);
            let once = upsert(table, &batch, now);
            let twice = upsert(once.clone(), &batch, now);
            prop_assert_eq!(once, twice);
        }

        /// Property: the table is in recency order after every upsert
        #[test]
        fn test_upsert_recency_ordered(table in arb_table(), batch in arb_batch(), offset in 0i64..2_000) {
            let rows = upsert(table, &batch, base() + Duration::seconds(offset));
            prop_assert!(is_recency_ordered(&rows));
        }

        /// Property: names stay unique ignoring case
        #[test]
        fn test_upsert_unique_names(table in arb_table(), batch in arb_batch()) {
            let rows = upsert(table, &batch, base() + Duration::seconds(5_000));
            prop_assert!(has_unique_names(&rows));
        }

        /// Property: every record's interests end up in its row, stamped with `now`
        #[test]
        fn test_upsert_contains_batch(table in arb_table(), batch in arb_batch()) {
            let now = base() + Duration::seconds(5_000);
            let rows = upsert(table, &batch, now);
            for record in &batch {
                let row = rows.iter().find(|r| r.key() == record.key());
                prop_assert!(row.is_some());
                let row = row.unwrap();
                prop_assert_eq!(row.last_updated, now);
                for interest in record.interests.iter() {
                    prop_assert!(row.interests.contains(interest));
                }
            }
        }
    }
}
