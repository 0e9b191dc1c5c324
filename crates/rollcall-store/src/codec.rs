//! Row encoding for the CSV table
//!
//! Columns are `name, interests, last_updated`. Interests are joined with
//! `"; "` into one field; timestamps are RFC 3339 UTC with whole seconds.

use chrono::{DateTime, SecondsFormat, Utc};
use rollcall_domain::{InterestSet, TableRow, INTEREST_SEPARATOR};
use serde::{Deserialize, Serialize};

/// Header row written to every table file
pub const HEADER: [&str; 3] = ["name", "interests", "last_updated"];

/// One CSV record as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredRow {
    pub name: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub last_updated: String,
}

impl StoredRow {
    pub(crate) fn from_row(row: &TableRow) -> Self {
        Self {
            name: row.name.clone(),
            interests: encode_interests(&row.interests),
            last_updated: format_timestamp(row.last_updated),
        }
    }

    /// Decode into a table row; rows without a usable name or timestamp are
    /// rejected with the reason
    pub(crate) fn into_row(self) -> Result<TableRow, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("empty name".to_string());
        }

        let last_updated = if self.last_updated.trim().is_empty() {
            DateTime::<Utc>::UNIX_EPOCH
        } else {
            parse_timestamp(&self.last_updated)
                .ok_or_else(|| format!("unparseable timestamp '{}'", self.last_updated))?
        };

        Ok(TableRow::new(
            name,
            decode_interests(&self.interests),
            last_updated,
        ))
    }
}

/// Join interests into a single field
pub fn encode_interests(interests: &InterestSet) -> String {
    interests.iter().collect::<Vec<_>>().join("; ")
}

/// Split an interests field
///
/// Accepts the semicolon-joined form and the older JSON-array form
/// (`["a", "b"]`).
pub fn decode_interests(field: &str) -> InterestSet {
    let trimmed = field.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items.iter().collect();
        }
    }
    trimmed.split(INTEREST_SEPARATOR).collect()
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SSZ`
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM:SS` taken as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
