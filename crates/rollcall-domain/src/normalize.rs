//! Record normalization
//!
//! Names are trimmed at the edges only. Internal whitespace is preserved, so
//! "Ana  Ruiz" and "Ana Ruiz" are distinct people as far as the table is
//! concerned.

use crate::{InterestSet, NormalizedRecord, PersonRecord};

/// Normalize a batch of raw records
///
/// Records whose name is blank after trimming are dropped. Output order
/// matches input order.
///
/// # Examples
///
/// ```
/// use rollcall_domain::{normalize, PersonRecord};
///
/// let raw = vec![
///     PersonRecord::new("  Lee ", ["chess", "Chess", " "]),
///     PersonRecord::new("   ", ["ignored"]),
/// ];
/// let normalized = normalize(&raw);
/// assert_eq!(normalized.len(), 1);
/// assert_eq!(normalized[0].name, "Lee");
/// assert_eq!(normalized[0].interests.len(), 1);
/// ```
pub fn normalize(records: &[PersonRecord]) -> Vec<NormalizedRecord> {
    records.iter().filter_map(normalize_record).collect()
}

/// Normalize a single record, returning `None` when the name is blank
pub fn normalize_record(record: &PersonRecord) -> Option<NormalizedRecord> {
    let name = normalize_name(&record.name)?;
    let interests: InterestSet = record.interests.iter().collect();
    Some(NormalizedRecord { name, interests })
}

/// Trim a name, returning `None` when nothing is left
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_edges_only() {
        assert_eq!(normalize_name("  Ana  Ruiz \t"), Some("Ana  Ruiz".to_string()));
        assert_eq!(normalize_name("\n"), None);
    }

    #[test]
    fn test_drops_blank_names_and_keeps_order() {
        let raw = vec![
            PersonRecord::new("Bea", ["x"]),
            PersonRecord::new("", ["y"]),
            PersonRecord::new("Al", Vec::<String>::new()),
        ];

        let normalized = normalize(&raw);

        let names: Vec<_> = normalized.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bea", "Al"]);
        assert!(normalized[1].interests.is_empty());
    }

    #[test]
    fn test_interests_trimmed_and_deduplicated() {
        let raw = PersonRecord::new("Lee", [" Chess", "chess", "", "Go ", "GO"]);

        let normalized = normalize_record(&raw).unwrap();

        assert_eq!(
            normalized.interests.as_slice(),
            &["Chess".to_string(), "Go".to_string()]
        );
    }

    #[test]
    fn test_duplicate_names_are_not_merged_here() {
        let raw = vec![
            PersonRecord::new("Lee", ["chess"]),
            PersonRecord::new("lee", ["go"]),
        ];
        assert_eq!(normalize(&raw).len(), 2);
    }
}
