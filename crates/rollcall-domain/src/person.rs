//! Person records as they flow from the completion service to the table

use crate::InterestSet;

/// A raw record extracted by the completion service
///
/// Nothing is validated at this stage: names may be blank and interests may
/// repeat. See [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonRecord {
    /// Person's name as returned by the service
    pub name: String,

    /// Interests in the order the service listed them
    pub interests: Vec<String>,
}

impl PersonRecord {
    /// Create a new raw record
    pub fn new<S: Into<String>>(name: impl Into<String>, interests: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            interests: interests.into_iter().map(Into::into).collect(),
        }
    }
}

/// A record that passed normalization and is ready to be merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Trimmed, non-empty name
    pub name: String,

    /// Deduplicated interests
    pub interests: InterestSet,
}

impl NormalizedRecord {
    /// Case-insensitive key used to match this record against table rows
    pub fn key(&self) -> String {
        name_key(&self.name)
    }
}

/// Case-insensitive lookup key for a name
///
/// # Examples
///
/// ```
/// use rollcall_domain::name_key;
///
/// assert_eq!(name_key("Ana Ruiz"), name_key("ana ruiz"));
/// ```
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
