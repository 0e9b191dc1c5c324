//! Interest set - an insertion-ordered, case-insensitive set of strings

use std::fmt;

/// Separator between interests in the persisted table
///
/// An interest never contains it: [`InterestSet::insert`] rewrites it to `,`.
pub const INTEREST_SEPARATOR: char = ';';

/// A set of interests compared case-insensitively
///
/// The first-seen casing of an interest is kept as canonical. Iteration yields
/// interests in insertion order, which keeps serialized tables stable across
/// runs. Equality is set equality: two sets are equal when they hold the same
/// interests regardless of casing or order.
///
/// # Examples
///
/// ```
/// use rollcall_domain::InterestSet;
///
/// let mut set = InterestSet::new();
/// assert!(set.insert("Hiking"));
/// assert!(!set.insert("  hiking "));
/// assert!(set.insert("chess"));
/// assert_eq!(set.as_slice(), &["Hiking".to_string(), "chess".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterestSet {
    items: Vec<String>,
}

impl InterestSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an interest, trimming surrounding whitespace
    ///
    /// [`INTEREST_SEPARATOR`] inside the interest becomes `,`, so the stored
    /// form is what gets persisted. Returns `false` if the interest was blank
    /// or already present (ignoring case).
    pub fn insert(&mut self, interest: &str) -> bool {
        let cleaned = clean(interest);
        if cleaned.is_empty() || self.contains(&cleaned) {
            return false;
        }
        self.items.push(cleaned);
        true
    }

    /// Check membership ignoring case and surrounding whitespace
    pub fn contains(&self, interest: &str) -> bool {
        let key = clean(interest).to_lowercase();
        self.items.iter().any(|item| item.to_lowercase() == key)
    }

    /// Add every interest of `other` that is not already present
    ///
    /// Returns the number of interests added.
    pub fn union_with(&mut self, other: &InterestSet) -> usize {
        other
            .items
            .iter()
            .filter(|interest| self.insert(interest))
            .count()
    }

    /// Number of interests
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no interests
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over interests in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Interests in insertion order
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

fn clean(interest: &str) -> String {
    interest.trim().replace(INTEREST_SEPARATOR, ",")
}

impl PartialEq for InterestSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl Eq for InterestSet {}

impl<S: AsRef<str>> FromIterator<S> for InterestSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = InterestSet::new();
        for item in iter {
            set.insert(item.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for InterestSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item.as_ref());
        }
    }
}

impl fmt::Display for InterestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.join(", "))
    }
}
