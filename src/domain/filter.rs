//! Case-insensitive substring search over a cached listing.

use crate::domain::entities::Entry;

/// Raw user input for a name search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub raw: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Trimmed, lowercased form used for matching.
    pub fn normalized(&self) -> String {
        self.raw.trim().to_lowercase()
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let needle = self.normalized();
        !needle.is_empty() && entry.name.contains(&needle)
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Cap on the number of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxResults {
    Limit(usize),
    #[default]
    Unbounded,
}

impl MaxResults {
    pub fn as_limit(self) -> usize {
        match self {
            MaxResults::Limit(n) => n,
            MaxResults::Unbounded => usize::MAX,
        }
    }
}

impl From<Option<usize>> for MaxResults {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(MaxResults::Unbounded, MaxResults::Limit)
    }
}

/// Entries whose name contains `query`, in listing order.
///
/// A blank query matches nothing.
pub fn filter_by_name(listing: &[Entry], query: &str, max: MaxResults) -> Vec<Entry> {
    let needle = SearchQuery::new(query).normalized();
    if needle.is_empty() {
        return Vec::new();
    }
    listing
        .iter()
        .filter(|entry| entry.name.contains(&needle))
        .take(max.as_limit())
        .cloned()
        .collect()
}
