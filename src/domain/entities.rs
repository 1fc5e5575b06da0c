//! Domain entities: core data structures

use std::fmt;

use itertools::Itertools;

use crate::domain::error::DomainError;

/// A single catalog item as reported by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Position-derived identifier, 1-based
    pub id: u32,
    /// Lowercase identifier name, e.g. "bulbasaur"
    pub name: String,
    /// Reference URL of the detail resource
    pub source_url: String,
}

impl Entry {
    /// Zero-padded dex number, e.g. `#001`.
    pub fn dex_number(&self) -> String {
        dex_number(self.id)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dex_number(), self.name)
    }
}

/// One fetched batch of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 0-based index of the first entry
    pub offset: u32,
    /// Number of entries requested
    pub limit: u32,
    pub entries: Vec<Entry>,
}

impl Page {
    /// Build a page from `(name, url)` listing items.
    ///
    /// Ids are synthesized from listing order: `offset + position + 1`.
    /// An id past `u32::MAX` fails with `OffsetOverflow`.
    pub fn from_items<I>(offset: u32, limit: u32, items: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(position, (name, source_url))| {
                let id = u32::try_from(position)
                    .ok()
                    .and_then(|position| offset.checked_add(position))
                    .and_then(|id| id.checked_add(1))
                    .ok_or(DomainError::OffsetOverflow { offset, limit })?;
                Ok(Entry {
                    id,
                    name,
                    source_url,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self {
            offset,
            limit,
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A page shorter than its limit is the last one the source has.
    pub fn is_last(&self) -> bool {
        self.entries.len() < self.limit as usize
    }
}

/// Append-only accumulation of contiguous pages.
///
/// Owned by the caller for the lifetime of a browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    entries: Vec<Entry>,
    exhausted: bool,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page whose offset equals the current length.
    ///
    /// A page at any other offset would leave a gap or overlap and is rejected.
    pub fn append(&mut self, page: Page) -> Result<(), DomainError> {
        let expected = self.next_offset();
        if page.offset != expected {
            return Err(DomainError::NonContiguousPage {
                expected,
                actual: page.offset,
            });
        }
        self.exhausted = page.is_last();
        self.entries.extend(page.entries);
        Ok(())
    }

    /// Append a batch of pages in order, all or nothing.
    ///
    /// Pages after the first short one are ignored. If any page would break
    /// contiguity, no page of the batch is applied. Returns the number of
    /// entries appended.
    pub fn append_all(&mut self, pages: Vec<Page>) -> Result<usize, DomainError> {
        let mut expected = self.next_offset();
        let mut exhausted = self.exhausted;
        let mut accepted = 0;
        for page in &pages {
            if exhausted {
                break;
            }
            if page.offset != expected {
                return Err(DomainError::NonContiguousPage {
                    expected,
                    actual: page.offset,
                });
            }
            expected = u32::try_from(page.len())
                .ok()
                .and_then(|len| expected.checked_add(len))
                .ok_or(DomainError::OffsetOverflow {
                    offset: page.offset,
                    limit: page.limit,
                })?;
            exhausted = page.is_last();
            accepted += 1;
        }

        let before = self.len();
        for page in pages.into_iter().take(accepted) {
            self.append(page)?;
        }
        Ok(self.len() - before)
    }

    /// Offset of the next page to request.
    pub fn next_offset(&self) -> u32 {
        self.entries.len() as u32
    }

    /// True once a short page was appended.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// Extract the trailing numeric id from a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon-species/25/` -> 25
pub fn id_from_url(url: &str) -> Result<u32, DomainError> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| DomainError::InvalidId(url.to_string()))
}

/// Zero-padded dex number with at least three digits.
pub fn dex_number(id: u32) -> String {
    format!("#{:03}", id)
}

/// Uppercase the first character, keep the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Detail record of one entry, as consumed by the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    pub id: u32,
    pub name: String,
    /// Height in decimetres
    pub height_dm: u32,
    /// Weight in hectograms
    pub weight_hg: u32,
    pub types: Vec<String>,
    pub stats: Vec<Stat>,
    pub abilities: Vec<String>,
    pub artwork_url: Option<String>,
}

impl EntryDetail {
    pub fn dex_number(&self) -> String {
        dex_number(self.id)
    }

    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height_dm) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight_hg) / 10.0
    }

    /// Ability names with dashes replaced by spaces, comma separated.
    pub fn ability_labels(&self) -> String {
        self.abilities.iter().map(|a| a.replace('-', " ")).join(", ")
    }

    /// Previous and next ids within `1..=max_id`.
    pub fn neighbors(&self, max_id: u32) -> Neighbors {
        Neighbors {
            prev: (self.id > 1).then(|| self.id - 1),
            next: (self.id < max_id).then(|| self.id + 1),
        }
    }
}

/// Adjacent entries for prev/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

/// Upper bound of the stat bar.
pub const STAT_BAR_MAX: u32 = 150;

/// One base stat of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    /// Raw stat name, e.g. "special-attack"
    pub name: String,
    pub base: u32,
}

impl Stat {
    /// Title-cased label: "special-attack" -> "Special Attack".
    pub fn label(&self) -> String {
        self.name
            .replace('-', " ")
            .split(' ')
            .map(capitalize)
            .join(" ")
    }

    pub fn tier(&self) -> StatTier {
        StatTier::from_base(self.base)
    }

    /// Base value clamped to the bar maximum.
    pub fn bar_value(&self) -> u32 {
        self.base.min(STAT_BAR_MAX)
    }
}

/// Coarse grading of a base stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatTier {
    Low,
    Fair,
    Good,
    Great,
}

impl StatTier {
    pub fn from_base(base: u32) -> Self {
        match base {
            0..=49 => StatTier::Low,
            50..=79 => StatTier::Fair,
            80..=99 => StatTier::Good,
            _ => StatTier::Great,
        }
    }
}
