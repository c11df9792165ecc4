//! Raw form-field models.
//!
//! A nomination document arrives as one list of `(label, value)` widget
//! pairs per page. This module turns those pages into a [`RawFieldSet`]:
//! canonical keys, cleaned values, and the first/middle/last page split
//! the extractors rely on.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::intake::{canonical_key, clean_text};

/// A populated document must carry strictly more fields than this.
pub const MIN_FIELD_COUNT: usize = 10;

/// Field values that mean "checkbox not ticked" and are dropped.
const UNCHECKED_SENTINELS: [&str; 2] = ["off", "unchecked"];

/// A single form widget as read from a document page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// The widget label exactly as the form reader reported it.
    pub name: String,
    /// The widget value exactly as the form reader reported it.
    #[serde(default)]
    pub value: String,
}

impl FieldEntry {
    /// Creates a field entry from a label and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An insertion-ordered key → value mapping.
///
/// Re-inserting an existing key replaces its value but keeps the
/// position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// The populated fields of one nomination document, split by page position.
///
/// # Example
///
/// ```
/// use award_intake::models::{FieldEntry, RawFieldSet};
///
/// let first: Vec<FieldEntry> = (0..6)
///     .map(|i| FieldEntry::new(format!("Org {}", i + 3), "AAA-111"))
///     .collect();
/// let last: Vec<FieldEntry> = (0..6)
///     .map(|i| FieldEntry::new(format!("Note {}", i), "text"))
///     .collect();
///
/// let fields = RawFieldSet::from_pages(&[first, last]).unwrap();
/// assert_eq!(fields.first_page.get("org_3"), Some("AAA-111"));
/// assert!(fields.mid_pages.is_empty());
/// assert_eq!(fields.total_len(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFieldSet {
    /// Fields found on the first page.
    pub first_page: FieldMap,
    /// Fields found on every page between the first and the last.
    pub mid_pages: FieldMap,
    /// Fields found on the last page.
    pub last_page: FieldMap,
}

impl RawFieldSet {
    /// Builds a field set from per-page widget lists.
    ///
    /// Labels are converted with [`canonical_key`], values with
    /// [`clean_text`]; empty values, unchecked checkboxes and labels with
    /// no alphanumeric content are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFieldCount` when no more than
    /// [`MIN_FIELD_COUNT`] widgets survive filtering. Widgets are counted
    /// before repeated labels collapse into one key.
    pub fn from_pages(pages: &[Vec<FieldEntry>]) -> EngineResult<Self> {
        let mut fields = RawFieldSet::default();
        let mut count = 0;
        let last_index = pages.len().saturating_sub(1);

        for (page_number, page) in pages.iter().enumerate() {
            for entry in page {
                let Some(key) = canonical_key(&entry.name) else {
                    continue;
                };
                let Some(value) = clean_text(&entry.value) else {
                    continue;
                };
                if is_unchecked(&value) {
                    continue;
                }

                let target = if page_number == 0 {
                    &mut fields.first_page
                } else if page_number == last_index {
                    &mut fields.last_page
                } else {
                    &mut fields.mid_pages
                };
                target.insert(key, value);
                count += 1;
            }
        }

        if count <= MIN_FIELD_COUNT {
            return Err(EngineError::InsufficientFieldCount {
                count,
                minimum: MIN_FIELD_COUNT,
            });
        }

        Ok(fields)
    }

    /// Total number of fields across all three page groups.
    pub fn total_len(&self) -> usize {
        self.first_page.len() + self.mid_pages.len() + self.last_page.len()
    }
}

fn is_unchecked(value: &str) -> bool {
    UNCHECKED_SENTINELS
        .iter()
        .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}
