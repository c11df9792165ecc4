//! Serial number allocation.
//!
//! Award identifiers are `{fiscal prefix}-{IND|GRP}-{sequence}`, with one
//! sequence per category. The counter is read once at the start of a batch
//! and written once at the end; in between the batch runner advances it
//! only for documents that were accepted and fully written out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AwardCategory, AwardId};

/// The persisted next-sequence values, one per category.
///
/// Serialized as `{"IND": n, "GRP": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialCounter {
    /// Next individual sequence.
    #[serde(rename = "IND")]
    pub individual: u32,
    /// Next group sequence.
    #[serde(rename = "GRP")]
    pub group: u32,
}

impl SerialCounter {
    /// Creates a counter.
    pub fn new(individual: u32, group: u32) -> Self {
        Self { individual, group }
    }

    /// The next sequence for a category.
    pub fn get(&self, category: AwardCategory) -> u32 {
        match category {
            AwardCategory::Individual => self.individual,
            AwardCategory::Group => self.group,
        }
    }
}

/// Hands out identifiers from a counter snapshot.
///
/// # Example
///
/// ```
/// use award_intake::intake::{SerialAllocator, SerialCounter};
/// use award_intake::models::AwardCategory;
///
/// let mut allocator = SerialAllocator::new(SerialCounter::new(7, 3), "24");
/// assert_eq!(allocator.peek(AwardCategory::Individual).as_str(), "24-IND-007");
/// allocator.advance(AwardCategory::Individual);
/// assert_eq!(allocator.peek(AwardCategory::Individual).as_str(), "24-IND-008");
/// assert_eq!(allocator.peek(AwardCategory::Group).as_str(), "24-GRP-003");
/// ```
#[derive(Debug, Clone)]
pub struct SerialAllocator {
    counter: SerialCounter,
    fiscal_prefix: String,
}

impl SerialAllocator {
    /// Creates an allocator over a counter snapshot.
    pub fn new(counter: SerialCounter, fiscal_prefix: impl Into<String>) -> Self {
        Self {
            counter,
            fiscal_prefix: fiscal_prefix.into(),
        }
    }

    /// The identifier the next accepted document of `category` would receive.
    pub fn peek(&self, category: AwardCategory) -> AwardId {
        AwardId::new(&self.fiscal_prefix, category, self.counter.get(category))
    }

    /// Consumes the current number of `category`.
    pub fn advance(&mut self, category: AwardCategory) {
        match category {
            AwardCategory::Individual => self.counter.individual += 1,
            AwardCategory::Group => self.counter.group += 1,
        }
    }

    /// The current counter values.
    pub fn counter(&self) -> SerialCounter {
        self.counter
    }

    /// The fiscal year prefix.
    pub fn fiscal_prefix(&self) -> &str {
        &self.fiscal_prefix
    }
}

/// Returns the identifier already carried by a renamed document.
///
/// A document whose name starts with `{fiscal_prefix}-` was processed
/// before; its first whitespace-delimited token is its identifier.
///
/// # Example
///
/// ```
/// use award_intake::intake::existing_id;
///
/// let id = existing_id("24-GRP-012 - BBB-000 - 3 nominees - 2024-03-01.json", "24");
/// assert_eq!(id.unwrap().as_str(), "24-GRP-012");
/// assert!(existing_id("nomination.json", "24").is_none());
/// ```
pub fn existing_id(document_name: &str, fiscal_prefix: &str) -> Option<AwardId> {
    let name = document_name.trim_start();
    if !name.starts_with(&format!("{}-", fiscal_prefix)) {
        return None;
    }
    name.split_whitespace().next().map(AwardId::existing)
}

/// Persistence for the serial counter.
pub trait CounterStore {
    /// Reads the counter.
    fn load(&self) -> EngineResult<SerialCounter>;

    /// Writes the counter.
    fn save(&self, counter: &SerialCounter) -> EngineResult<()>;
}

/// Counter store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonCounterStore {
    path: PathBuf,
}

impl JsonCounterStore {
    /// Creates a store for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, message: impl ToString) -> EngineError {
        EngineError::CounterStore {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl CounterStore for JsonCounterStore {
    fn load(&self) -> EngineResult<SerialCounter> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        let counter: SerialCounter = serde_json::from_str(&content).map_err(|e| self.error(e))?;
        debug!(path = %self.path.display(), ?counter, "Serial counter loaded");
        Ok(counter)
    }

    fn save(&self, counter: &SerialCounter) -> EngineResult<()> {
        let content = serde_json::to_string(counter).map_err(|e| self.error(e))?;
        fs::write(&self.path, content).map_err(|e| self.error(e))?;
        debug!(path = %self.path.display(), ?counter, "Serial counter saved");
        Ok(())
    }
}
