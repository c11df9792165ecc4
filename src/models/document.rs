//! Source documents.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::intake::classify_category;

use super::{FieldEntry, RawFieldSet};

/// One nomination document, read and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// The document's file name, used in logs, error blocks and for
    /// recognising identifiers of renamed files.
    pub name: String,
    /// Number of pages in the document.
    pub page_count: usize,
    /// The normalized fields.
    pub fields: RawFieldSet,
}

impl SourceDocument {
    /// Builds a document from per-page widget lists.
    ///
    /// The page count is checked before any field is normalized.
    ///
    /// # Errors
    ///
    /// - `InvalidDocumentShape` if the page count is not 2, 3, 4 or 5
    /// - `InsufficientFieldCount` if too few fields are populated
    pub fn from_pages(name: impl Into<String>, pages: &[Vec<FieldEntry>]) -> EngineResult<Self> {
        let page_count = pages.len();
        classify_category(page_count)?;
        let fields = RawFieldSet::from_pages(pages)?;
        Ok(Self {
            name: name.into(),
            page_count,
            fields,
        })
    }

    /// The name without its extension.
    pub fn stem(&self) -> &str {
        std::path::Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }
}
