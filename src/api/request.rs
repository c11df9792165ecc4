//! Request types for the Award Intake Engine API.
//!
//! This module defines the JSON request structure for the `/validate` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{FieldEntry, SourceDocument};

/// Request body for the `/validate` endpoint.
///
/// Carries the same per-page widget dump the batch reads from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The document's file name; a name already carrying an identifier keeps it.
    pub document_name: String,
    /// Widgets of each page, in page order.
    pub pages: Vec<Vec<FieldEntry>>,
}

impl ValidationRequest {
    /// Normalizes the request into a source document.
    pub fn into_document(self) -> EngineResult<SourceDocument> {
        SourceDocument::from_pages(self.document_name, &self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_values() {
        let json = r#"{
            "document_name": "scan.json",
            "pages": [[{"name": "Employee Name", "value": "Ann Lee"}, {"name": "Blank"}], []]
        }"#;
        let request: ValidationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.pages.len(), 2);
        assert_eq!(request.pages[0][1].value, "");
    }
}
