//! Reading nomination documents.
//!
//! The form reader that opens the fillable documents runs outside this
//! crate and leaves a JSON dump of every page's widgets:
//!
//! ```json
//! { "pages": [ [ { "name": "Employee Name", "value": "Ann Lee" } ], [] ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{FieldEntry, SourceDocument};

/// Extension of field dumps picked up when walking a directory.
pub const DUMP_EXTENSION: &str = "json";

/// Reads one document into a [`SourceDocument`].
pub trait FieldSource {
    /// Reads and normalizes the document at `path`.
    ///
    /// # Errors
    ///
    /// `SourceRead` when the document cannot be read or decoded, plus the
    /// shape errors of [`SourceDocument::from_pages`].
    fn read(&self, path: &Path) -> EngineResult<SourceDocument>;
}

#[derive(Debug, Deserialize)]
struct FieldDump {
    pages: Vec<Vec<FieldEntry>>,
}

/// Reads JSON widget dumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFieldSource;

impl FieldSource for JsonFieldSource {
    fn read(&self, path: &Path) -> EngineResult<SourceDocument> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| EngineError::SourceRead {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        let dump: FieldDump = serde_json::from_str(&content).map_err(|e| EngineError::SourceRead {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(path_str);
        SourceDocument::from_pages(name, &dump.pages)
    }
}

/// Expands the given paths into the list of documents to process.
///
/// Files are taken as given; directories are walked recursively for
/// `*.json` dumps, sorted by path.
///
/// # Errors
///
/// Returns `SourceRead` if a path does not exist or a directory cannot be listed.
pub fn collect_documents(paths: &[PathBuf]) -> EngineResult<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk_dir(path, &mut found)?;
            found.sort();
            documents.extend(found);
        } else if path.is_file() {
            documents.push(path.clone());
        } else {
            return Err(EngineError::SourceRead {
                path: path.display().to_string(),
                message: "no such file or directory".to_string(),
            });
        }
    }
    Ok(documents)
}

fn walk_dir(dir: &Path, found: &mut Vec<PathBuf>) -> EngineResult<()> {
    let read_error = |e: std::io::Error| EngineError::SourceRead {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            walk_dir(&path, found)?;
        } else if path.extension().is_some_and(|ext| ext == DUMP_EXTENSION) {
            found.push(path);
        }
    }
    Ok(())
}
