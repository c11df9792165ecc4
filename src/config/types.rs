//! Configuration types for nomination intake.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::path::PathBuf;

use serde::Deserialize;

fn default_log_filter() -> String {
    "info".to_string()
}

fn enabled() -> bool {
    true
}

/// Top-level intake configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Fiscal year prefix of award identifiers (e.g., "24").
    pub fiscal_year_prefix: String,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Output and state file locations.
    pub paths: PathsConfig,
    /// Which side effects a batch performs.
    #[serde(default)]
    pub actions: ActionsConfig,
}

/// File locations used by a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// File receiving one tab-separated row per nominee.
    pub spreadsheet_rows: PathBuf,
    /// File receiving record and error blocks.
    pub audit_log: PathBuf,
    /// JSON file holding the serial counter.
    pub counter_store: PathBuf,
    /// Directory renamed documents are moved into.
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,
}

/// Batch side-effect toggles.
///
/// Every toggle defaults to on except moving files.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsConfig {
    /// Append spreadsheet rows.
    #[serde(default = "enabled")]
    pub write_rows: bool,
    /// Append record and error blocks to the audit log.
    #[serde(default = "enabled")]
    pub write_audit: bool,
    /// Print each record block to stdout.
    #[serde(default)]
    pub print_records: bool,
    /// Rename accepted documents after their identifier.
    #[serde(default = "enabled")]
    pub rename_files: bool,
    /// Move renamed documents into `paths.archive_dir`.
    #[serde(default)]
    pub move_files: bool,
    /// Persist the advanced counter at the end of the batch.
    #[serde(default = "enabled")]
    pub update_counter: bool,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            write_rows: true,
            write_audit: true,
            print_records: false,
            rename_files: true,
            move_files: false,
            update_counter: true,
        }
    }
}

impl ActionsConfig {
    /// Toggles for a dry run: nothing is written, renamed or persisted.
    pub fn dry_run() -> Self {
        Self {
            write_rows: false,
            write_audit: false,
            print_records: true,
            rename_files: false,
            move_files: false,
            update_counter: false,
        }
    }
}
