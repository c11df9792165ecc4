//! Batch processing of nomination documents.
//!
//! This module connects the intake pipeline to the outside world:
//! - [`FieldSource`] reads documents (JSON widget dumps by default)
//! - [`OutputSink`] writes spreadsheet rows, the audit log and renames files
//! - [`BatchRunner`] drives a batch against a [`CounterStore`](crate::intake::CounterStore)

mod outputs;
mod runner;
mod source;

pub use outputs::{
    FileOutputs, OutputSink, format_error_block, format_record_block, new_file_name, spreadsheet_rows,
};
pub use runner::{AcceptedDocument, BatchReport, BatchRunner, FailedDocument};
pub use source::{DUMP_EXTENSION, FieldSource, JsonFieldSource, collect_documents};
