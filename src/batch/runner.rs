//! Batch processing.
//!
//! A batch reads the serial counter once, processes each document in turn,
//! and writes the counter back once at the end. A document that fails is
//! logged, recorded and skipped, and never stops the batch. It consumes a
//! serial number only if an output carrying its identifier was already
//! written, so a number is never handed out twice.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::config::IntakeConfig;
use crate::error::{EngineResult, ErrorKind};
use crate::intake::{CounterStore, IdSource, ProcessedAward, Resolver, SerialAllocator, SerialCounter, process_document};
use crate::models::{AwardId, SourceDocument};

use super::{FieldSource, OutputSink, format_error_block, format_record_block, new_file_name, spreadsheet_rows};

/// A document that was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedDocument {
    /// The original file name.
    pub name: String,
    /// The identifier assigned.
    pub id: AwardId,
    /// Where the document is now.
    pub location: PathBuf,
}

/// A document that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDocument {
    /// The original file name.
    pub name: String,
    /// Broad reason for the rejection.
    pub kind: ErrorKind,
    /// The full error text.
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Accepted documents, in processing order.
    pub processed: Vec<AcceptedDocument>,
    /// Rejected documents, in processing order.
    pub failed: Vec<FailedDocument>,
    /// Counter values at the end of the batch.
    pub counter: SerialCounter,
}

/// Runs batches of documents through the intake pipeline.
pub struct BatchRunner<'a> {
    config: &'a IntakeConfig,
    source: &'a dyn FieldSource,
    sink: &'a mut dyn OutputSink,
    counter_store: &'a dyn CounterStore,
    resolver: &'a mut dyn Resolver,
    today: NaiveDate,
}

impl<'a> BatchRunner<'a> {
    /// Creates a runner; the processing date defaults to today.
    pub fn new(
        config: &'a IntakeConfig,
        source: &'a dyn FieldSource,
        sink: &'a mut dyn OutputSink,
        counter_store: &'a dyn CounterStore,
        resolver: &'a mut dyn Resolver,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            counter_store,
            resolver,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the processing date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Processes every document in `paths`, in order.
    ///
    /// # Errors
    ///
    /// Only counter store failures are returned; document failures are
    /// listed in the report.
    pub fn run(&mut self, paths: &[PathBuf]) -> EngineResult<BatchReport> {
        let counter = self.counter_store.load()?;
        let mut allocator = SerialAllocator::new(counter, self.config.fiscal_year_prefix.as_str());
        let mut report = BatchReport::default();

        info!(documents = paths.len(), ?counter, "Batch started");

        for path in paths {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let outcome = self.prepare(path, &allocator).and_then(|(document, award)| {
                let mut id_issued = false;
                let delivered = self.deliver(path, &document.name, &award, &mut id_issued);
                // An identifier that reached any output is spent, even if a later write failed.
                if (delivered.is_ok() || id_issued) && award.id_source == IdSource::Allocated {
                    allocator.advance(award.record.category);
                }
                if delivered.is_err() && id_issued {
                    warn!(document = %name, id = %award.record.id, "Identifier retired after a partial write");
                }
                delivered.map(|location| (award, location))
            });

            match outcome {
                Ok((award, location)) => {
                    report.processed.push(AcceptedDocument {
                        name,
                        id: award.record.id,
                        location,
                    });
                }
                Err(error) => {
                    warn!(document = %name, kind = ?error.kind(), error = %error, "Document not processed");
                    if self.config.actions.write_audit {
                        if let Err(log_error) = self.sink.append_audit(&format_error_block(&name, &error)) {
                            warn!(error = %log_error, "Failed to record error block");
                        }
                    }
                    report.failed.push(FailedDocument {
                        name,
                        kind: error.kind(),
                        error: error.to_string(),
                    });
                }
            }
        }

        report.counter = allocator.counter();
        if self.config.actions.update_counter {
            self.counter_store.save(&report.counter)?;
        }

        info!(
            processed = report.processed.len(),
            failed = report.failed.len(),
            counter = ?report.counter,
            "Batch finished"
        );
        if !report.failed.is_empty() {
            let names: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
            warn!(count = names.len(), documents = ?names, "Documents not processed");
        }

        Ok(report)
    }

    fn prepare(&mut self, path: &Path, allocator: &SerialAllocator) -> EngineResult<(SourceDocument, ProcessedAward)> {
        let document = self.source.read(path)?;
        let award = process_document(&document, allocator, self.today, &mut *self.resolver)?;
        Ok((document, award))
    }

    /// Writes the outputs of an accepted document.
    ///
    /// Spreadsheet rows go last so a document never appears there unless
    /// every other output succeeded. `id_issued` is set as soon as any
    /// write carrying the identifier succeeds.
    fn deliver(
        &mut self,
        path: &Path,
        document_name: &str,
        award: &ProcessedAward,
        id_issued: &mut bool,
    ) -> EngineResult<PathBuf> {
        let actions = &self.config.actions;
        let rows = spreadsheet_rows(&award.record);

        let block = format_record_block(document_name, &award.record);
        if actions.print_records {
            println!("{}", block);
        }
        if actions.write_audit {
            self.sink.append_audit(&block)?;
            *id_issued = true;
        }

        let location = if actions.rename_files {
            let location = self.sink.relocate(path, &new_file_name(&award.record))?;
            *id_issued = true;
            location
        } else {
            path.to_path_buf()
        };

        if actions.write_rows {
            self.sink.append_rows(&rows)?;
            *id_issued = true;
        }

        Ok(location)
    }
}
