//! Error types for the Award Intake Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that rejects a nomination document, plus the
//! configuration and I/O failures of the surrounding collaborators.

use thiserror::Error;

use crate::intake::LimitBreakdown;

/// Broad grouping of [`EngineError`] variants.
///
/// Used by the batch runner and the HTTP API to report why a document
/// was rejected without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document has the wrong page count or too few fields.
    DocumentShape,
    /// A required attribute could not be extracted.
    Extraction,
    /// Nominee slots could not be reconciled.
    NomineeAssembly,
    /// The requested amounts exceed the commensurate limit.
    PolicyViolation,
    /// The nominator nominated themselves.
    SelfNomination,
    /// Configuration could not be loaded.
    Configuration,
    /// A collaborator failed to read or write.
    Io,
}

/// The main error type for the Award Intake Engine.
///
/// # Example
///
/// ```
/// use award_intake::error::EngineError;
///
/// let error = EngineError::InvalidDocumentShape { page_count: 7 };
/// assert_eq!(
///     error.to_string(),
///     "Invalid page count. Expected: [2, 3, 4, 5] | Received: 7"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Page count does not correspond to either award category.
    #[error("Invalid page count. Expected: [2, 3, 4, 5] | Received: {page_count}")]
    InvalidDocumentShape {
        /// The page count of the rejected document.
        page_count: usize,
    },

    /// Too few populated fields to be a completed nomination.
    #[error("Insufficient number of form fields. Count: {count} (must exceed {minimum})")]
    InsufficientFieldCount {
        /// Number of populated fields found.
        count: usize,
        /// The threshold the count must exceed.
        minimum: usize,
    },

    /// No nominator alias field was populated.
    #[error("Nominator name not found")]
    MissingNominator,

    /// The funding organization could not be determined.
    #[error("Unable to determine funding organization from divisions: {}", divisions.join(", "))]
    MissingFundingOrg {
        /// The candidate division values that were inspected.
        divisions: Vec<String>,
    },

    /// None of the award type markers were present.
    #[error("Unable to determine the award type")]
    UndeterminedAwardType,

    /// No justification field was found on the last page.
    #[error("Award justification not found")]
    MissingJustification,

    /// The individual nominee's name field was not populated.
    #[error("Nominee name not found")]
    MissingNominee,

    /// A monetary or hours field did not contain a number.
    #[error("Invalid numerical value in field '{field}': {value}")]
    InvalidAmount {
        /// The field key holding the value.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// No nominee name fields were populated at all.
    #[error("No nominees detected")]
    NoNomineesDetected,

    /// Names were detected but no slot produced a nominee record.
    #[error("Unable to process nominees")]
    NoNomineesProcessed,

    /// More nominee names were detected than slots were processed.
    #[error(
        "Number of nominees detected does not match number of nominees processed\nDetected: {}\n\t{}\nProcessed: {}\n\t{}",
        detected.len(),
        detected.join("\n\t"),
        processed.len(),
        processed.join("\n\t")
    )]
    NomineeCountMismatch {
        /// `key: value` of every distinct detected name field.
        detected: Vec<String>,
        /// Summary of every processed nominee record.
        processed: Vec<String>,
    },

    /// A nominee requested neither money nor time off.
    #[error("No award amounts found.\n\t{}", anomalies.join("\n\t"))]
    ZeroAmountNominee {
        /// Summary of each nominee with both amounts zero.
        anomalies: Vec<String>,
    },

    /// The combined monetary and time-off percentage exceeds 100%.
    #[error("{breakdown}")]
    AwardLimitExceeded {
        /// Full breakdown of limits, totals and percentages.
        breakdown: Box<LimitBreakdown>,
    },

    /// The nominator and the sole nominee are the same person.
    #[error("Self-nomination is not allowed: nominator and nominee are both '{name}'")]
    SelfNomination {
        /// The shared canonical name.
        name: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A source document could not be read or decoded.
    #[error("Failed to read document '{path}': {message}")]
    SourceRead {
        /// The document path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The serial counter store could not be read or written.
    #[error("Counter store error at '{path}': {message}")]
    CounterStore {
        /// The counter store path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An output collaborator failed.
    #[error("Failed to write output '{target}': {message}")]
    Output {
        /// The output file or path involved.
        target: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidDocumentShape { .. }
            | EngineError::InsufficientFieldCount { .. } => ErrorKind::DocumentShape,
            EngineError::MissingNominator
            | EngineError::MissingFundingOrg { .. }
            | EngineError::UndeterminedAwardType
            | EngineError::MissingJustification
            | EngineError::MissingNominee
            | EngineError::InvalidAmount { .. } => ErrorKind::Extraction,
            EngineError::NoNomineesDetected
            | EngineError::NoNomineesProcessed
            | EngineError::NomineeCountMismatch { .. }
            | EngineError::ZeroAmountNominee { .. } => ErrorKind::NomineeAssembly,
            EngineError::AwardLimitExceeded { .. } => ErrorKind::PolicyViolation,
            EngineError::SelfNomination { .. } => ErrorKind::SelfNomination,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
            EngineError::SourceRead { .. }
            | EngineError::CounterStore { .. }
            | EngineError::Output { .. } => ErrorKind::Io,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
