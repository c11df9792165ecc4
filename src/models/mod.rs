//! Core data models for the Award Intake Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod award;
mod document;
mod nominee;
mod raw_fields;
mod value_extent;

pub use audit::{AuditStep, AuditWarning};
pub use award::{AwardCategory, AwardId, AwardRecord, AwardType, Nominees};
pub use document::SourceDocument;
pub use nominee::NomineeRecord;
pub use raw_fields::{FieldEntry, FieldMap, MIN_FIELD_COUNT, RawFieldSet};
pub use value_extent::{ExtentTier, ValueExtent, ValueTier};
