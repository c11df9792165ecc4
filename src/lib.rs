//! Award Intake Engine for special act and on-the-spot award nominations
//!
//! This crate reads the form fields of scanned nomination documents,
//! assembles their nominees, validates award amounts against the
//! commensurate limits for the nominated value and extent, and records
//! each accepted award under a fiscal-year serial identifier.

#![warn(missing_docs)]

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod intake;
pub mod models;
