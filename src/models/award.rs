//! Award record models.
//!
//! This module contains the [`AwardRecord`] produced for every accepted
//! nomination document, together with its category, type and identifier.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{NomineeRecord, ValueExtent};

/// Award category, determined solely by document page count.
///
/// # Example
///
/// ```
/// use award_intake::models::AwardCategory;
///
/// assert_eq!(AwardCategory::Group.code(), "GRP");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardCategory {
    /// A single nominee on a two-page document.
    Individual,
    /// Up to 21 nominees on a three- to five-page document.
    Group,
}

impl AwardCategory {
    /// The short code used in identifiers and spreadsheet rows.
    pub fn code(self) -> &'static str {
        match self {
            AwardCategory::Individual => "IND",
            AwardCategory::Group => "GRP",
        }
    }
}

impl fmt::Display for AwardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Award type, derived from marker fields on the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardType {
    /// Special act or service award.
    SpecialActOrService,
    /// On-the-spot award.
    OnTheSpot,
}

impl AwardType {
    /// The short code used in spreadsheet rows.
    pub fn code(self) -> &'static str {
        match self {
            AwardType::SpecialActOrService => "SAS",
            AwardType::OnTheSpot => "OTS",
        }
    }
}

impl fmt::Display for AwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Public award identifier: `{fiscal prefix}-{category code}-{sequence}`.
///
/// # Example
///
/// ```
/// use award_intake::models::{AwardCategory, AwardId};
///
/// let id = AwardId::new("24", AwardCategory::Individual, 7);
/// assert_eq!(id.as_str(), "24-IND-007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardId(String);

impl AwardId {
    /// Formats an identifier from its parts; the sequence is zero-padded to three digits.
    pub fn new(fiscal_prefix: &str, category: AwardCategory, sequence: u32) -> Self {
        Self(format!("{}-{}-{:03}", fiscal_prefix, category.code(), sequence))
    }

    /// Wraps an identifier that was already assigned to a document.
    pub fn existing(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AwardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The nominee(s) of an award; the shape follows the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nominees {
    /// The sole nominee of an individual award.
    Individual(NomineeRecord),
    /// Group nominees in slot order.
    Group(Vec<NomineeRecord>),
}

impl Nominees {
    /// The nominees as a slice.
    pub fn as_slice(&self) -> &[NomineeRecord] {
        match self {
            Nominees::Individual(nominee) => std::slice::from_ref(nominee),
            Nominees::Group(nominees) => nominees,
        }
    }

    /// Number of nominees.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no nominees.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Sum of all monetary amounts, saturating at `Decimal::MAX`.
    pub fn total_monetary(&self) -> Decimal {
        self.as_slice()
            .iter()
            .fold(Decimal::ZERO, |total, n| total.saturating_add(n.monetary_amount))
    }

    /// Sum of all time-off hours, saturating at `Decimal::MAX`.
    pub fn total_hours(&self) -> Decimal {
        self.as_slice()
            .iter()
            .fold(Decimal::ZERO, |total, n| total.saturating_add(n.time_off_hours))
    }
}

/// A validated award built from one nomination document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRecord {
    /// The assigned identifier.
    pub id: AwardId,
    /// Individual or group.
    pub category: AwardCategory,
    /// Special act or on-the-spot.
    pub award_type: AwardType,
    /// Date the nomination was received, `YYYY-MM-DD` when recognisable.
    pub received: String,
    /// Canonical name of the nominator.
    pub nominator: String,
    /// Funding organization code.
    pub funding_org: String,
    /// Quote-wrapped justification text.
    pub justification: String,
    /// Value/extent, absent when it could not be determined.
    pub value_extent: Option<ValueExtent>,
    /// The nominee or nominees.
    pub nominees: Nominees,
}

impl AwardRecord {
    /// Label used in the new file name: the nominee name, or `N nominees` for groups.
    pub fn nominee_label(&self) -> String {
        match &self.nominees {
            Nominees::Individual(nominee) => nominee.name.clone(),
            Nominees::Group(nominees) => format!("{} nominees", nominees.len()),
        }
    }
}
