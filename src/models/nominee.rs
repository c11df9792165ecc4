//! Nominee model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One person receiving (part of) an award.
///
/// At least one of the two amounts must be nonzero; a record with both at
/// zero means the amounts were lost during extraction.
///
/// # Example
///
/// ```
/// use award_intake::models::NomineeRecord;
/// use rust_decimal::Decimal;
///
/// let nominee = NomineeRecord::new("Lee, Ann", Decimal::new(250, 0), Decimal::ZERO);
/// assert!(nominee.has_amount());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineeRecord {
    /// Canonical `Last, First` name.
    pub name: String,
    /// Requested monetary amount in dollars.
    pub monetary_amount: Decimal,
    /// Requested time-off hours.
    pub time_off_hours: Decimal,
}

impl NomineeRecord {
    /// Creates a nominee record.
    pub fn new(name: impl Into<String>, monetary_amount: Decimal, time_off_hours: Decimal) -> Self {
        Self {
            name: name.into(),
            monetary_amount,
            time_off_hours,
        }
    }

    /// Returns true if either amount is nonzero.
    pub fn has_amount(&self) -> bool {
        !self.monetary_amount.is_zero() || !self.time_off_hours.is_zero()
    }

    /// One-line summary used in error listings.
    pub fn summary(&self) -> String {
        format!(
            "Name: {}, Monetary: {}, Hours: {}",
            self.name,
            self.monetary_amount.normalize(),
            self.time_off_hours.normalize()
        )
    }
}
