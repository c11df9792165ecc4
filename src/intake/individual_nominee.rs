//! Individual nominee extraction.
//!
//! The two-page form keeps its single nominee on the first page, next to
//! the award type markers.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{FieldMap, NomineeRecord};

use super::{canonical_name, parse_amount};

/// Key fragment of the nominee name field.
pub const NOMINEE_NAME_FRAGMENT: &str = "employee_name";

/// Key fragments of fields that may hold the monetary amount.
pub const MONETARY_FRAGMENTS: [&str; 3] = ["amount", "undefined", "the_spot"];

/// Key fragment of the time-off hours field.
pub const HOURS_FRAGMENT: &str = "hours";

/// Extracts the sole nominee of an individual award.
///
/// The name comes from the first key containing `employee_name`; the
/// monetary amount from the last key containing one of
/// [`MONETARY_FRAGMENTS`]; hours from the first key containing `hours`.
/// Missing amounts count as zero.
///
/// # Errors
///
/// - `MissingNominee` if no name field is populated
/// - `InvalidAmount` if an amount field holds no number
/// - `ZeroAmountNominee` if both amounts are zero
pub fn extract_individual_nominee(first_page: &FieldMap) -> EngineResult<NomineeRecord> {
    let name = first_page
        .iter()
        .find(|(key, _)| key.contains(NOMINEE_NAME_FRAGMENT))
        .map(|(_, value)| canonical_name(value))
        .ok_or(EngineError::MissingNominee)?;

    let monetary_amount = match first_page
        .iter()
        .filter(|(key, _)| MONETARY_FRAGMENTS.iter().any(|f| key.contains(f)))
        .last()
    {
        Some((key, value)) => parse_amount(key, value)?,
        None => Decimal::ZERO,
    };

    let time_off_hours = match first_page.iter().find(|(key, _)| key.contains(HOURS_FRAGMENT)) {
        Some((key, value)) => parse_amount(key, value)?,
        None => Decimal::ZERO,
    };

    let nominee = NomineeRecord::new(name, monetary_amount, time_off_hours);
    if !nominee.has_amount() {
        return Err(EngineError::ZeroAmountNominee {
            anomalies: vec![nominee.summary()],
        });
    }

    Ok(nominee)
}
