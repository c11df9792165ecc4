//! Nominator extraction.

use crate::error::{EngineError, EngineResult};
use crate::models::FieldMap;

use super::canonical_name;

/// First-page keys that hold the nominator's printed name.
pub const NOMINATOR_KEYS: [&str; 4] = [
    "please_print",
    "nominators_name",
    "nominator_s_name",
    "nominator_name",
];

/// Returns the nominator's canonical name.
///
/// The first first-page field (in document order) whose key is one of
/// [`NOMINATOR_KEYS`] is used.
///
/// # Errors
///
/// Returns `MissingNominator` if none of the alias fields is populated.
///
/// # Example
///
/// ```
/// use award_intake::intake::extract_nominator;
/// use award_intake::models::FieldMap;
///
/// let fields: FieldMap = [("please_print", "Jane A. Smith")].into_iter().collect();
/// assert_eq!(extract_nominator(&fields).unwrap(), "Smith, Jane");
/// ```
pub fn extract_nominator(first_page: &FieldMap) -> EngineResult<String> {
    first_page
        .iter()
        .find(|(key, _)| NOMINATOR_KEYS.contains(key))
        .map(|(_, value)| canonical_name(value))
        .ok_or(EngineError::MissingNominator)
}
