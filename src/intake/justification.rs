//! Justification extraction.

use crate::error::{EngineError, EngineResult};
use crate::models::FieldMap;

use super::clean_text;

/// Last-page keys containing this fragment hold the justification.
pub const JUSTIFICATION_KEY_FRAGMENT: &str = "extent";

/// Normalizes justification text for output.
///
/// The text is cleaned to ASCII, doubled and plain double quotes become
/// single quotes, and the result is wrapped in double quotes so it
/// survives as one spreadsheet cell.
///
/// # Example
///
/// ```
/// use award_intake::intake::format_justification;
///
/// assert_eq!(
///     format_justification("Led the \"\"zero downtime\"\" cutover"),
///     "\"Led the 'zero downtime' cutover\""
/// );
/// ```
pub fn format_justification(text: &str) -> String {
    let cleaned = clean_text(text).unwrap_or_default();
    let quoted = cleaned.replace("\"\"", "'").replace('"', "'");
    format!("\"{}\"", quoted)
}

/// Returns the formatted justification from the last page.
///
/// # Errors
///
/// Returns `MissingJustification` if no last-page key contains `extent`.
pub fn extract_justification(last_page: &FieldMap) -> EngineResult<String> {
    last_page
        .iter()
        .find(|(key, _)| key.contains(JUSTIFICATION_KEY_FRAGMENT))
        .map(|(_, value)| format_justification(value))
        .ok_or(EngineError::MissingJustification)
}
