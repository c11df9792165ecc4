//! Received date extraction.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::FieldMap;

/// First-page key of the received date.
pub const DATE_RECEIVED_KEY: &str = "date_received";

/// Placeholder meaning "use the processing date".
pub const TODAY_PLACEHOLDER: &str = "today";

// Two-digit years must be tried first: `%Y` would accept "23" as year 23.
const FULL_DATE_FORMATS: [&str; 3] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Returns the date the nomination was received, as text.
///
/// An explicit `date_received` value is used unless it is the `today`
/// placeholder. Recognised formats are normalised to `YYYY-MM-DD`;
/// anything else is kept as written. Without a usable value the
/// processing date is returned. Never fails.
///
/// # Example
///
/// ```
/// use award_intake::intake::determine_received_date;
/// use award_intake::models::FieldMap;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
/// let fields: FieldMap = [("date_received", "3/7/2024")].into_iter().collect();
/// assert_eq!(determine_received_date(&fields, today), "2024-03-07");
///
/// let fields: FieldMap = [("date_received", "Today")].into_iter().collect();
/// assert_eq!(determine_received_date(&fields, today), "2024-05-20");
/// ```
pub fn determine_received_date(first_page: &FieldMap, today: NaiveDate) -> String {
    match first_page.get(DATE_RECEIVED_KEY) {
        Some(value) if !value.eq_ignore_ascii_case(TODAY_PLACEHOLDER) => {
            normalize_date(value, today.year()).unwrap_or_else(|| {
                debug!(value = %value, "Unrecognised received date kept as written");
                value.to_string()
            })
        }
        _ => today.format("%Y-%m-%d").to_string(),
    }
}

/// Parses the date formats used on the form; `%m/%d` takes `current_year`.
fn normalize_date(text: &str, current_year: i32) -> Option<String> {
    let text = text.trim();
    let parsed = FULL_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&format!("{}/{}", text, current_year), "%m/%d/%Y").ok()
        })?;
    Some(parsed.format("%Y-%m-%d").to_string())
}
