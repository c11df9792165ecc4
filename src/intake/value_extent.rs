//! Value and extent classification.
//!
//! The last page of every form carries two rows of checkboxes: the value of
//! the contribution and the extent of its application. When the boxes are
//! left blank, nominators usually say it in the justification instead, so
//! the text is scanned for a nearby pair of tier labels and the pair is put
//! to the [`Resolver`] for confirmation.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{AuditStep, ExtentTier, FieldMap, ValueExtent, ValueTier};

use super::{JUSTIFICATION_KEY_FRAGMENT, Resolver};

/// Checkbox value meaning "checked".
pub const CHECKED_VALUE: &str = "on";

/// Number of words in one scan window.
pub const SCAN_WINDOW_WORDS: usize = 12;

/// Number of words between the starts of consecutive scan windows.
pub const SCAN_STEP_WORDS: usize = 6;

/// How a value/extent pair was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueExtentSource {
    /// Exactly one box of each row was checked.
    Checkbox,
    /// Found in the free text and confirmed by the operator.
    ConfirmedScan,
}

/// A value/extent pair found in free text, awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueExtentCandidate {
    /// The proposed pair.
    pub value_extent: ValueExtent,
    /// The window of text it was found in, with the labels wrapped in `**`.
    pub excerpt: String,
}

/// The outcome of value/extent classification.
///
/// `Undetermined` is not an error: the document continues without a limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExtentOutcome {
    /// A pair was determined.
    Determined {
        /// The pair.
        value_extent: ValueExtent,
        /// Where it came from.
        source: ValueExtentSource,
    },
    /// No pair could be determined or the candidate was declined.
    Undetermined,
}

impl ValueExtentOutcome {
    /// Returns the pair if one was determined.
    pub fn value_extent(&self) -> Option<ValueExtent> {
        match self {
            ValueExtentOutcome::Determined { value_extent, .. } => Some(*value_extent),
            ValueExtentOutcome::Undetermined => None,
        }
    }

    /// Returns the source if a pair was determined.
    pub fn source(&self) -> Option<ValueExtentSource> {
        match self {
            ValueExtentOutcome::Determined { source, .. } => Some(*source),
            ValueExtentOutcome::Undetermined => None,
        }
    }
}

/// The classification outcome together with its audit step.
#[derive(Debug, Clone)]
pub struct ValueExtentResult {
    /// The outcome.
    pub outcome: ValueExtentOutcome,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Reads the checkbox rows of the last page.
///
/// Returns a pair only if exactly one box of each row is checked.
///
/// # Example
///
/// ```
/// use award_intake::intake::read_checkboxes;
/// use award_intake::models::{ExtentTier, FieldMap, ValueTier};
///
/// let last: FieldMap = [("high", "On"), ("general", "On")].into_iter().collect();
/// let pair = read_checkboxes(&last).unwrap();
/// assert_eq!(pair.value, ValueTier::High);
/// assert_eq!(pair.extent, ExtentTier::General);
/// ```
pub fn read_checkboxes(last_page: &FieldMap) -> Option<ValueExtent> {
    let checked: Vec<&str> = last_page
        .iter()
        .filter(|(_, value)| value.trim().eq_ignore_ascii_case(CHECKED_VALUE))
        .map(|(key, _)| key)
        .collect();

    let values: Vec<ValueTier> = checked.iter().filter_map(|key| ValueTier::from_label(key)).collect();
    let extents: Vec<ExtentTier> = checked.iter().filter_map(|key| ExtentTier::from_label(key)).collect();

    match (values.as_slice(), extents.as_slice()) {
        ([value], [extent]) => Some(ValueExtent::new(*value, *extent)),
        _ => None,
    }
}

/// Scans free text for the first window naming both a value and an extent.
///
/// The text is split on whitespace and read in windows of
/// [`SCAN_WINDOW_WORDS`] words starting every [`SCAN_STEP_WORDS`] words.
/// The first value label and the first extent label of the first window
/// holding both form the candidate.
///
/// # Example
///
/// ```
/// use award_intake::intake::scan_text;
/// use award_intake::models::{ExtentTier, ValueTier};
///
/// let candidate = scan_text("Her work was of high value and limited in extent.").unwrap();
/// assert_eq!(candidate.value_extent.value, ValueTier::High);
/// assert_eq!(candidate.value_extent.extent, ExtentTier::Limited);
/// assert!(candidate.excerpt.contains("**high**"));
/// ```
pub fn scan_text(text: &str) -> Option<ValueExtentCandidate> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut start = 0;

    while start < words.len() {
        let end = (start + SCAN_WINDOW_WORDS).min(words.len());
        let window = &words[start..end];

        let value = window.iter().find_map(|word| ValueTier::from_label(bare_word(word)));
        let extent = window.iter().find_map(|word| ExtentTier::from_label(bare_word(word)));

        if let (Some(value), Some(extent)) = (value, extent) {
            let excerpt = window
                .iter()
                .map(|word| {
                    let bare = bare_word(word);
                    if ValueTier::from_label(bare).is_some() || ExtentTier::from_label(bare).is_some() {
                        word.replacen(bare, &format!("**{}**", bare), 1)
                    } else {
                        word.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            return Some(ValueExtentCandidate {
                value_extent: ValueExtent::new(value, extent),
                excerpt,
            });
        }

        if end == words.len() {
            break;
        }
        start += SCAN_STEP_WORDS;
    }

    None
}

/// Determines the value/extent pair of a document.
///
/// The checkboxes are read first. Failing that, the justification followed
/// by the remaining last-page text is scanned and any candidate is put to
/// the resolver. A declined or missing candidate yields `Undetermined`.
pub fn classify_value_extent(
    last_page: &FieldMap,
    justification: &str,
    resolver: &mut dyn Resolver,
    step_number: u32,
) -> ValueExtentResult {
    if let Some(value_extent) = read_checkboxes(last_page) {
        debug!(value_extent = %value_extent, "Value/extent read from checkboxes");
        return build_result(
            ValueExtentOutcome::Determined {
                value_extent,
                source: ValueExtentSource::Checkbox,
            },
            step_number,
            "Exactly one value and one extent box checked".to_string(),
        );
    }

    let mut text = justification.trim_matches('"').to_string();
    for (key, value) in last_page.iter() {
        if !key.contains(JUSTIFICATION_KEY_FRAGMENT) {
            text.push(' ');
            text.push_str(value);
        }
    }

    let Some(candidate) = scan_text(&text) else {
        warn!("Value/extent not found in checkboxes or text; limit check skipped");
        return build_result(
            ValueExtentOutcome::Undetermined,
            step_number,
            "No checkboxes and no value/extent pair in the text".to_string(),
        );
    };

    if resolver.confirm_value_extent(&candidate) {
        debug!(value_extent = %candidate.value_extent, "Value/extent confirmed from text");
        build_result(
            ValueExtentOutcome::Determined {
                value_extent: candidate.value_extent,
                source: ValueExtentSource::ConfirmedScan,
            },
            step_number,
            format!("Confirmed from text: {}", candidate.excerpt),
        )
    } else {
        warn!(
            candidate = %candidate.value_extent,
            "Value/extent candidate declined; limit check skipped"
        );
        build_result(
            ValueExtentOutcome::Undetermined,
            step_number,
            format!("Candidate {} declined", candidate.value_extent),
        )
    }
}

fn build_result(outcome: ValueExtentOutcome, step_number: u32, reasoning: String) -> ValueExtentResult {
    let output = match &outcome {
        ValueExtentOutcome::Determined { value_extent, source } => serde_json::json!({
            "value": value_extent.value.label(),
            "extent": value_extent.extent.label(),
            "source": source,
        }),
        ValueExtentOutcome::Undetermined => serde_json::json!({ "determined": false }),
    };

    ValueExtentResult {
        outcome,
        audit_step: AuditStep {
            step_number,
            rule_id: "value_extent".to_string(),
            rule_name: "Award Value and Extent".to_string(),
            clause_ref: "NAP 332.2".to_string(),
            input: serde_json::json!({}),
            output,
            reasoning,
        },
    }
}

fn bare_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}
