//! Field normalization.
//!
//! Form readers hand back labels and values in whatever shape the form
//! author typed them. These functions turn them into canonical keys,
//! cleaned values, canonical `Last, First` names and decimal amounts.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

static CARRIAGE_RETURNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n?").unwrap());
static TABS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static ALNUM_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]+").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,]*\d(?:\.\d+)?").unwrap());

/// Honorifics removed from person names (compared without a trailing period).
pub const HONORIFIC_TITLES: [&str; 15] = [
    "dr", "mr", "mrs", "ms", "miss", "prof", "rev", "hon", "sir", "lady", "capt", "col", "maj",
    "gen", "adm",
];

/// Largest amount a form field may hold, in dollars or hours.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Credential suffixes removed from person names.
pub const CREDENTIAL_SUFFIXES: [&str; 13] = [
    "phd", "md", "jr", "sr", "ii", "iii", "iv", "esq", "pe", "cpa", "mba", "rn", "dds",
];

/// Cleans raw field text.
///
/// Non-ASCII characters are dropped, carriage returns become newlines, tabs
/// become spaces, and runs of blank lines or spaces collapse to one.
/// Returns `None` when nothing is left.
///
/// # Example
///
/// ```
/// use award_intake::intake::clean_text;
///
/// assert_eq!(clean_text("  caf\u{e9}\tbar\r\n\r\nbaz  "), Some("caf bar\nbaz".to_string()));
/// assert_eq!(clean_text(" \t "), None);
/// ```
pub fn clean_text(text: &str) -> Option<String> {
    let ascii: String = text.trim().chars().filter(char::is_ascii).collect();
    let text = CARRIAGE_RETURNS.replace_all(&ascii, "\n");
    let text = TABS.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Derives the canonical key for a field label.
///
/// Alphanumeric runs are lowercased and joined with `_`; a label with no
/// alphanumeric content has no key.
///
/// # Example
///
/// ```
/// use award_intake::intake::canonical_key;
///
/// assert_eq!(canonical_key("Nominator's Name"), Some("nominator_s_name".to_string()));
/// assert_eq!(canonical_key("Employee Name_3"), Some("employee_name_3".to_string()));
/// assert_eq!(canonical_key("--"), None);
/// ```
pub fn canonical_key(label: &str) -> Option<String> {
    let text = clean_text(label)?;
    let runs: Vec<&str> = ALNUM_RUNS.find_iter(&text).map(|m| m.as_str()).collect();
    if runs.is_empty() {
        return None;
    }
    Some(runs.join("_").to_lowercase())
}

/// Formats a person's name as `Last, First`.
///
/// Titles, credential suffixes and enclosed nicknames are removed first.
/// Two remaining tokens without a comma or period are swapped; three tokens
/// whose middle one is an initial (one or two characters) become
/// `Last, First`. Any other shape passes through unchanged. The result
/// is always title-cased, so `McDonald` becomes `Mcdonald`. Never fails.
///
/// # Example
///
/// ```
/// use award_intake::intake::canonical_name;
///
/// assert_eq!(canonical_name("Dr. John Q. Public"), "Public, John");
/// assert_eq!(canonical_name("jane smith"), "Smith, Jane");
/// assert_eq!(canonical_name("Smith, Jane"), "Smith, Jane");
/// ```
pub fn canonical_name(raw: &str) -> String {
    let Some(cleaned) = clean_text(raw) else {
        return raw.trim().to_string();
    };

    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|token| !is_title(token) && !is_credential(token) && !is_enclosed(token))
        .collect();

    if tokens.is_empty() {
        return title_case(&cleaned);
    }

    let joined = tokens.join(" ");
    let formatted = match tokens.as_slice() {
        [last, first] if last.contains(',') => {
            format!("{}, {}", trim_commas(last), trim_commas(first))
        }
        [first, last] if !joined.contains('.') => {
            format!("{}, {}", trim_commas(last), trim_commas(first))
        }
        [first, middle, last] if !first.contains(',') && (1..=2).contains(&middle.len()) => {
            format!("{}, {}", trim_commas(last), trim_commas(first))
        }
        _ => joined,
    };

    title_case(&formatted)
}

/// Extracts a decimal amount from field text.
///
/// The first number in the text is used, with thousands separators
/// removed, so `"$1,250.00"` yields `1250.00`.
///
/// # Errors
///
/// Returns `InvalidAmount` if the text holds no digits or the number is
/// above [`MAX_AMOUNT`].
///
/// # Example
///
/// ```
/// use award_intake::intake::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("award_amount", "$1,250").unwrap(), Decimal::new(1250, 0));
/// assert!(parse_amount("award_amount", "n/a").is_err());
/// ```
pub fn parse_amount(field: &str, text: &str) -> EngineResult<Decimal> {
    let invalid = || EngineError::InvalidAmount {
        field: field.to_string(),
        value: text.to_string(),
    };

    let matched = NUMBER.find(text).ok_or_else(invalid)?;
    let digits = matched.as_str().replace(',', "");
    let amount = Decimal::from_str(&digits).map_err(|_| invalid())?;
    if amount > MAX_AMOUNT {
        return Err(invalid());
    }
    Ok(amount)
}

fn bare(token: &str) -> String {
    token
        .trim_matches(|c: char| c == '.' || c == ',')
        .to_ascii_lowercase()
}

fn is_title(token: &str) -> bool {
    let bare = bare(token);
    HONORIFIC_TITLES.contains(&bare.as_str())
}

fn is_credential(token: &str) -> bool {
    let bare = bare(token).replace('.', "");
    CREDENTIAL_SUFFIXES.contains(&bare.as_str())
}

fn is_enclosed(token: &str) -> bool {
    if token.len() < 2 {
        return false;
    }
    (token.starts_with('(') && token.ends_with(')'))
        || (token.starts_with('"') && token.ends_with('"'))
        || (token.starts_with('\'') && token.ends_with('\''))
}

fn trim_commas(token: &str) -> &str {
    token.trim_matches(',')
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alpha = false;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            if previous_alpha {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c.to_ascii_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(c);
            previous_alpha = false;
        }
    }
    out
}
