//! Funding organization extraction.
//!
//! The nominator lists one or more organization divisions on the first
//! page. Each division belongs to one of five funding families; the family
//! (or, for the distinguished family, the division itself) funds the award.

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::FieldMap;

use super::Resolver;

/// A funding organization family and the divisions it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingFamily {
    /// The family's representative code.
    pub representative: &'static str,
    /// Divisions belonging to the family, representative first.
    pub divisions: [&'static str; 5],
    /// When true the matching division itself is the funding organization.
    pub funds_by_division: bool,
}

/// Funding families in priority order.
pub const FUNDING_FAMILIES: [FundingFamily; 5] = [
    FundingFamily {
        representative: "AAA-000",
        divisions: ["AAA-000", "AAA-111", "AAA-222", "AAA-333", "AAA-444"],
        funds_by_division: true,
    },
    FundingFamily {
        representative: "BBB-000",
        divisions: ["BBB-000", "BBB-111", "BBB-222", "BBB-333", "BBB-444"],
        funds_by_division: false,
    },
    FundingFamily {
        representative: "CCC-000",
        divisions: ["CCC-000", "CCC-111", "CCC-222", "CCC-333", "CCC-444"],
        funds_by_division: false,
    },
    FundingFamily {
        representative: "DDD-000",
        divisions: ["DDD-000", "DDD-111", "DDD-222", "DDD-333", "DDD-444"],
        funds_by_division: false,
    },
    FundingFamily {
        representative: "EEE-000",
        divisions: ["EEE-000", "EEE-111", "EEE-222", "EEE-333", "EEE-444"],
        funds_by_division: false,
    },
];

/// Organization slots that repeat another slot and are ignored.
pub const DUPLICATE_ORG_KEYS: [&str; 2] = ["org_2", "organization_2"];

const ORG_KEY_PREFIXES: [&str; 2] = ["org_", "organization_"];

/// Collects the candidate division values (uppercased) from the first page.
pub fn collect_divisions(first_page: &FieldMap) -> Vec<String> {
    first_page
        .iter()
        .filter(|(key, _)| !DUPLICATE_ORG_KEYS.contains(key))
        .filter(|(key, _)| ORG_KEY_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
        .map(|(_, value)| value.to_uppercase())
        .collect()
}

/// Matches candidate divisions against the funding families.
///
/// Families are tried in priority order and the first family with any
/// matching division wins. Returns `None` when no family matches.
///
/// # Example
///
/// ```
/// use award_intake::intake::match_funding_family;
///
/// let divisions = vec!["CCC-222 (FIELD)".to_string(), "AAA-333".to_string()];
/// assert_eq!(match_funding_family(&divisions), Some("AAA-333".to_string()));
///
/// let divisions = vec!["DDD-111".to_string()];
/// assert_eq!(match_funding_family(&divisions), Some("DDD-000".to_string()));
/// ```
pub fn match_funding_family(divisions: &[String]) -> Option<String> {
    for family in &FUNDING_FAMILIES {
        for division in family.divisions {
            if divisions.iter().any(|candidate| candidate.contains(division)) {
                let funding_org = if family.funds_by_division {
                    division
                } else {
                    family.representative
                };
                return Some(funding_org.to_string());
            }
        }
    }
    None
}

/// Determines the funding organization for a document.
///
/// When no family matches, the resolver is asked to choose one of the
/// family representative codes.
///
/// # Errors
///
/// Returns `MissingFundingOrg` if there are no organization fields, or if
/// no family matches and the resolver declines to choose.
pub fn extract_funding_org(first_page: &FieldMap, resolver: &mut dyn Resolver) -> EngineResult<String> {
    let divisions = collect_divisions(first_page);
    if divisions.is_empty() {
        return Err(EngineError::MissingFundingOrg { divisions });
    }

    if let Some(funding_org) = match_funding_family(&divisions) {
        debug!(funding_org = %funding_org, "Funding organization matched");
        return Ok(funding_org);
    }

    warn!(divisions = ?divisions, "No funding family matched; asking for a selection");
    let options: Vec<&str> = FUNDING_FAMILIES.iter().map(|f| f.representative).collect();
    match resolver.select_funding_org(&divisions, &options) {
        Some(index) if index < options.len() => Ok(options[index].to_string()),
        _ => Err(EngineError::MissingFundingOrg { divisions }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{HeadlessResolver, ValueExtentCandidate};

    struct PickResolver(Option<usize>);

    impl Resolver for PickResolver {
        fn confirm_value_extent(&mut self, _candidate: &ValueExtentCandidate) -> bool {
            false
        }

        fn select_funding_org(&mut self, _divisions: &[String], _options: &[&str]) -> Option<usize> {
            self.0
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_collect_skips_duplicate_slot_and_other_keys() {
        let first = fields(&[
            ("org_1", "bbb-111"),
            ("org_2", "aaa-111"),
            ("organization_3", "ccc-222"),
            ("employee_name", "Ann Lee"),
            ("organization", "ddd-000"),
        ]);
        assert_eq!(collect_divisions(&first), vec!["BBB-111", "CCC-222"]);
    }

    #[test]
    fn test_distinguished_family_yields_division() {
        let first = fields(&[("org_1", "AAA-222 / west")]);
        let org = extract_funding_org(&first, &mut HeadlessResolver).unwrap();
        assert_eq!(org, "AAA-222");
    }

    #[test]
    fn test_other_family_yields_representative() {
        let first = fields(&[("org_1", "eee-444")]);
        let org = extract_funding_org(&first, &mut HeadlessResolver).unwrap();
        assert_eq!(org, "EEE-000");
    }

    #[test]
    fn test_first_family_in_priority_order_wins() {
        let first = fields(&[("org_1", "ddd-111"), ("org_3", "bbb-333")]);
        let org = extract_funding_org(&first, &mut HeadlessResolver).unwrap();
        assert_eq!(org, "BBB-000");
    }

    #[test]
    fn test_no_org_fields_errors() {
        let first = fields(&[("employee_name", "Ann Lee")]);
        assert!(matches!(
            extract_funding_org(&first, &mut HeadlessResolver),
            Err(EngineError::MissingFundingOrg { divisions }) if divisions.is_empty()
        ));
    }

    #[test]
    fn test_unmatched_divisions_use_resolver_selection() {
        let first = fields(&[("org_1", "zzz-900")]);
        let org = extract_funding_org(&first, &mut PickResolver(Some(2))).unwrap();
        assert_eq!(org, "CCC-000");
    }

    #[test]
    fn test_unmatched_divisions_declined_errors() {
        let first = fields(&[("org_1", "zzz-900")]);
        match extract_funding_org(&first, &mut HeadlessResolver) {
            Err(EngineError::MissingFundingOrg { divisions }) => {
                assert_eq!(divisions, vec!["ZZZ-900"]);
            }
            other => panic!("Expected MissingFundingOrg, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_selection_errors() {
        let first = fields(&[("org_1", "zzz-900")]);
        assert!(extract_funding_org(&first, &mut PickResolver(Some(9))).is_err());
    }
}
