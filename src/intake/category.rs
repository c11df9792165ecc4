//! Award category classification.
//!
//! The nomination form family comes in exactly two shapes: a two-page
//! individual form and a group form whose length (three to five pages)
//! depends on how many nominee slots it carries.

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AwardCategory};

/// Page count of the individual nomination form.
pub const INDIVIDUAL_PAGE_COUNT: usize = 2;

/// Page counts of the group nomination forms.
pub const GROUP_PAGE_COUNTS: [usize; 3] = [3, 4, 5];

/// The result of classifying a document, including the audit step.
#[derive(Debug, Clone)]
pub struct CategoryResult {
    /// The award category.
    pub category: AwardCategory,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Maps a page count to its award category.
///
/// # Errors
///
/// Returns `InvalidDocumentShape` for any page count other than 2, 3, 4 or 5.
///
/// # Example
///
/// ```
/// use award_intake::intake::classify_category;
/// use award_intake::models::AwardCategory;
///
/// assert_eq!(classify_category(2).unwrap(), AwardCategory::Individual);
/// assert_eq!(classify_category(4).unwrap(), AwardCategory::Group);
/// assert!(classify_category(6).is_err());
/// ```
pub fn classify_category(page_count: usize) -> EngineResult<AwardCategory> {
    if page_count == INDIVIDUAL_PAGE_COUNT {
        Ok(AwardCategory::Individual)
    } else if GROUP_PAGE_COUNTS.contains(&page_count) {
        Ok(AwardCategory::Group)
    } else {
        Err(EngineError::InvalidDocumentShape { page_count })
    }
}

/// Classifies a document and records the decision as an audit step.
pub fn determine_category(page_count: usize, step_number: u32) -> EngineResult<CategoryResult> {
    let category = classify_category(page_count)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "award_category".to_string(),
        rule_name: "Award Category".to_string(),
        clause_ref: String::new(),
        input: serde_json::json!({ "page_count": page_count }),
        output: serde_json::json!({ "category": category.code() }),
        reasoning: match category {
            AwardCategory::Individual => {
                format!("{} pages is the individual form", page_count)
            }
            AwardCategory::Group => format!("{} pages is a group form", page_count),
        },
    };

    Ok(CategoryResult {
        category,
        audit_step,
    })
}
