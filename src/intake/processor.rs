//! Document processing pipeline.
//!
//! Runs one normalized document through category classification,
//! attribute extraction, nominee assembly, value/extent classification and
//! the commensurate limit check, then assigns its identifier. Every decision
//! is recorded as an [`AuditStep`]; any rejection is an [`EngineError`] and
//! leaves nothing behind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, AwardCategory, AwardRecord, Nominees, SourceDocument,
};

use super::{
    LimitBreakdown, Resolver, SerialAllocator, ValueExtentOutcome, ValueExtentSource,
    assemble_nominees, classify_value_extent, determine_award_type, determine_category,
    determine_received_date, existing_id, extract_funding_org, extract_individual_nominee,
    extract_justification, extract_nominator, nominee_slots, validate_award_limits,
};

/// Where an award's identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSource {
    /// Taken from the serial counter; the counter must be advanced once the
    /// record is written out.
    Allocated,
    /// Carried over from a document renamed by an earlier run.
    Existing,
}

/// Everything produced for one accepted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedAward {
    /// The validated record.
    pub record: AwardRecord,
    /// Where the identifier came from.
    pub id_source: IdSource,
    /// How value/extent was determined, if it was.
    pub value_extent_source: Option<ValueExtentSource>,
    /// The passed limit check, absent when value/extent is undetermined.
    pub limit_check: Option<LimitBreakdown>,
    /// Decisions taken, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Gaps that did not reject the document.
    pub warnings: Vec<AuditWarning>,
}

/// Processes one document.
///
/// # Arguments
///
/// * `document` - The normalized source document
/// * `allocator` - Serial counter snapshot; only peeked, never advanced
/// * `today` - Processing date, used when no received date is given
/// * `resolver` - Answers value/extent and funding organization questions
///
/// # Returns
///
/// The processed award, or the first error that rejects the document.
///
/// # Errors
///
/// Any extraction, nominee assembly, limit or self-nomination error.
pub fn process_document(
    document: &SourceDocument,
    allocator: &SerialAllocator,
    today: NaiveDate,
    resolver: &mut dyn Resolver,
) -> EngineResult<ProcessedAward> {
    debug!(document = %document.name, pages = document.page_count, "Processing document");

    let fields = &document.fields;
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: category
    let category_result = determine_category(document.page_count, step_number)?;
    let category = category_result.category;
    audit_steps.push(category_result.audit_step);
    step_number += 1;

    // Step 2: attributes
    let received = determine_received_date(&fields.first_page, today);
    let award_type = determine_award_type(&fields.first_page, category)?;
    let nominator = extract_nominator(&fields.first_page)?;
    let funding_org = extract_funding_org(&fields.first_page, resolver)?;
    let justification = extract_justification(&fields.last_page)?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "award_attributes".to_string(),
        rule_name: "Award Attributes".to_string(),
        clause_ref: String::new(),
        input: serde_json::json!({ "first_page_fields": fields.first_page.len() }),
        output: serde_json::json!({
            "received": received,
            "award_type": award_type.code(),
            "nominator": nominator,
            "funding_org": funding_org,
        }),
        reasoning: format!("{} award nominated by {}", award_type, nominator),
    });
    step_number += 1;

    // Step 3: nominees
    let nominees = match category {
        AwardCategory::Individual => {
            let nominee = extract_individual_nominee(&fields.first_page)?;
            if nominee.name.eq_ignore_ascii_case(&nominator) {
                return Err(EngineError::SelfNomination { name: nominee.name });
            }
            Nominees::Individual(nominee)
        }
        AwardCategory::Group => {
            let slots = nominee_slots(document.page_count);
            Nominees::Group(assemble_nominees(slots, &fields.mid_pages)?)
        }
    };
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "nominees".to_string(),
        rule_name: "Nominee Assembly".to_string(),
        clause_ref: String::new(),
        input: serde_json::json!({ "slots": nominee_slots(document.page_count).len() }),
        output: serde_json::json!({
            "count": nominees.len(),
            "total_monetary": nominees.total_monetary().to_string(),
            "total_hours": nominees.total_hours().to_string(),
        }),
        reasoning: format!("{} nominee(s) with nonzero amounts", nominees.len()),
    });
    step_number += 1;

    // Step 4: value and extent
    let value_extent_result = classify_value_extent(&fields.last_page, &justification, resolver, step_number);
    audit_steps.push(value_extent_result.audit_step);
    step_number += 1;

    // Step 5: commensurate limit
    let limit_check = match value_extent_result.outcome {
        ValueExtentOutcome::Determined { value_extent, .. } => {
            let result = validate_award_limits(&nominees, value_extent, step_number)?;
            audit_steps.push(result.audit_step);
            Some(result.breakdown)
        }
        ValueExtentOutcome::Undetermined => {
            warn!(document = %document.name, "Limit check skipped: value/extent undetermined");
            warnings.push(AuditWarning::new(
                "VALUE_EXTENT_UNDETERMINED",
                "Value and extent could not be determined; commensurate limit not checked",
            ));
            None
        }
    };

    // Identifier last, once nothing can reject the document.
    let (id, id_source) = match existing_id(document.stem(), allocator.fiscal_prefix()) {
        Some(id) => (id, IdSource::Existing),
        None => (allocator.peek(category), IdSource::Allocated),
    };

    info!(
        document = %document.name,
        id = %id,
        category = %category,
        nominees = nominees.len(),
        "Document accepted"
    );

    Ok(ProcessedAward {
        record: AwardRecord {
            id,
            category,
            award_type,
            received,
            nominator,
            funding_org,
            justification,
            value_extent: value_extent_result.outcome.value_extent(),
            nominees,
        },
        id_source,
        value_extent_source: value_extent_result.outcome.source(),
        limit_check,
        audit_steps,
        warnings,
    })
}
