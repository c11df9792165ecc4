//! Nomination intake pipeline.
//!
//! This module contains every step that turns a normalized document into
//! a validated [`AwardRecord`](crate::models::AwardRecord):
//! - Field normalization (keys, values, names, amounts)
//! - Category classification by page count
//! - Attribute extraction (nominator, funding organization, type,
//!   justification, received date)
//! - Nominee extraction and group slot assembly
//! - Value/extent classification and the commensurate limit check
//! - Serial number allocation
//!
//! [`process_document`] composes them in order.

mod award_type;
mod category;
mod funding_org;
mod individual_nominee;
mod justification;
mod limits;
mod nominator;
mod nominee_assembly;
mod normalize;
mod processor;
mod received_date;
mod resolver;
mod serial;
mod slot_config;
mod value_extent;

pub use award_type::{ON_THE_SPOT_MARKERS, SPECIAL_ACT_MARKERS, determine_award_type};
pub use category::{
    CategoryResult, GROUP_PAGE_COUNTS, INDIVIDUAL_PAGE_COUNT, classify_category, determine_category,
};
pub use funding_org::{
    DUPLICATE_ORG_KEYS, FUNDING_FAMILIES, FundingFamily, collect_divisions, extract_funding_org,
    match_funding_family,
};
pub use individual_nominee::extract_individual_nominee;
pub use justification::{JUSTIFICATION_KEY_FRAGMENT, extract_justification, format_justification};
pub use limits::{
    HOURS_LIMITS, LimitBreakdown, LimitCheckResult, MONETARY_LIMITS, hours_limit, monetary_limit,
    validate_award_limits,
};
pub use nominator::{NOMINATOR_KEYS, extract_nominator};
pub use nominee_assembly::assemble_nominees;
pub use normalize::{MAX_AMOUNT, canonical_key, canonical_name, clean_text, parse_amount};
pub use processor::{IdSource, ProcessedAward, process_document};
pub use received_date::determine_received_date;
pub use resolver::{ConsoleResolver, HeadlessResolver, Resolver};
pub use serial::{CounterStore, JsonCounterStore, SerialAllocator, SerialCounter, existing_id};
pub use slot_config::{
    FOURTEEN_SLOT_LAYOUT, NomineeSlot, REUSED_SLOT_INDICES, SEVEN_SLOT_LAYOUT, TWENTY_ONE_SLOT_LAYOUT,
    is_reused_slot, nominee_slots,
};
pub use value_extent::{
    ValueExtentCandidate, ValueExtentOutcome, ValueExtentResult, ValueExtentSource,
    classify_value_extent, read_checkboxes, scan_text,
};
