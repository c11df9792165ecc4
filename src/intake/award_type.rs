//! Award type determination.
//!
//! The two form shapes mark the award type differently: the individual
//! form must carry an explicit marker, while the group form only marks the
//! on-the-spot variant and otherwise means a special act or service.

use crate::error::{EngineError, EngineResult};
use crate::models::{AwardCategory, AwardType, FieldMap};

/// First-page keys that mark a special act or service award.
pub const SPECIAL_ACT_MARKERS: [&str; 4] = [
    "hours_2",
    "time_off_award",
    "special_act_or_service",
    "undefined",
];

/// First-page keys that mark an on-the-spot award.
pub const ON_THE_SPOT_MARKERS: [&str; 2] = ["on_the_spot", "hours"];

/// Determines the award type from first-page marker fields.
///
/// For individual forms a special-act marker wins, then an on-the-spot
/// marker; with neither present the type is undetermined. For group forms
/// an on-the-spot marker selects [`AwardType::OnTheSpot`] and anything
/// else is [`AwardType::SpecialActOrService`].
///
/// # Errors
///
/// Returns `UndeterminedAwardType` for an individual form with no marker.
///
/// # Example
///
/// ```
/// use award_intake::intake::determine_award_type;
/// use award_intake::models::{AwardCategory, AwardType, FieldMap};
///
/// let fields: FieldMap = [("on_the_spot", "Yes")].into_iter().collect();
/// assert_eq!(
///     determine_award_type(&fields, AwardCategory::Individual).unwrap(),
///     AwardType::OnTheSpot
/// );
/// ```
pub fn determine_award_type(first_page: &FieldMap, category: AwardCategory) -> EngineResult<AwardType> {
    let has_any = |markers: &[&str]| first_page.keys().any(|key| markers.contains(&key));

    match category {
        AwardCategory::Individual => {
            if has_any(&SPECIAL_ACT_MARKERS) {
                Ok(AwardType::SpecialActOrService)
            } else if has_any(&ON_THE_SPOT_MARKERS) {
                Ok(AwardType::OnTheSpot)
            } else {
                Err(EngineError::UndeterminedAwardType)
            }
        }
        AwardCategory::Group => {
            if has_any(&ON_THE_SPOT_MARKERS) {
                Ok(AwardType::OnTheSpot)
            } else {
                Ok(AwardType::SpecialActOrService)
            }
        }
    }
}
