//! Commensurate award limits.
//!
//! The value/extent pair indexes two tables: the largest monetary award and
//! the largest time-off award the contribution justifies. A nomination may
//! combine both, provided the two fractions of their limits sum to at most
//! one. For a group the sum covers every nominee: the total may not exceed
//! what a single contributor could have received.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AwardCategory, NomineeRecord, Nominees, ValueExtent};

/// Monetary limits in dollars; rows are value tiers, columns extent tiers.
pub const MONETARY_LIMITS: [[u32; 3]; 3] = [
    [500, 1000, 3000],   // moderate
    [1000, 3000, 6000],  // high
    [3000, 6000, 10000], // exceptional
];

/// Time-off limits in hours; rows are value tiers, columns extent tiers.
pub const HOURS_LIMITS: [[u32; 3]; 3] = [
    [9, 18, 27],  // moderate
    [18, 27, 36], // high
    [27, 36, 40], // exceptional
];

const GROUP_POLICY: &str = "NAP 332.2 - page 11, attached
    - The total amount of a special act or service award to multiple employees is based on
      the value of the tangible and intangible benefits accruing from the contribution.
    - The total amount of the award may not exceed the amount that would be authorized
      if the contribution had been made by one individual.";

const INDIVIDUAL_POLICY: &str = "NAP 332.2 - page 22, attached
    Examples of combining award types:
    - A nomination for $250 and 4.5 hours of time-off meets the commensurate 100% total because
      $250 divided by $500 is 50%, and 50% of 9 hours is 4.5 hours.
    - A combined nomination for $250 and 8 hours would equate to too many hours to equal 100%.
    - In this scenario, either the monetary award or the time off hours would need to be adjusted
      to equal a combined 100%.";

/// Monetary limit for a value/extent pair.
///
/// # Example
///
/// ```
/// use award_intake::intake::monetary_limit;
/// use award_intake::models::{ExtentTier, ValueExtent, ValueTier};
///
/// let pair = ValueExtent::new(ValueTier::High, ExtentTier::Extended);
/// assert_eq!(monetary_limit(pair), 3000);
/// ```
pub fn monetary_limit(value_extent: ValueExtent) -> u32 {
    MONETARY_LIMITS[value_extent.value.index()][value_extent.extent.index()]
}

/// Time-off limit in hours for a value/extent pair.
pub fn hours_limit(value_extent: ValueExtent) -> u32 {
    HOURS_LIMITS[value_extent.value.index()][value_extent.extent.index()]
}

/// Everything that went into a limit decision.
///
/// Percentages are stored as fractions; `total_pct` of exactly one is
/// within the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitBreakdown {
    /// Individual or group; selects the policy citation.
    pub category: AwardCategory,
    /// The pair the limits were looked up with.
    pub value_extent: ValueExtent,
    /// Monetary limit in dollars.
    pub monetary_limit: Decimal,
    /// Time-off limit in hours.
    pub hours_limit: Decimal,
    /// Every nominee counted towards the totals.
    pub nominees: Vec<NomineeRecord>,
    /// Sum of monetary amounts.
    pub total_monetary: Decimal,
    /// Sum of time-off hours.
    pub total_hours: Decimal,
    /// `total_monetary / monetary_limit`.
    pub monetary_pct: Decimal,
    /// `total_hours / hours_limit`.
    pub hours_pct: Decimal,
    /// Sum of both fractions.
    pub total_pct: Decimal,
}

impl LimitBreakdown {
    /// Computes the breakdown for a set of nominees.
    pub fn compute(nominees: &Nominees, value_extent: ValueExtent) -> Self {
        let category = match nominees {
            Nominees::Individual(_) => AwardCategory::Individual,
            Nominees::Group(_) => AwardCategory::Group,
        };
        let monetary_limit = Decimal::from(monetary_limit(value_extent));
        let hours_limit = Decimal::from(hours_limit(value_extent));
        let total_monetary = nominees.total_monetary();
        let total_hours = nominees.total_hours();
        let monetary_pct = total_monetary / monetary_limit;
        let hours_pct = total_hours / hours_limit;

        Self {
            category,
            value_extent,
            monetary_limit,
            hours_limit,
            nominees: nominees.as_slice().to_vec(),
            total_monetary,
            total_hours,
            monetary_pct,
            hours_pct,
            total_pct: monetary_pct.saturating_add(hours_pct),
        }
    }

    /// Returns true if the combined percentage exceeds 100%.
    pub fn exceeds_limit(&self) -> bool {
        self.total_pct > Decimal::ONE
    }

    /// The policy text quoted when the limit is exceeded.
    pub fn policy_citation(&self) -> &'static str {
        match self.category {
            AwardCategory::Individual => INDIVIDUAL_POLICY,
            AwardCategory::Group => GROUP_POLICY,
        }
    }
}

fn percent(fraction: Decimal) -> String {
    format!("{:.2}%", fraction.saturating_mul(Decimal::ONE_HUNDRED).round_dp(2))
}

impl fmt::Display for LimitBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self.nominees.iter().map(|n| n.name.len()).max().unwrap_or(0) + 4;
        let money_width = self
            .nominees
            .iter()
            .map(|n| n.monetary_amount.normalize().to_string().len())
            .chain(std::iter::once(self.total_monetary.normalize().to_string().len()))
            .max()
            .unwrap_or(0)
            + 4;

        writeln!(
            f,
            "Error: Award amounts exceed the maximum allowed based on the selected award value and extent."
        )?;
        writeln!(f)?;
        writeln!(f, "Award Details:")?;
        writeln!(f, "- Value:   {}", self.value_extent.value.label())?;
        writeln!(f, "- Extent:  {}", self.value_extent.extent.label())?;
        writeln!(f)?;
        writeln!(f, "Limits:")?;
        writeln!(f, "- Monetary:  ${}", self.monetary_limit)?;
        writeln!(f, "- Time-Off:  {} hours", self.hours_limit)?;
        writeln!(f)?;
        match self.category {
            AwardCategory::Individual => writeln!(f, "Nominee:")?,
            AwardCategory::Group => writeln!(f, "Nominees:")?,
        }
        for nominee in &self.nominees {
            writeln!(
                f,
                "- {:<name_width$}Monetary: ${:<money_width$}Hours: {}",
                nominee.name,
                nominee.monetary_amount.normalize().to_string(),
                nominee.time_off_hours.normalize(),
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Total Monetary:   ${:<money_width$}{} of limit.",
            self.total_monetary.normalize().to_string(),
            percent(self.monetary_pct)
        )?;
        writeln!(
            f,
            "Time-Off Total:    {:<money_width$}{} of limit.",
            self.total_hours.normalize().to_string(),
            percent(self.hours_pct)
        )?;
        writeln!(f)?;
        writeln!(f, "Percentage Sum:   {}", percent(self.total_pct))?;
        writeln!(f, "Max Allowed:      100%")?;
        writeln!(f)?;
        writeln!(f, "{}", self.policy_citation())?;
        writeln!(f)?;
        writeln!(f, "Please make the appropriate corrections and resubmit for processing.")?;
        writeln!(f)?;
        write!(f, "Thank you.")
    }
}

/// The result of a passed limit check, including the audit step.
#[derive(Debug, Clone)]
pub struct LimitCheckResult {
    /// The breakdown, within the limit.
    pub breakdown: LimitBreakdown,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Checks the nominees' combined request against the commensurate limits.
///
/// # Errors
///
/// Returns `AwardLimitExceeded` with the full breakdown if the combined
/// percentage is above 100%. Exactly 100% passes.
///
/// # Example
///
/// ```
/// use award_intake::intake::validate_award_limits;
/// use award_intake::models::{ExtentTier, NomineeRecord, Nominees, ValueExtent, ValueTier};
/// use rust_decimal::Decimal;
///
/// let pair = ValueExtent::new(ValueTier::Moderate, ExtentTier::Limited);
/// let nominee = NomineeRecord::new("Lee, Ann", Decimal::new(250, 0), Decimal::new(45, 1));
/// let result = validate_award_limits(&Nominees::Individual(nominee), pair, 1).unwrap();
/// assert_eq!(result.breakdown.total_pct, Decimal::ONE);
/// ```
pub fn validate_award_limits(
    nominees: &Nominees,
    value_extent: ValueExtent,
    step_number: u32,
) -> EngineResult<LimitCheckResult> {
    let breakdown = LimitBreakdown::compute(nominees, value_extent);
    debug!(
        value_extent = %value_extent,
        total_pct = %breakdown.total_pct,
        "Commensurate limit computed"
    );

    if breakdown.exceeds_limit() {
        return Err(EngineError::AwardLimitExceeded {
            breakdown: Box::new(breakdown),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "commensurate_limit".to_string(),
        rule_name: "Commensurate Award Limit".to_string(),
        clause_ref: "NAP 332.2".to_string(),
        input: serde_json::json!({
            "value": value_extent.value.label(),
            "extent": value_extent.extent.label(),
            "total_monetary": breakdown.total_monetary.to_string(),
            "total_hours": breakdown.total_hours.to_string(),
        }),
        output: serde_json::json!({
            "monetary_limit": breakdown.monetary_limit.to_string(),
            "hours_limit": breakdown.hours_limit.to_string(),
            "total_pct": percent(breakdown.total_pct),
        }),
        reasoning: format!(
            "{} of monetary limit plus {} of time-off limit is within 100%",
            percent(breakdown.monetary_pct),
            percent(breakdown.hours_pct)
        ),
    };

    Ok(LimitCheckResult {
        breakdown,
        audit_step,
    })
}
