//! Award value and extent tiers.
//!
//! Value measures how significant a contribution was, extent measures how
//! far its benefit reaches. Together they index the limit tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three value tiers, in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTier {
    /// Moderate value.
    Moderate,
    /// High value.
    High,
    /// Exceptional value.
    Exceptional,
}

impl ValueTier {
    /// Every tier in table order.
    pub const ALL: [ValueTier; 3] = [ValueTier::Moderate, ValueTier::High, ValueTier::Exceptional];

    /// Row index into the limit tables.
    pub fn index(self) -> usize {
        match self {
            ValueTier::Moderate => 0,
            ValueTier::High => 1,
            ValueTier::Exceptional => 2,
        }
    }

    /// The form label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            ValueTier::Moderate => "moderate",
            ValueTier::High => "high",
            ValueTier::Exceptional => "exceptional",
        }
    }

    /// Looks a tier up by its form label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(label))
    }
}

/// The three extent tiers, in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentTier {
    /// Benefit limited to a small area.
    Limited,
    /// Benefit extended across an organization.
    Extended,
    /// General benefit.
    General,
}

impl ExtentTier {
    /// Every tier in table order.
    pub const ALL: [ExtentTier; 3] = [ExtentTier::Limited, ExtentTier::Extended, ExtentTier::General];

    /// Column index into the limit tables.
    pub fn index(self) -> usize {
        match self {
            ExtentTier::Limited => 0,
            ExtentTier::Extended => 1,
            ExtentTier::General => 2,
        }
    }

    /// The form label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            ExtentTier::Limited => "limited",
            ExtentTier::Extended => "extended",
            ExtentTier::General => "general",
        }
    }

    /// Looks a tier up by its form label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(label))
    }
}

/// A fully determined value/extent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueExtent {
    /// The value tier.
    pub value: ValueTier,
    /// The extent tier.
    pub extent: ExtentTier,
}

impl ValueExtent {
    /// Creates a value/extent pair.
    pub fn new(value: ValueTier, extent: ExtentTier) -> Self {
        Self { value, extent }
    }
}

impl fmt::Display for ValueExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value.label(), self.extent.label())
    }
}
