use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::CoreError;

/// One of the five tracked portfolio funds.
///
/// Variant order is the canonical display order (G, F, C, S, I), which is
/// also the iteration order of [`SelectedFunds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FundId {
    #[serde(rename = "GFund")]
    G,
    #[serde(rename = "FFund")]
    F,
    #[serde(rename = "CFund")]
    C,
    #[serde(rename = "SFund")]
    S,
    #[serde(rename = "IFund")]
    I,
}

impl FundId {
    /// The fixed fund universe.
    pub const ALL: [FundId; 5] = [FundId::G, FundId::F, FundId::C, FundId::S, FundId::I];

    /// Identifier used by the analytics service (e.g. "GFund").
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            FundId::G => "GFund",
            FundId::F => "FFund",
            FundId::C => "CFund",
            FundId::S => "SFund",
            FundId::I => "IFund",
        }
    }

    /// Human-readable label for checkboxes and stat cards.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            FundId::G => "G Fund",
            FundId::F => "F Fund",
            FundId::C => "C Fund",
            FundId::S => "S Fund",
            FundId::I => "I Fund",
        }
    }
}

impl std::fmt::Display for FundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for FundId {
    type Err = CoreError;

    /// Accepts the wire name ("GFund") or the bare letter ("G"), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let letter = upper.strip_suffix("FUND").unwrap_or(&upper);
        match letter {
            "G" => Ok(FundId::G),
            "F" => Ok(FundId::F),
            "C" => Ok(FundId::C),
            "S" => Ok(FundId::S),
            "I" => Ok(FundId::I),
            _ => Err(CoreError::ValidationError(format!("Unknown fund '{s}'"))),
        }
    }
}

/// The set of funds currently checked in the fund-selection container.
///
/// Membership is the only semantics; iteration follows [`FundId`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFunds(BTreeSet<FundId>);

impl SelectedFunds {
    /// All five funds selected.
    pub fn all() -> Self {
        Self(FundId::ALL.into_iter().collect())
    }

    /// No fund selected.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Mirror a checkbox: `checked` inserts, unchecked removes.
    /// Returns `true` if membership changed.
    pub fn set(&mut self, fund: FundId, checked: bool) -> bool {
        if checked {
            self.0.insert(fund)
        } else {
            self.0.remove(&fund)
        }
    }

    #[must_use]
    pub fn contains(&self, fund: FundId) -> bool {
        self.0.contains(&fund)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = FundId> + '_ {
        self.0.iter().copied()
    }

    /// Reinitialize to the full universe.
    pub fn reset(&mut self) {
        *self = Self::all();
    }
}

impl Default for SelectedFunds {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<FundId> for SelectedFunds {
    fn from_iter<T: IntoIterator<Item = FundId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
