//! Numbering systems: digit grouping rules and magnitude unit ladders
//!
//! Each ladder is an ordered list of units where `step` is the multiplier
//! from the previous entry, not the absolute threshold. The first entry
//! of every ladder is the unscaled unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// One rung of a magnitude ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderStep {
    /// Label printed after the scaled value (empty for the unscaled unit)
    pub label: &'static str,
    /// Multiplicative jump from the previous rung
    pub step: u64,
}

pub static INTERNATIONAL_LADDER: &[LadderStep] = &[
    LadderStep { label: "", step: 1 },
    LadderStep { label: "Thousand", step: 1000 },
    LadderStep { label: "Million", step: 1000 },
    LadderStep { label: "Billion", step: 1000 },
    LadderStep { label: "Trillion", step: 1000 },
    LadderStep { label: "Quadrillion", step: 1000 },
    LadderStep { label: "Quintillion", step: 1000 },
];

// Several rungs share a step of 100, so the order is what makes
// "Lakhs" land on 10^5 and "Crore" on 10^7.
pub static INDIAN_LADDER: &[LadderStep] = &[
    LadderStep { label: "", step: 1 },
    LadderStep { label: "Hazaar", step: 1000 },
    LadderStep { label: "Lakhs", step: 100 },
    LadderStep { label: "Crore", step: 100 },
    LadderStep { label: "Sau Crore", step: 100 },
    LadderStep { label: "Hazaar Crore", step: 10 },
    LadderStep { label: "Lakh Crore", step: 100 },
    LadderStep { label: "Crore Crore", step: 100 },
];

pub static CHINESE_LADDER: &[LadderStep] = &[
    LadderStep { label: "", step: 1 },
    LadderStep { label: "万", step: 10_000 },
    LadderStep { label: "亿", step: 10_000 },
    LadderStep { label: "千亿", step: 1000 },
    LadderStep { label: "万亿", step: 10 },
];

/// Region codes that default to Indian grouping
const INDIAN_REGIONS: &[&str] = &["IN", "BD", "NP", "PK"];
/// Region codes that default to Chinese grouping
const CHINESE_REGIONS: &[&str] = &["CN"];

/// Digit grouping convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingSystem {
    /// Pick from the resolved country, falling back to international
    #[default]
    Auto,
    /// Groups of three: 1,234,567
    #[serde(alias = "global")]
    International,
    /// Three then twos: 12,34,567
    Indian,
    /// Groups of four: 123,4567
    Chinese,
    /// No grouping separators at all
    None,
}

/// Group sizes for the integer part, counted from the right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRule {
    /// Size of the rightmost group
    pub first: usize,
    /// Size of every group to the left of it
    pub rest: usize,
}

impl NumberingSystem {
    /// Accepted spellings, in the order they are reported in errors
    pub const ACCEPTED: &'static [&'static str] =
        &["auto", "global", "international", "indian", "chinese", "none"];

    /// Numbering system conventionally used in a region (ISO alpha-2)
    pub fn for_region(alpha2: &str) -> NumberingSystem {
        let code = alpha2.trim().to_ascii_uppercase();
        if INDIAN_REGIONS.contains(&code.as_str()) {
            NumberingSystem::Indian
        } else if CHINESE_REGIONS.contains(&code.as_str()) {
            NumberingSystem::Chinese
        } else {
            NumberingSystem::International
        }
    }

    /// Grouping rule; `None` means no separators.
    /// `Auto` groups like international since it has not been resolved.
    pub fn group_rule(&self) -> Option<GroupRule> {
        match self {
            NumberingSystem::Auto | NumberingSystem::International => {
                Some(GroupRule { first: 3, rest: 3 })
            }
            NumberingSystem::Indian => Some(GroupRule { first: 3, rest: 2 }),
            NumberingSystem::Chinese => Some(GroupRule { first: 4, rest: 4 }),
            NumberingSystem::None => None,
        }
    }

    /// Unit ladder used for magnitude abbreviation
    pub fn ladder(&self) -> &'static [LadderStep] {
        match self {
            NumberingSystem::Indian => INDIAN_LADDER,
            NumberingSystem::Chinese => CHINESE_LADDER,
            _ => INTERNATIONAL_LADDER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumberingSystem::Auto => "auto",
            NumberingSystem::International => "international",
            NumberingSystem::Indian => "indian",
            NumberingSystem::Chinese => "chinese",
            NumberingSystem::None => "none",
        }
    }
}

impl fmt::Display for NumberingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NumberingSystem {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(NumberingSystem::Auto),
            "global" | "international" => Ok(NumberingSystem::International),
            "indian" => Ok(NumberingSystem::Indian),
            "chinese" => Ok(NumberingSystem::Chinese),
            "none" => Ok(NumberingSystem::None),
            _ => Err(FormatError::invalid(format!(
                "numberFormatSystem must be one of {}, got {s:?}",
                Self::ACCEPTED.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(ladder: &[LadderStep]) -> Vec<(&'static str, u64)> {
        let mut acc = 1u64;
        ladder
            .iter()
            .map(|s| {
                acc *= s.step;
                (s.label, acc)
            })
            .collect()
    }

    #[test]
    fn test_parse_numbering_systems() {
        assert_eq!("auto".parse::<NumberingSystem>(), Ok(NumberingSystem::Auto));
        assert_eq!("global".parse(), Ok(NumberingSystem::International));
        assert_eq!("International".parse(), Ok(NumberingSystem::International));
        assert_eq!("INDIAN".parse(), Ok(NumberingSystem::Indian));
        assert_eq!("chinese".parse(), Ok(NumberingSystem::Chinese));
        assert_eq!("none".parse(), Ok(NumberingSystem::None));
    }

    #[test]
    fn test_invalid_system_lists_accepted_values() {
        let err = "invalid".parse::<NumberingSystem>().unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, FormatError::InvalidArgument(_)));
        for accepted in NumberingSystem::ACCEPTED {
            assert!(msg.contains(accepted), "{msg} should mention {accepted}");
        }
    }

    #[test]
    fn test_region_detection() {
        assert_eq!(NumberingSystem::for_region("IN"), NumberingSystem::Indian);
        assert_eq!(NumberingSystem::for_region("bd"), NumberingSystem::Indian);
        assert_eq!(NumberingSystem::for_region("NP"), NumberingSystem::Indian);
        assert_eq!(NumberingSystem::for_region("PK"), NumberingSystem::Indian);
        assert_eq!(NumberingSystem::for_region("CN"), NumberingSystem::Chinese);
        assert_eq!(NumberingSystem::for_region("US"), NumberingSystem::International);
        assert_eq!(NumberingSystem::for_region(""), NumberingSystem::International);
    }

    #[test]
    fn test_indian_ladder_thresholds() {
        assert_eq!(
            thresholds(INDIAN_LADDER),
            vec![
                ("", 1),
                ("Hazaar", 1_000),
                ("Lakhs", 100_000),
                ("Crore", 10_000_000),
                ("Sau Crore", 1_000_000_000),
                ("Hazaar Crore", 10_000_000_000),
                ("Lakh Crore", 1_000_000_000_000),
                ("Crore Crore", 100_000_000_000_000),
            ]
        );
    }

    #[test]
    fn test_chinese_ladder_thresholds() {
        assert_eq!(
            thresholds(CHINESE_LADDER),
            vec![
                ("", 1),
                ("万", 10_000),
                ("亿", 100_000_000),
                ("千亿", 100_000_000_000),
                ("万亿", 1_000_000_000_000),
            ]
        );
    }

    #[test]
    fn test_serde_names() {
        let system: NumberingSystem = serde_json::from_str("\"global\"").unwrap();
        assert_eq!(system, NumberingSystem::International);
        assert_eq!(serde_json::to_string(&NumberingSystem::Indian).unwrap(), "\"indian\"");
    }
}
