//! Magnitude abbreviation ("smart" formatting)
//!
//! Turns `12,34,56,789.00` into `1.23 Crore` by walking the numbering
//! system's unit ladder. Every threshold is a power of ten, so scaling is
//! done in `Decimal` where the magnitude fits and in `f64` beyond that.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::trace;

use super::grouping::{regroup, CanonicalParts};
use crate::types::{LadderStep, NumberingSystem};

/// A scaled value and the unit it is expressed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation {
    /// Scaled value, grouped for the numbering system, canonical separators
    pub value: String,
    pub label: &'static str,
}

impl fmt::Display for Abbreviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.label)
    }
}

enum Magnitude {
    Exact(Decimal),
    Approx(f64),
}

impl Magnitude {
    fn parse(plain: &str) -> Option<Self> {
        match Decimal::from_str(plain) {
            Ok(d) => Some(Magnitude::Exact(d)),
            Err(_) => plain.parse::<f64>().ok().map(Magnitude::Approx),
        }
    }

    fn at_least(&self, threshold: u64) -> bool {
        match self {
            Magnitude::Exact(d) => *d >= Decimal::from(threshold),
            Magnitude::Approx(f) => *f >= threshold as f64,
        }
    }

    fn scaled(&self, threshold: u64, decimal_places: u32) -> String {
        match self {
            Magnitude::Exact(d) => {
                let scaled = (*d / Decimal::from(threshold))
                    .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
                format!("{:.*}", decimal_places as usize, scaled)
            }
            Magnitude::Approx(f) => format!("{:.*}", decimal_places as usize, f / threshold as f64),
        }
    }
}

/// Pick the largest unit whose absolute threshold does not exceed the value
fn select_unit(magnitude: &Magnitude, ladder: &[LadderStep]) -> Option<(&'static str, u64)> {
    let mut threshold = 1u64;
    let mut chosen = None;
    for step in ladder {
        threshold = threshold.saturating_mul(step.step);
        if !magnitude.at_least(threshold) {
            break;
        }
        chosen = Some((step.label, threshold));
    }
    chosen
}

/// Abbreviate a grouped number using `system`'s unit ladder.
///
/// Returns `None` when the value is below the first real unit, in which
/// case the grouped string should be shown as is. The sign of negative
/// values is kept on the scaled value.
pub fn abbreviate(grouped: &str, decimal_places: u32, system: NumberingSystem) -> Option<Abbreviation> {
    let parts = CanonicalParts::split(grouped);
    let magnitude = Magnitude::parse(&parts.plain())?;

    let (label, threshold) = select_unit(&magnitude, system.ladder())?;
    if threshold == 1 {
        return None;
    }

    let scaled = magnitude.scaled(threshold, decimal_places);
    let mut value = regroup(&scaled, system);
    if parts.negative {
        value.insert(0, '-');
    }
    trace!(grouped, label, threshold, %value, "abbreviated");
    Some(Abbreviation { value, label })
}
