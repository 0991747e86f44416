//! Precision renderer
//!
//! Produces the canonical grouped form every later stage works on:
//! international groups of three joined by `,`, exactly N fraction digits
//! after a `.`, and a leading `-` for negative amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use super::grouping::group_integer;
use crate::error::{FormatError, Result};
use crate::types::NumberingSystem;

/// Render a binary float to canonical form.
///
/// Rounding is the standard library's correctly rounded fixed-point
/// conversion of the exact binary value (ties go to even).
pub fn render_canonical(value: f64, decimal_places: u32) -> Result<String> {
    if !value.is_finite() {
        return Err(FormatError::invalid(format!("amount must be finite, got {value}")));
    }
    let digits = format!("{:.*}", decimal_places as usize, value.abs());
    Ok(assemble(value.is_sign_negative(), &digits))
}

/// Render a decimal amount to canonical form, rounding half to even
pub fn render_canonical_decimal(value: Decimal, decimal_places: u32) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
    let digits = format!("{:.*}", decimal_places as usize, rounded);
    assemble(value.is_sign_negative(), &digits)
}

fn assemble(negative: bool, digits: &str) -> String {
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };
    let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(&group_integer(integer, NumberingSystem::International.group_rule()));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
