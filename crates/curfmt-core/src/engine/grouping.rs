//! Digit regrouping and separator substitution
//!
//! Both are pure string transforms over the canonical form; no numeric
//! parsing happens here, so very large magnitudes keep every digit.

use crate::types::{GroupRule, NumberingSystem};

/// Placeholder for the decimal point while thousands separators are swapped
const DECIMAL_SENTINEL: &str = "\u{E000}";

/// Sign, bare integer digits and optional fraction of a grouped number
pub(crate) struct CanonicalParts<'a> {
    pub negative: bool,
    pub integer: String,
    pub fraction: Option<&'a str>,
}

impl<'a> CanonicalParts<'a> {
    pub fn split(grouped: &'a str) -> Self {
        let (negative, body) = match grouped.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, grouped),
        };
        let (integer, fraction) = match body.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (body, None),
        };
        Self {
            negative,
            integer: integer.chars().filter(|c| *c != ',').collect(),
            fraction,
        }
    }

    /// Digits with a `.` before the fraction and no sign or grouping
    pub fn plain(&self) -> String {
        match self.fraction {
            Some(fraction) => format!("{}.{fraction}", self.integer),
            None => self.integer.clone(),
        }
    }
}

/// Insert `,` between digit groups of a bare integer string
pub fn group_integer(digits: &str, rule: Option<GroupRule>) -> String {
    let Some(rule) = rule else {
        return digits.to_string();
    };
    if digits.len() <= rule.first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - rule.first);
    let mut groups = vec![tail];
    let mut end = head.len();
    while end > rule.rest {
        groups.push(&head[end - rule.rest..end]);
        end -= rule.rest;
    }
    groups.push(&head[..end]);
    groups.reverse();
    groups.join(",")
}

/// Re-partition the integer digits of a canonical number for `system`.
/// The sign and fraction are carried over unchanged.
pub fn regroup(canonical: &str, system: NumberingSystem) -> String {
    let parts = CanonicalParts::split(canonical);
    let mut out = String::with_capacity(canonical.len() + 4);
    if parts.negative {
        out.push('-');
    }
    out.push_str(&group_integer(&parts.integer, system.group_rule()));
    if let Some(fraction) = parts.fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Swap the canonical `.` and `,` markers for the target separators.
///
/// The decimal point is parked on a sentinel first so a target thousands
/// separator of `.` (or decimal separator of `,`) cannot be swapped twice.
pub fn substitute_separators(number: &str, decimal: &str, thousands: &str) -> String {
    number
        .replace('.', DECIMAL_SENTINEL)
        .replace(',', thousands)
        .replace(DECIMAL_SENTINEL, decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_integer() {
        let intl = NumberingSystem::International.group_rule();
        assert_eq!(group_integer("1", intl), "1");
        assert_eq!(group_integer("123", intl), "123");
        assert_eq!(group_integer("1234", intl), "1,234");
        assert_eq!(group_integer("1234567", intl), "1,234,567");
        assert_eq!(group_integer("1234567", None), "1234567");
    }

    #[test]
    fn test_regroup_indian() {
        assert_eq!(regroup("1,234,567.89", NumberingSystem::Indian), "12,34,567.89");
        assert_eq!(regroup("123,456,789", NumberingSystem::Indian), "12,34,56,789");
        assert_eq!(regroup("1,234", NumberingSystem::Indian), "1,234");
        assert_eq!(regroup("12,345", NumberingSystem::Indian), "12,345");
        assert_eq!(regroup("123,456", NumberingSystem::Indian), "1,23,456");
    }

    #[test]
    fn test_regroup_chinese() {
        assert_eq!(regroup("1,234,567.89", NumberingSystem::Chinese), "123,4567.89");
        assert_eq!(regroup("1,234,567,890.12", NumberingSystem::Chinese), "12,3456,7890.12");
        assert_eq!(regroup("7,178.41", NumberingSystem::Chinese), "7178.41");
    }

    #[test]
    fn test_regroup_none_and_sign() {
        assert_eq!(regroup("-1,234,567.89", NumberingSystem::None), "-1234567.89");
        assert_eq!(regroup("-1,234,567.89", NumberingSystem::Indian), "-12,34,567.89");
        assert_eq!(regroup("1,234,567", NumberingSystem::International), "1,234,567");
    }

    #[test]
    fn test_substitute_swapped_separators() {
        assert_eq!(substitute_separators("1,234,567.89", ",", "."), "1.234.567,89");
        assert_eq!(substitute_separators("-1,234.5", ",", " "), "-1 234,5");
        assert_eq!(substitute_separators("1,234.5", ".", "'"), "1'234.5");
        assert_eq!(substitute_separators("1,234.5", ".", ","), "1,234.5");
    }

    #[test]
    fn test_split_parts() {
        let parts = CanonicalParts::split("-12,34,567.89");
        assert!(parts.negative);
        assert_eq!(parts.integer, "1234567");
        assert_eq!(parts.fraction, Some("89"));
        assert_eq!(parts.plain(), "1234567.89");
    }
}
