use regex::Regex;
use std::sync::OnceLock;

fn canonical_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{2,7}-\d{2}-\d$").expect("CAS pattern compiles"))
}

/// Outcome of checking a raw CAS registry number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CasCheck {
    /// Canonical format, check digit verifies.
    Valid,
    /// Canonical format but the check digit does not verify; the offending
    /// digit cannot be identified, so no correction is offered.
    ChecksumMismatch { expected: u32 },
    /// Digits are plausible but the separators are wrong or missing; the
    /// re-hyphenated form verifies and is safe to suggest.
    Reformattable { canonical: String },
    /// Not recognizable as a CAS number at all.
    Invalid,
}

pub(crate) fn check(raw: &str) -> CasCheck {
    let trimmed = raw.trim();
    let digits: Vec<u32> = trimmed.chars().filter_map(|c| c.to_digit(10)).collect();

    if canonical_pattern().is_match(trimmed) {
        if checksum_matches(&digits) {
            return CasCheck::Valid;
        }
        return CasCheck::ChecksumMismatch {
            expected: expected_check_digit(&digits),
        };
    }

    // Registry numbers carry 5 to 10 digits (2-7 prefix + 2 body + check).
    let separators_only = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | ' ' | '.' | '/'));
    if separators_only && (5..=10).contains(&digits.len()) && checksum_matches(&digits) {
        return CasCheck::Reformattable {
            canonical: hyphenate(&digits),
        };
    }

    CasCheck::Invalid
}

/// CAS check digit: weighted sum of the body digits, weights rising
/// right-to-left starting at 1, taken mod 10.
fn expected_check_digit(digits: &[u32]) -> u32 {
    let body = &digits[..digits.len() - 1];
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(position, digit)| (position as u32 + 1) * digit)
        .sum();
    sum % 10
}

fn checksum_matches(digits: &[u32]) -> bool {
    if digits.len() < 2 {
        return false;
    }
    digits.last().copied() == Some(expected_check_digit(digits))
}

fn hyphenate(digits: &[u32]) -> String {
    let prefix: String = digits[..digits.len() - 3]
        .iter()
        .map(|d| char::from_digit(*d, 10).expect("decimal digit"))
        .collect();
    let body: String = digits[digits.len() - 3..digits.len() - 1]
        .iter()
        .map(|d| char::from_digit(*d, 10).expect("decimal digit"))
        .collect();
    format!("{}-{}-{}", prefix, body, digits[digits.len() - 1])
}
