//! Single-field checks shared by the table rules.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use recipe_model::RawRecord;

use crate::issue::Issue;

/// Something before an `@`, something after it, and a dot in the domain.
/// Anchored at the start only.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("Invalid email regex"));

/// Push `Missing <field>` for every required field that is empty.
pub fn check_required(record: &RawRecord, required: &[&'static str], issues: &mut Vec<Issue>) {
    for &field in required {
        if record.non_empty(field).is_none() {
            issues.push(Issue::Missing { field });
        }
    }
}

/// Result of reading a cell as a strictly positive number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Positivity {
    Positive,
    /// Parsed, but zero, negative, or NaN.
    NotPositive,
    NonNumeric,
}

/// Parse a cell the way a lenient float reader would.
///
/// Surrounding whitespace and digit-group underscores are ignored; `inf` and
/// `nan` spellings are accepted. An empty cell is not a number.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = if trimmed.contains('_') {
        if trimmed.starts_with('_') || trimmed.ends_with('_') || trimmed.contains("__") {
            return None;
        }
        trimmed.replace('_', "")
    } else {
        trimmed.to_string()
    };
    cleaned.parse().ok()
}

/// NaN is treated as not positive, so a `nan` cell fails the check instead of passing it.
pub fn positivity(value: &str) -> Positivity {
    match parse_number(value) {
        None => Positivity::NonNumeric,
        Some(number) if number.is_nan() || number <= 0.0 => Positivity::NotPositive,
        Some(_) => Positivity::Positive,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whether `value` is exactly one of the closed set `T` (case-sensitive).
pub fn in_closed_set<T: FromStr>(value: &str) -> bool {
    value.parse::<T>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_model::{Difficulty, InteractionType};

    #[test]
    fn test_positivity() {
        assert_eq!(positivity("35"), Positivity::Positive);
        assert_eq!(positivity(" 0.5 "), Positivity::Positive);
        assert_eq!(positivity("1_000"), Positivity::Positive);
        assert_eq!(positivity("0"), Positivity::NotPositive);
        assert_eq!(positivity("-5"), Positivity::NotPositive);
        assert_eq!(positivity("nan"), Positivity::NotPositive);
        assert_eq!(positivity("abc"), Positivity::NonNumeric);
        assert_eq!(positivity(""), Positivity::NonNumeric);
        assert_eq!(positivity("1__0"), Positivity::NonNumeric);
    }

    #[test]
    fn test_nan_fails_positivity() {
        assert_eq!(positivity("NaN"), Positivity::NotPositive);
        assert_eq!(positivity(" nan "), Positivity::NotPositive);
        assert_eq!(positivity("inf"), Positivity::Positive);
    }

    #[test]
    fn test_email_regex() {
        assert!(is_valid_email("ann@example.com"));
        assert!(is_valid_email("a@b.c trailing"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn test_closed_sets_are_case_sensitive() {
        assert!(in_closed_set::<Difficulty>("Medium"));
        assert!(!in_closed_set::<Difficulty>("medium"));
        assert!(in_closed_set::<InteractionType>("cook_attempt"));
        assert!(!in_closed_set::<InteractionType>("share"));
    }

    #[test]
    fn test_required_fields() {
        let record = RawRecord::from_pairs([("recipe_id", "rec_1"), ("name", "")]);
        let mut issues = Vec::new();
        check_required(&record, &["recipe_id", "name", "quantity"], &mut issues);
        assert_eq!(
            issues,
            vec![
                Issue::Missing { field: "name" },
                Issue::Missing { field: "quantity" }
            ]
        );
    }
}
