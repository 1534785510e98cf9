//! Version comparison
//!
//! [`php_version_compare`] orders two version strings the way PHP's
//! `version_compare()` does. [`version_compare`] layers branch handling and
//! absent operands on top of it, and [`Comparator`] is the string-operator
//! facade built on simple constraints.

use std::cmp::Ordering;

use crate::constraint::{matches, Constraint, Operator};
use crate::error::Result;

/// Rank of the synthetic `#` token that stands in for a numeric part when it
/// is compared against a named one.
const NUMBER_RANK: i32 = 4;

/// Compare two versions under `operator`.
///
/// A version starting with `dev-` is a branch. Two branches only match each
/// other with `==` on identical names. A branch against a non-branch never
/// matches unless `compare_branches` is set, in which case both sides are
/// compared as plain token sequences. An absent side sorts below any present
/// one.
pub fn version_compare(
    a: Option<&str>,
    b: Option<&str>,
    operator: Operator,
    compare_branches: bool,
) -> bool {
    let a_is_branch = a.is_some_and(|v| v.starts_with("dev-"));
    let b_is_branch = b.is_some_and(|v| v.starts_with("dev-"));

    if a_is_branch && b_is_branch {
        return operator == Operator::Equal && a == b;
    }

    if !compare_branches && (a_is_branch || b_is_branch) {
        return false;
    }

    let ordering = match (a, b) {
        (Some(a), Some(b)) => php_version_compare(a, b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    };

    ordering_satisfies(ordering, operator)
}

fn ordering_satisfies(ordering: Ordering, operator: Operator) -> bool {
    match operator {
        Operator::Equal => ordering == Ordering::Equal,
        Operator::NotEqual => ordering != Ordering::Equal,
        Operator::LessThan => ordering == Ordering::Less,
        Operator::LessThanOrEqual => ordering != Ordering::Greater,
        Operator::GreaterThan => ordering == Ordering::Greater,
        Operator::GreaterThanOrEqual => ordering != Ordering::Less,
    }
}

/// PHP-compatible `version_compare` returning an [`Ordering`]
pub fn php_version_compare(a: &str, b: &str) -> Ordering {
    let left = tokenize(a);
    let right = tokenize(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = compare_token(l, r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    // all shared tokens equal, the first extra token decides
    match left.len().cmp(&right.len()) {
        Ordering::Greater => trailing_token_order(left[right.len()]),
        Ordering::Less => trailing_token_order(right[left.len()]).reverse(),
        Ordering::Equal => Ordering::Equal,
    }
}

fn is_separator(b: u8) -> bool {
    matches!(b, b'.' | b'-' | b'_' | b'+')
}

/// Split a version into homogeneous digit / non-digit tokens.
///
/// Separators (`.`, `-`, `_`, `+`) are treated as dots and runs of them
/// collapse into one. A leading separator yields a leading empty token,
/// trailing separators yield nothing. Versions starting with `#` are only
/// split on dots.
fn tokenize(version: &str) -> Vec<&str> {
    let version = version.trim();

    if version.starts_with('#') {
        let mut tokens: Vec<&str> = version.split('.').collect();
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }
        return tokens;
    }

    let bytes = version.as_bytes();
    let mut tokens = Vec::new();

    if bytes.first().is_some_and(|b| is_separator(*b)) {
        tokens.push("");
    }

    let mut index = 0;
    while index < bytes.len() {
        if is_separator(bytes[index]) {
            index += 1;
            continue;
        }

        let start = index;
        let digit = bytes[index].is_ascii_digit();
        while index < bytes.len()
            && !is_separator(bytes[index])
            && bytes[index].is_ascii_digit() == digit
        {
            index += 1;
        }
        tokens.push(&version[start..index]);
    }

    tokens
}

fn is_numeric(token: &str) -> bool {
    token.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}

fn compare_token(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (false, false) => special_rank(a).cmp(&special_rank(b)),
        (true, false) => NUMBER_RANK.cmp(&special_rank(b)),
        (false, true) => special_rank(a).cmp(&NUMBER_RANK),
    }
}

/// Compare digit strings of arbitrary length without overflow
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// How the extra token of the longer version orders it against the shorter
fn trailing_token_order(token: &str) -> Ordering {
    if is_numeric(token) {
        Ordering::Greater
    } else {
        special_rank(token).cmp(&NUMBER_RANK)
    }
}

/// Rank of a named version part. Tokens outside the table share rank -1.
fn special_rank(token: &str) -> i32 {
    match token {
        "" | "dev" => 0,
        "alpha" | "a" => 1,
        "beta" | "b" => 2,
        "#" => NUMBER_RANK,
        "patch" | "pl" | "p" => 5,
        t if t.eq_ignore_ascii_case("rc") => 3,
        _ => -1,
    }
}

/// Compares version strings with textual operators
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &str, version2: &str) -> bool {
        Self::compare_with(version1, Operator::GreaterThan, version2)
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_with(version1, Operator::GreaterThanOrEqual, version2)
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &str, version2: &str) -> bool {
        Self::compare_with(version1, Operator::LessThan, version2)
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_with(version1, Operator::LessThanOrEqual, version2)
    }

    /// Check if version1 == version2
    pub fn equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_with(version1, Operator::Equal, version2)
    }

    /// Check if version1 != version2
    pub fn not_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare_with(version1, Operator::NotEqual, version2)
    }

    /// Compare version1 to version2 using an operator token such as `>=` or `<>`
    pub fn compare(version1: &str, operator: &str, version2: &str) -> Result<bool> {
        let operator: Operator = operator.parse()?;
        Ok(Self::compare_with(version1, operator, version2))
    }

    fn compare_with(version1: &str, operator: Operator, version2: &str) -> bool {
        let require = Constraint::simple(operator, version2);
        let provide = Constraint::simple(Operator::Equal, version1);
        matches(&require, &provide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("1.0.0"), vec!["1", "0", "0"]);
        assert_eq!(tokenize("1.25.0-beta2.1"), vec!["1", "25", "0", "beta", "2", "1"]);
        assert_eq!(tokenize("1.0.0alpha"), vec!["1", "0", "0", "alpha"]);
        assert_eq!(tokenize("1.0--_+1"), vec!["1", "0", "1"]);
        assert_eq!(tokenize("-dev"), vec!["", "dev"]);
        assert_eq!(tokenize("1.0."), vec!["1", "0"]);
        assert_eq!(tokenize(" 1.2 "), vec!["1", "2"]);
        assert_eq!(tokenize("#"), vec!["#"]);
    }

    #[test]
    fn test_php_version_compare() {
        for (a, b, expected) in [
            ("1.2.3", "1.2.4", Ordering::Less),
            ("2.4.0-alpha", "2.4.0", Ordering::Less),
            ("2.1.0.0-dev", "2.1.0.0", Ordering::Less),
            ("1.2.3-rc1", "1.2.3", Ordering::Less),
            ("1.2.3-pl1", "1.2.3", Ordering::Greater),
            ("1.2.3.0-patch1", "1.2.3.0", Ordering::Greater),
            ("1.0.0-dev", "1.0.0-alpha", Ordering::Less),
            ("1.0.0-alpha", "1.0.0-beta", Ordering::Less),
            ("1.0.0-beta", "1.0.0-RC", Ordering::Less),
            ("1.0.0-rc", "1.0.0-RC", Ordering::Equal),
            ("1.0.0.0", "1.0.0alpha", Ordering::Greater),
            ("1", "1.0", Ordering::Less),
            ("1.0", "1.0.0", Ordering::Less),
            ("10.0", "9.99", Ordering::Greater),
            ("007", "7", Ordering::Equal),
            ("99999999999999999999999", "99999999999999999999998", Ordering::Greater),
        ] {
            assert_eq!(php_version_compare(a, b), expected, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_unknown_stability_tokens_tie() {
        // labels outside the rank table all share one rank
        assert_eq!(php_version_compare("1.0-foo", "1.0-bar"), Ordering::Equal);
        assert!(version_compare(Some("1.0-foo"), Some("1.0-bar"), Operator::Equal, false));
        assert_eq!(php_version_compare("1.0-foo", "1.0-dev"), Ordering::Less);
    }

    #[test]
    fn test_absent_second_version() {
        let a = Some("1.0.0");
        assert!(version_compare(a, None, Operator::GreaterThan, false));
        assert!(!version_compare(a, None, Operator::LessThan, false));
        assert!(!version_compare(a, None, Operator::Equal, false));
        assert!(version_compare(a, None, Operator::GreaterThanOrEqual, false));
        assert!(!version_compare(a, None, Operator::LessThanOrEqual, false));
        assert!(version_compare(a, None, Operator::NotEqual, false));
    }

    #[test]
    fn test_absent_first_version() {
        let b = Some("1.0.0");
        assert!(!version_compare(None, b, Operator::GreaterThan, false));
        assert!(version_compare(None, b, Operator::LessThan, false));
        assert!(!version_compare(None, b, Operator::Equal, false));
        assert!(!version_compare(None, b, Operator::GreaterThanOrEqual, false));
        assert!(version_compare(None, b, Operator::LessThanOrEqual, false));
        assert!(version_compare(None, b, Operator::NotEqual, false));
    }

    #[test]
    fn test_both_absent() {
        assert!(!version_compare(None, None, Operator::GreaterThan, false));
        assert!(!version_compare(None, None, Operator::LessThan, false));
        assert!(version_compare(None, None, Operator::Equal, false));
        assert!(version_compare(None, None, Operator::GreaterThanOrEqual, false));
        assert!(version_compare(None, None, Operator::LessThanOrEqual, false));
        assert!(!version_compare(None, None, Operator::NotEqual, false));
    }

    #[test]
    fn test_component_count_matters() {
        // 1 < 1.0 < 1.0.0
        assert!(!version_compare(Some("1.0.0.0"), Some("1.0.0"), Operator::Equal, false));
        assert!(!version_compare(Some("1.0.0"), Some("1.0.0.0"), Operator::Equal, false));
        assert!(version_compare(Some("1.0.0.0"), Some("1.0.0alpha"), Operator::GreaterThan, false));
    }

    #[test]
    fn test_branches() {
        assert!(version_compare(Some("dev-foo"), Some("dev-foo"), Operator::Equal, false));
        assert!(!version_compare(Some("dev-foo"), Some("dev-bar"), Operator::Equal, false));
        assert!(!version_compare(Some("dev-foo"), Some("dev-bar"), Operator::NotEqual, false));
        assert!(!version_compare(Some("dev-foo"), Some("dev-foo"), Operator::GreaterThanOrEqual, true));

        for operator in [
            Operator::Equal,
            Operator::NotEqual,
            Operator::LessThan,
            Operator::LessThanOrEqual,
            Operator::GreaterThan,
            Operator::GreaterThanOrEqual,
        ] {
            assert!(!version_compare(Some("1.0.0"), Some("dev-foo"), operator, false));
            assert!(!version_compare(Some("dev-foo"), Some("1.0.0"), operator, false));
        }

        // with compare_branches the branch is an ordinary token sequence
        assert!(version_compare(Some("dev-foo"), Some("0.12.0"), Operator::LessThan, true));
        assert!(!version_compare(Some("dev-foo"), Some("0.12.0"), Operator::GreaterThan, true));
        assert!(!version_compare(Some("0.12.0"), Some("dev-foo"), Operator::Equal, true));
    }

    #[test]
    fn test_greater_than() {
        assert!(Comparator::greater_than("1.25.0", "1.24.0"));
        assert!(!Comparator::greater_than("1.25.0", "1.25.0"));
        assert!(!Comparator::greater_than("1.25.0", "1.26.0"));
        assert!(!Comparator::greater_than("1.26.0", "dev-foo"));
        assert!(!Comparator::greater_than("dev-foo", "dev-bar"));
    }

    #[test]
    fn test_greater_than_or_equal_to() {
        assert!(Comparator::greater_than_or_equal_to("1.25.0", "1.24.0"));
        assert!(Comparator::greater_than_or_equal_to("1.25.0", "1.25.0"));
        assert!(!Comparator::greater_than_or_equal_to("1.25.0", "1.26.0"));
    }

    #[test]
    fn test_less_than() {
        assert!(!Comparator::less_than("1.25.0", "1.24.0"));
        assert!(!Comparator::less_than("1.25.0", "1.25.0"));
        assert!(Comparator::less_than("1.25.0", "1.26.0"));
        assert!(Comparator::less_than("1.0.0", "1.2-dev"));
        assert!(!Comparator::less_than("dev-foo", "1.26.0"));
        assert!(!Comparator::less_than("dev-foo", "dev-master"));
    }

    #[test]
    fn test_less_than_or_equal_to() {
        assert!(!Comparator::less_than_or_equal_to("1.25.0", "1.24.0"));
        assert!(Comparator::less_than_or_equal_to("1.25.0", "1.25.0"));
        assert!(Comparator::less_than_or_equal_to("1.25.0", "1.26.0"));
    }

    #[test]
    fn test_equal_to() {
        assert!(!Comparator::equal_to("1.25.0", "1.24.0"));
        assert!(Comparator::equal_to("1.25.0", "1.25.0"));
        assert!(!Comparator::equal_to("1.25.0", "1.26.0"));
        assert!(!Comparator::equal_to("dev-foo", "1.26.0"));
        assert!(Comparator::equal_to("dev-foo", "dev-foo"));
        assert!(!Comparator::equal_to("dev-foo", "dev-bar"));
    }

    #[test]
    fn test_not_equal_to() {
        assert!(Comparator::not_equal_to("1.25.0", "1.24.0"));
        assert!(!Comparator::not_equal_to("1.25.0", "1.25.0"));
        assert!(Comparator::not_equal_to("1.25.0", "1.26.0"));
    }

    #[test]
    fn test_compare() {
        for (v1, operator, v2, expected) in [
            ("1.25.0", ">", "1.24.0", true),
            ("1.25.0", ">", "1.25.0", false),
            ("1.25.0", ">", "1.26.0", false),
            ("1.25.0", ">=", "1.24.0", true),
            ("1.25.0", ">=", "1.25.0", true),
            ("1.25.0", ">=", "1.26.0", false),
            ("1.25.0", "<", "1.24.0", false),
            ("1.25.0", "<", "1.25.0", false),
            ("1.25.0", "<", "1.26.0", true),
            ("1.25.0", "<=", "1.24.0", false),
            ("1.25.0", "<=", "1.25.0", true),
            ("1.25.0", "<=", "1.26.0", true),
            ("1.25.0", "==", "1.24.0", false),
            ("1.25.0", "==", "1.25.0", true),
            ("1.25.0", "=", "1.25.0", true),
            ("1.25.0", "!=", "1.24.0", true),
            ("1.25.0", "!=", "1.25.0", false),
            ("1.25.0", "<>", "1.26.0", true),
        ] {
            assert_eq!(
                Comparator::compare(v1, operator, v2).unwrap(),
                expected,
                "{} {} {}",
                v1,
                operator,
                v2
            );
        }
    }

    #[test]
    fn test_compare_with_stability() {
        assert!(Comparator::compare("1.25.0-beta2.1", "<", "1.25.0-b.3").unwrap());
        assert!(Comparator::compare("1.25.0-b2.1", "<", "1.25.0beta.3").unwrap());
        assert!(Comparator::compare("1.25.0-b-2.1", "<", "1.25.0-rc").unwrap());
        assert!(Comparator::compare("1.25.0-beta2.1", "==", "1.25.0-b.2.1").unwrap());
        assert!(Comparator::compare("1.25.0beta2.1", "==", "1.25.0-b2.1").unwrap());
    }

    #[test]
    fn test_compare_invalid_operator() {
        let err = Comparator::compare("1.0", "~", "1.0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperator);
    }
}
