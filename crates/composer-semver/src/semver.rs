//! Semver facade providing high-level version operations

use std::cmp::Ordering;

use crate::comparator::php_version_compare;
use crate::constraint::{Constraint, Operator};
use crate::error::Result;
use crate::version_parser::VersionParser;

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a constraint.
    ///
    /// Versions or constraints that fail to parse never satisfy anything.
    pub fn satisfies(version: &str, constraints: &str) -> bool {
        match Self::try_satisfies(version, constraints) {
            Ok(satisfied) => satisfied,
            Err(err) => {
                log::debug!("\"{}\" does not satisfy \"{}\": {}", version, constraints, err);
                false
            }
        }
    }

    /// Like [`Semver::satisfies`], but reports why the inputs could not be parsed
    pub fn try_satisfies(version: &str, constraints: &str) -> Result<bool> {
        let parser = VersionParser::new();
        let provider = Constraint::simple(Operator::Equal, parser.normalize(version)?);
        let constraint = parser.parse_constraints(constraints)?;

        Ok(constraint.matches(&provider))
    }

    /// Return all versions that satisfy the given constraints, in input order
    pub fn satisfied_by<S: AsRef<str>>(versions: &[S], constraints: &str) -> Vec<String> {
        let parser = VersionParser::new();
        let constraint = match parser.parse_constraints(constraints) {
            Ok(constraint) => constraint,
            Err(err) => {
                log::debug!("ignoring unparseable constraint \"{}\": {}", constraints, err);
                return Vec::new();
            }
        };

        versions
            .iter()
            .map(AsRef::as_ref)
            .filter(|version| match parser.normalize(version) {
                Ok(normalized) => constraint.matches(&Constraint::simple(Operator::Equal, normalized)),
                Err(err) => {
                    log::debug!("skipping version \"{}\": {}", version, err);
                    false
                }
            })
            .map(str::to_string)
            .collect()
    }

    /// Sort versions in ascending order
    pub fn sort<S: AsRef<str>>(versions: &[S]) -> Vec<String> {
        Self::usort(versions, false)
    }

    /// Sort versions in descending order
    pub fn rsort<S: AsRef<str>>(versions: &[S]) -> Vec<String> {
        Self::usort(versions, true)
    }

    fn usort<S: AsRef<str>>(versions: &[S], descending: bool) -> Vec<String> {
        let parser = VersionParser::new();

        let mut normalized: Vec<(String, &str)> = versions
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|version| match parser.normalize(version) {
                Ok(normalized) => Some((normalized, version)),
                Err(err) => {
                    log::debug!("skipping version \"{}\": {}", version, err);
                    None
                }
            })
            .collect();

        // sort_by is stable, so equal versions keep their input order
        normalized.sort_by(|(a, _), (b, _)| {
            if descending {
                compare_normalized(b, a)
            } else {
                compare_normalized(a, b)
            }
        });

        normalized
            .into_iter()
            .map(|(_, version)| version.to_string())
            .collect()
    }
}

/// Total order over normalized versions: `dev-` branches first, then numeric
/// versions by `version_compare` rules.
fn compare_normalized(a: &str, b: &str) -> Ordering {
    match (a.starts_with("dev-"), b.starts_with("dev-")) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => php_version_compare(a, b),
    }
}
