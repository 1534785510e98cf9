//! Constraint string parsing
//!
//! `parse_constraints` splits the input into OR alternatives and AND terms,
//! then `parse_constraint` turns each term into one or two simple bounds
//! using the wildcard, tilde, caret, x-range, hyphen and plain comparator
//! grammars, tried in that order.

use regex::Captures;

use super::patterns::{
    BASIC_COMPARATOR, CARET, CONSTRAINTS_STABILITY_FLAG, CONSTRAINT_STABILITY_FLAG, DEV_REFERENCE,
    EXPLICIT_MODIFIER, HYPHEN, OR_SEPARATOR, TILDE, WILDCARD, X_RANGE,
};
use super::{non_empty, Stability, VersionParser};
use crate::constraint::{Constraint, MultiConstraint, Operator};
use crate::error::{Result, SemverError};

impl VersionParser {
    /// Parse a constraint string such as `>=1.0 <2.0 || ^3.1` into a constraint tree.
    ///
    /// The returned constraint carries the input text as its pretty label.
    pub fn parse_constraints(&self, constraints: &str) -> Result<Constraint> {
        if constraints.trim().is_empty() {
            return Err(SemverError::InvalidArgument(
                "Version constraint string must not be empty".to_string(),
            ));
        }

        let pretty_constraint = constraints;
        let mut text = constraints;

        if let Some(caps) = CONSTRAINTS_STABILITY_FLAG.captures(text) {
            text = non_empty(&caps, 1).unwrap_or("*");
        }

        if let Some(caps) = DEV_REFERENCE.captures(text) {
            text = caps.get(1).map_or(text, |m| m.as_str());
        }

        let mut or_groups = Vec::new();
        for or_constraint in OR_SEPARATOR.split(text.trim()) {
            if or_constraint.is_empty() {
                return Err(SemverError::invalid_constraint(
                    pretty_constraint,
                    "Empty alternative in disjunction",
                ));
            }

            let mut atoms = Vec::new();
            for and_constraint in split_and_constraints(or_constraint) {
                atoms.extend(self.parse_constraint(and_constraint)?);
            }
            or_groups.push(MultiConstraint::create(atoms, true));
        }

        let constraint = MultiConstraint::create(or_groups, false).with_pretty_label(pretty_constraint);
        log::debug!("parsed constraint \"{}\" as {}", pretty_constraint, constraint);

        Ok(constraint)
    }

    /// Parse a single AND term into one or two simple bounds
    fn parse_constraint(&self, constraint: &str) -> Result<Vec<Constraint>> {
        let mut constraint = constraint;
        let mut stability_modifier = None;

        if let Some(caps) = CONSTRAINT_STABILITY_FLAG.captures(constraint) {
            constraint = caps.get(1).map_or(constraint, |m| m.as_str());
            let stability = VersionParser::normalize_stability(&caps[2]);
            if stability != Stability::Stable.as_str() {
                stability_modifier = Some(stability);
            }
        }

        if WILDCARD.is_match(constraint) {
            return Ok(vec![Constraint::empty()]);
        }

        if constraint.starts_with("~>") {
            return Err(SemverError::invalid_constraint(
                constraint,
                "Invalid operator \"~>\", you probably meant to use the \"~\" operator",
            ));
        }

        if let Some(caps) = TILDE.captures(constraint) {
            log::trace!("{} is a tilde range", constraint);
            return tilde_range(constraint, &caps);
        }

        if let Some(caps) = CARET.captures(constraint) {
            log::trace!("{} is a caret range", constraint);
            return self.caret_range(constraint, &caps);
        }

        if let Some(caps) = X_RANGE.captures(constraint) {
            log::trace!("{} is a wildcard range", constraint);
            return x_range(constraint, &caps);
        }

        if let Some(caps) = HYPHEN.captures(constraint) {
            log::trace!("{} is a hyphen range", constraint);
            return self.hyphen_range(constraint, &caps);
        }

        self.basic_comparator(constraint, stability_modifier.as_deref())
    }

    fn caret_range(&self, constraint: &str, caps: &Captures<'_>) -> Result<Vec<Constraint>> {
        // the left-most non-zero component is locked
        let position = if &caps[1] != "0" || non_empty(caps, 2).is_none() {
            1
        } else if non_empty(caps, 2) != Some("0") || non_empty(caps, 3).is_none() {
            2
        } else {
            3
        };

        let mut low_version = self.normalize(&constraint[1..])?;
        if non_empty(caps, 5).is_none() && non_empty(caps, 7).is_none() {
            low_version.push_str("-dev");
        }

        let high_version = bump(constraint, numeric_parts(caps, 1), position, 1)?;

        Ok(vec![
            Constraint::simple(Operator::GreaterThanOrEqual, low_version),
            Constraint::simple(Operator::LessThan, high_version),
        ])
    }

    fn hyphen_range(&self, constraint: &str, caps: &Captures<'_>) -> Result<Vec<Constraint>> {
        let mut low_version = self.normalize(&caps[1])?;
        if non_empty(caps, 6).is_none() && non_empty(caps, 8).is_none() {
            low_version.push_str("-dev");
        }
        let lower_bound = Constraint::simple(Operator::GreaterThanOrEqual, low_version);

        let has_minor = non_empty(caps, 11).is_some();
        let fully_specified = has_minor && non_empty(caps, 12).is_some();
        let upper_bound = if fully_specified || non_empty(caps, 14).is_some() || non_empty(caps, 16).is_some() {
            Constraint::simple(Operator::LessThanOrEqual, self.normalize(&caps[9])?)
        } else {
            let position = if has_minor { 2 } else { 1 };
            Constraint::simple(
                Operator::LessThan,
                bump(constraint, numeric_parts(caps, 10), position, 1)?,
            )
        };

        Ok(vec![lower_bound, upper_bound])
    }

    fn basic_comparator(&self, constraint: &str, stability_modifier: Option<&str>) -> Result<Vec<Constraint>> {
        let caps = BASIC_COMPARATOR
            .captures(constraint)
            .ok_or_else(|| SemverError::invalid_constraint(constraint, "no comparator found"))?;
        let literal = caps.get(2).map_or("", |m| m.as_str());

        let mut version = self
            .normalize(literal)
            .map_err(|err| SemverError::invalid_constraint(constraint, err))?;

        let operator = caps.get(1).map_or("=", |m| m.as_str());
        match stability_modifier {
            Some(modifier) if VersionParser::parse_stability(&version) == Stability::Stable => {
                version.push('-');
                version.push_str(modifier);
            }
            _ if matches!(operator, "<" | ">=")
                && !EXPLICIT_MODIFIER.is_match(&literal.to_lowercase())
                && !literal.starts_with("dev-") =>
            {
                version.push_str("-dev");
            }
            _ => {}
        }

        Ok(vec![Constraint::simple(operator.parse()?, version)])
    }
}

fn tilde_range(constraint: &str, caps: &Captures<'_>) -> Result<Vec<Constraint>> {
    let position = (2..=4).rev().find(|&i| non_empty(caps, i).is_some()).unwrap_or(1);

    let mut stability_suffix = String::new();
    if let Some(stability) = non_empty(caps, 5) {
        stability_suffix.push('-');
        stability_suffix.push_str(&VersionParser::expand_stability(stability));
        if let Some(tail) = non_empty(caps, 6) {
            stability_suffix.push_str(tail.trim_start_matches(['.', '-']));
        }
    }
    if non_empty(caps, 7).is_some() {
        stability_suffix.push_str("-dev");
    }
    if stability_suffix.is_empty() {
        stability_suffix.push_str("-dev");
    }

    let parts = numeric_parts(caps, 1);
    let low_version = adjust_version_component(parts, position, 0, "0")
        .ok_or_else(|| overflow(constraint))?
        + &stability_suffix;

    // ~1.2 allows 1.x, ~1 behaves like ~1.0
    let high_version = bump(constraint, parts, position.saturating_sub(1).max(1), 1)?;

    Ok(vec![
        Constraint::simple(Operator::GreaterThanOrEqual, low_version),
        Constraint::simple(Operator::LessThan, high_version),
    ])
}

fn x_range(constraint: &str, caps: &Captures<'_>) -> Result<Vec<Constraint>> {
    let position = (2..=3).rev().find(|&i| non_empty(caps, i).is_some()).unwrap_or(1);
    let parts = numeric_parts(caps, 1);

    let low_version = adjust_version_component(parts, position, 0, "0")
        .ok_or_else(|| overflow(constraint))?
        + "-dev";
    let upper_bound = Constraint::simple(Operator::LessThan, bump(constraint, parts, position, 1)?);

    if low_version == "0.0.0.0-dev" {
        return Ok(vec![upper_bound]);
    }

    Ok(vec![
        Constraint::simple(Operator::GreaterThanOrEqual, low_version),
        upper_bound,
    ])
}

/// The four numeric components captured from `first` onwards
fn numeric_parts<'t>(caps: &Captures<'t>, first: usize) -> [Option<&'t str>; 4] {
    [
        non_empty(caps, first),
        non_empty(caps, first + 1),
        non_empty(caps, first + 2),
        non_empty(caps, first + 3),
    ]
}

/// Increment at `position` and mark the result as the lowest dev version
fn bump(constraint: &str, parts: [Option<&str>; 4], position: usize, increment: i64) -> Result<String> {
    adjust_version_component(parts, position, increment, "0")
        .map(|version| version + "-dev")
        .ok_or_else(|| overflow(constraint))
}

fn overflow(constraint: &str) -> SemverError {
    SemverError::invalid_constraint(constraint, "version component out of range")
}

/// Increment, decrement or pad a four component version.
///
/// Components after `position` (1-based) are replaced by `pad`, the one at
/// `position` is offset by `increment`, earlier ones are kept. A negative
/// result carries into the previous component; `None` is returned when the
/// carry runs past the major version or a component is not numeric. Missing
/// components read as zero.
pub fn adjust_version_component(
    parts: [Option<&str>; 4],
    position: usize,
    increment: i64,
    pad: &str,
) -> Option<String> {
    let mut position = position;
    let mut components = parts.map(|part| part.unwrap_or("0").to_string());

    for i in (1..=4).rev() {
        if i > position {
            components[i - 1] = pad.to_string();
        } else if i == position {
            let value = components[i - 1].parse::<i64>().ok()?.checked_add(increment)?;
            if value < 0 {
                if i == 1 {
                    return None;
                }
                components[i - 1] = pad.to_string();
                position -= 1;
            } else {
                components[i - 1] = value.to_string();
            }
        }
    }

    Some(components.join("."))
}

/// Split an OR alternative into its AND terms.
///
/// Terms are separated by a comma or a space with optional spaces around
/// it. A separator never follows the start of input, an operator character,
/// another separator or the word `as`. It never touches a hyphen and is
/// never followed by a comma, the word `as` or the end of input, so hyphen
/// ranges and `x as y` aliases stay whole.
fn split_and_constraints(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let mut term_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match and_separator_end(bytes, i) {
            Some(end) => {
                parts.push(&input[term_start..i]);
                term_start = end;
                i = end;
            }
            None => i += 1,
        }
    }
    parts.push(&input[term_start..]);

    parts
}

/// End of an AND separator starting at `start`, if one starts there
fn and_separator_end(bytes: &[u8], start: usize) -> Option<usize> {
    if start == 0 || matches!(bytes[start - 1], b'=' | b'>' | b'<' | b' ' | b',') {
        return None;
    }
    if bytes[..start].ends_with(b"as") {
        return None;
    }

    let leading = count_spaces(&bytes[start..]);
    for separator in (start..=start + leading).rev() {
        if !matches!(bytes.get(separator).copied(), Some(b',' | b' ')) {
            continue;
        }
        if bytes[separator - 1] == b'-' || bytes.get(separator + 1) == Some(&b'-') {
            continue;
        }

        let after = separator + 1;
        let trailing = count_spaces(&bytes[after..]);
        for end in (after..=after + trailing).rev() {
            let rest = &bytes[end..];
            if !rest.is_empty() && rest[0] != b',' && !rest.starts_with(b"as") {
                return Some(end);
            }
        }
    }

    None
}

fn count_spaces(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == b' ').count()
}
