//! Version normalization and stability parsing
//!
//! [`VersionParser::normalize`] turns free-form version strings (`v1.2`,
//! `1.0.0RC1dev`, `2010-01-02`, `dev-master`, `1.x-dev`) into the canonical
//! form understood by the comparator. Constraint parsing lives in the
//! `constraints` submodule.

mod constraints;
mod patterns;

use std::fmt;
use std::str::FromStr;

use regex::{Captures, Regex};

use crate::error::{Result, SemverError};
use patterns::{
    ALIAS, BUILD_METADATA, CLASSICAL_VERSION, DATE_VERSION, DEFAULT_BRANCH, DEV_SUFFIX,
    NUMERIC_ALIAS_PREFIX, NUMERIC_BRANCH, STABILITY_SUFFIX,
};

pub use constraints::adjust_version_component;

/// Sentinel normalized form of the master, trunk and default branches
pub const DEFAULT_BRANCH_VERSION: &str = "9999999-dev";

/// Stability levels for versions, least mature first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stability {
    Dev,
    Alpha,
    Beta,
    RC,
    Stable,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Dev => "dev",
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::RC => "RC",
            Stability::Stable => "stable",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stability {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(Stability::Stable),
            "rc" => Ok(Stability::RC),
            "beta" => Ok(Stability::Beta),
            "alpha" => Ok(Stability::Alpha),
            "dev" => Ok(Stability::Dev),
            _ => Err(SemverError::InvalidArgument(format!(
                "Invalid stability \"{}\"",
                s
            ))),
        }
    }
}

/// Version parser for normalizing versions and parsing constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser;

impl VersionParser {
    pub fn new() -> Self {
        VersionParser
    }

    /// Check if a version string can be normalized
    pub fn is_valid(&self, version: &str) -> bool {
        self.normalize(version).is_ok()
    }

    /// Returns the stability of a version
    pub fn parse_stability(version: &str) -> Stability {
        // a `#reference` never carries stability
        let version = match version.find('#') {
            Some(pos) if pos + 1 < version.len() => &version[..pos],
            _ => version,
        };

        if version.starts_with("dev-") || version.ends_with("-dev") {
            return Stability::Dev;
        }

        let lower = version.to_lowercase();
        let Some(caps) = STABILITY_SUFFIX.captures(&lower) else {
            return Stability::Stable;
        };

        if non_empty(&caps, 3).is_some() {
            return Stability::Dev;
        }

        match non_empty(&caps, 1) {
            Some("beta") | Some("b") => Stability::Beta,
            Some("alpha") | Some("a") => Stability::Alpha,
            Some("rc") => Stability::RC,
            _ => Stability::Stable,
        }
    }

    /// Canonical spelling of a stability label: lower case, except `RC`
    pub fn normalize_stability(stability: &str) -> String {
        let lower = stability.to_lowercase();
        if lower == "rc" {
            "RC".to_string()
        } else {
            lower
        }
    }

    /// Expand shorthand stability tokens (`a`, `b`, `p`, `pl`, `rc`)
    pub fn expand_stability(stability: &str) -> String {
        let lower = stability.to_lowercase();
        match lower.as_str() {
            "a" => "alpha".to_string(),
            "b" => "beta".to_string(),
            "p" | "pl" => "patch".to_string(),
            "rc" => "RC".to_string(),
            _ => lower,
        }
    }

    /// Normalizes a version string to be able to perform comparisons on it
    pub fn normalize(&self, version: &str) -> Result<String> {
        self.normalize_with_context(version, None)
    }

    /// Normalizes a version string, using `full_version` to explain failures
    /// caused by a bad alias.
    pub fn normalize_with_context(&self, version: &str, full_version: Option<&str>) -> Result<String> {
        let trimmed = version.trim();
        let full_version = full_version.unwrap_or(trimmed);
        let mut version = trimmed;

        if let Some(caps) = ALIAS.captures(version) {
            version = caps.get(1).map_or(version, |m| m.as_str());
        }

        if let Some(caps) = BUILD_METADATA.captures(version) {
            version = caps.get(1).map_or(version, |m| m.as_str());
        }

        if DEFAULT_BRANCH.is_match(version) {
            return Ok(DEFAULT_BRANCH_VERSION.to_string());
        }

        if let Some(branch) = strip_dev_prefix(version) {
            return Ok(format!("dev-{}", branch));
        }

        if let Some(caps) = CLASSICAL_VERSION.captures(version) {
            let mut normalized = caps[1].to_string();
            for index in 2..=4 {
                normalized.push_str(caps.get(index).map_or(".0", |m| m.as_str()));
            }
            return Ok(with_modifiers(normalized, &caps, 5));
        }

        if let Some(caps) = DATE_VERSION.captures(version) {
            let normalized = caps[1]
                .chars()
                .map(|c| if c.is_ascii_digit() { c } else { '.' })
                .collect();
            return Ok(with_modifiers(normalized, &caps, 2));
        }

        if let Some(caps) = DEV_SUFFIX.captures(version) {
            if let Ok(branch) = self.normalize_branch(&caps[1]) {
                log::trace!("normalized {} as branch {}", version, branch);
                return Ok(branch);
            }
        }

        Err(SemverError::InvalidVersion {
            version: version.to_string(),
            context: alias_context(version, full_version),
        })
    }

    /// Normalizes a branch name to a `-dev` version or a `dev-` branch
    pub fn normalize_branch(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SemverError::InvalidArgument(
                "Branch name must not be empty".to_string(),
            ));
        }

        if matches!(name, "master" | "trunk" | "default") {
            return self.normalize(name);
        }

        let Some(caps) = NUMERIC_BRANCH.captures(name) else {
            return Ok(format!("dev-{}", name));
        };

        let mut version = caps[1].to_string();
        for index in 2..=4 {
            match caps.get(index) {
                Some(part) => version.push_str(&part.as_str().replace(['*', 'X'], "x")),
                None => version.push_str(".x"),
            }
        }

        Ok(format!("{}-dev", version.replace('x', "9999999")))
    }

    /// Numeric prefix of a `-dev` alias branch (`2.1.x-dev` gives `2.1.`)
    pub fn parse_numeric_alias_prefix(&self, branch: &str) -> Option<String> {
        NUMERIC_ALIAS_PREFIX
            .captures(branch)
            .and_then(|caps| caps.name("version"))
            .map(|version| format!("{}.", version.as_str()))
    }
}

/// The branch name after a case-insensitive `dev-` prefix
fn strip_dev_prefix(version: &str) -> Option<&str> {
    match version.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("dev-") => Some(&version[4..]),
        _ => None,
    }
}

fn non_empty<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

/// Append the stability modifier captured at `index` (token, numeric tail,
/// dev suffix) to a normalized numeric version.
fn with_modifiers(mut version: String, caps: &Captures<'_>, index: usize) -> String {
    if let Some(stability) = non_empty(caps, index) {
        if stability.eq_ignore_ascii_case("stable") {
            return version;
        }

        version.push('-');
        version.push_str(&VersionParser::expand_stability(stability));
        if let Some(tail) = non_empty(caps, index + 1) {
            version.push_str(tail.trim_start_matches(['.', '-']));
        }
    }

    if non_empty(caps, index + 2).is_some() {
        version.push_str("-dev");
    }

    version
}

fn alias_context(version: &str, full_version: &str) -> String {
    let escaped = regex::escape(version);
    let is_match = |pattern: String| Regex::new(&pattern).map_or(false, |re| re.is_match(full_version));

    if is_match(format!(r" +as +{}$", escaped)) {
        format!(" in \"{}\", the alias must be an exact version", full_version)
    } else if is_match(format!(r"^{} +as +", escaped)) {
        format!(
            " in \"{}\", the alias source must be an exact version, if it is a branch name you should prefix it with dev-",
            full_version
        )
    } else {
        String::new()
    }
}
