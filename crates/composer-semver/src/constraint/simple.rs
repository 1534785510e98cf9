//! A single `operator version` bound

use std::fmt;

use super::Operator;
use crate::comparator::version_compare;

/// Constraint comparing against one version with one operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleConstraint {
    operator: Operator,
    version: String,
}

impl SimpleConstraint {
    pub fn new(operator: Operator, version: impl Into<String>) -> Self {
        SimpleConstraint {
            operator,
            version: version.into(),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Decide whether the interval described by `self` overlaps the one
    /// described by `provider`.
    pub fn match_specific(&self, provider: &SimpleConstraint, compare_branches: bool) -> bool {
        let is_equal_op = self.operator == Operator::Equal;
        let is_provider_equal_op = provider.operator == Operator::Equal;

        // != has a solution unless the other side pins that exact version
        if self.operator == Operator::NotEqual || provider.operator == Operator::NotEqual {
            return (!is_equal_op && !is_provider_equal_op)
                || version_compare(
                    Some(&provider.version),
                    Some(&self.version),
                    Operator::NotEqual,
                    compare_branches,
                );
        }

        // e.g. <= 2.0 and < 1.0 always overlap below 1.0
        if !is_equal_op && self.operator.without_equal() == provider.operator.without_equal() {
            log::trace!("{} and {} point the same way", self, provider);
            return true;
        }

        if !version_compare(
            Some(&provider.version),
            Some(&self.version),
            self.operator,
            compare_branches,
        ) {
            return false;
        }

        // require >= 1.0 and provide < 1.0: 1.0 >= 1.0 holds, but 1.0 itself
        // lies outside the provided interval
        if provider.version == self.version && provider.operator.is_strict() && !self.operator.is_strict() {
            log::trace!("{} excludes the shared boundary of {}", provider, self);
            return false;
        }

        true
    }
}

impl fmt::Display for SimpleConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.version)
    }
}
