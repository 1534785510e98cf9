//! Conjunctive and disjunctive constraint groups

use std::fmt;

use super::Constraint;
use crate::error::{Result, SemverError};

/// A group of constraints combined with AND (conjunctive) or OR (disjunctive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiConstraint {
    constraints: Vec<Constraint>,
    conjunctive: bool,
}

impl MultiConstraint {
    /// Create a group. At least one child is required.
    pub fn new(constraints: Vec<Constraint>, conjunctive: bool) -> Result<Self> {
        if constraints.is_empty() {
            return Err(SemverError::InvalidArgument(
                "A constraint group needs at least one constraint".to_string(),
            ));
        }

        Ok(MultiConstraint {
            constraints,
            conjunctive,
        })
    }

    /// Combine constraints, collapsing trivial groups.
    ///
    /// No constraints yields the empty constraint and a single constraint is
    /// returned as is.
    pub fn create(mut constraints: Vec<Constraint>, conjunctive: bool) -> Constraint {
        match constraints.len() {
            0 => Constraint::empty(),
            1 => constraints.remove(0),
            _ => Constraint::multi(MultiConstraint {
                constraints,
                conjunctive,
            }),
        }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_conjunctive(&self) -> bool {
        self.conjunctive
    }

    pub fn is_disjunctive(&self) -> bool {
        !self.conjunctive
    }

    /// Apply the group's AND/OR rule to a per-child predicate
    pub(crate) fn evaluate<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Constraint) -> bool,
    {
        if self.conjunctive {
            self.constraints.iter().all(|c| predicate(c))
        } else {
            self.constraints.iter().any(|c| predicate(c))
        }
    }
}

impl fmt::Display for MultiConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.conjunctive { " " } else { " || " };
        let parts: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join(separator))
    }
}
