//! Constraint tree and the matching algebra
//!
//! A parsed constraint is a tree of [`Constraint`] nodes: the universal
//! empty constraint, simple `operator version` bounds, and AND/OR groups of
//! child constraints. [`matches`] decides whether two such trees overlap.

mod multi;
mod operator;
mod simple;

use std::fmt;

pub use multi::MultiConstraint;
pub use operator::Operator;
pub use simple::SimpleConstraint;

/// Shape of a constraint node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Matches every provider
    Empty,
    /// A single `operator version` bound
    Simple(SimpleConstraint),
    /// A conjunctive or disjunctive group
    Multi(MultiConstraint),
}

/// A version constraint with an optional human readable label.
///
/// The label is fixed at construction (the parser attaches the original
/// input text) and falls back to the derived rendering when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
    pretty_label: Option<String>,
}

impl Constraint {
    fn from_kind(kind: ConstraintKind) -> Self {
        Constraint {
            kind,
            pretty_label: None,
        }
    }

    /// The constraint that matches everything
    pub fn empty() -> Self {
        Self::from_kind(ConstraintKind::Empty)
    }

    /// A simple bound. The version is used as given, callers normalize it first.
    pub fn simple(operator: Operator, version: impl Into<String>) -> Self {
        Self::from_kind(ConstraintKind::Simple(SimpleConstraint::new(operator, version)))
    }

    pub fn multi(multi: MultiConstraint) -> Self {
        Self::from_kind(ConstraintKind::Multi(multi))
    }

    /// Attach a label, replacing the derived rendering in [`Constraint::pretty_string`]
    pub fn with_pretty_label(mut self, label: impl Into<String>) -> Self {
        self.pretty_label = Some(label.into());
        self
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn pretty_label(&self) -> Option<&str> {
        self.pretty_label.as_deref()
    }

    /// The attached label, or the derived rendering when none was attached
    pub fn pretty_string(&self) -> String {
        match &self.pretty_label {
            Some(label) => label.clone(),
            None => self.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ConstraintKind::Empty)
    }

    pub fn as_simple(&self) -> Option<&SimpleConstraint> {
        match &self.kind {
            ConstraintKind::Simple(simple) => Some(simple),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiConstraint> {
        match &self.kind {
            ConstraintKind::Multi(multi) => Some(multi),
            _ => None,
        }
    }

    /// Whether this constraint overlaps `provider`, see [`matches`]
    pub fn matches(&self, provider: &Constraint) -> bool {
        matches(self, provider)
    }
}

impl From<SimpleConstraint> for Constraint {
    fn from(simple: SimpleConstraint) -> Self {
        Self::from_kind(ConstraintKind::Simple(simple))
    }
}

impl From<MultiConstraint> for Constraint {
    fn from(multi: MultiConstraint) -> Self {
        Self::multi(multi)
    }
}

/// Decide whether `constraint` overlaps `provider`.
///
/// An empty constraint on either side matches. A group on either side is
/// evaluated by its own AND/OR rule over its children, with the group on the
/// left iterating first. When only the provider is a group, each of its
/// children takes the requiring position against `constraint`. Two simple
/// bounds use [`SimpleConstraint::match_specific`].
pub fn matches(constraint: &Constraint, provider: &Constraint) -> bool {
    match (&constraint.kind, &provider.kind) {
        (ConstraintKind::Empty, _) | (ConstraintKind::Simple(_), ConstraintKind::Empty) => true,
        (ConstraintKind::Multi(multi), _) => multi.evaluate(|child| matches(child, provider)),
        (ConstraintKind::Simple(_), ConstraintKind::Multi(multi)) => {
            multi.evaluate(|child| matches(child, constraint))
        }
        (ConstraintKind::Simple(simple), ConstraintKind::Simple(other)) => {
            simple.match_specific(other, false)
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstraintKind::Empty => f.write_str("[]"),
            ConstraintKind::Simple(simple) => simple.fmt(f),
            ConstraintKind::Multi(multi) => multi.fmt(f),
        }
    }
}
