//! Error type shared by the parser, the constraint model and the facade.

use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, SemverError>;

/// The broad category of a [`SemverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was empty or blank where text is required.
    InvalidArgument,
    /// Unsupported comparison operator token.
    InvalidOperator,
    /// Text matches none of the version grammars.
    InvalidVersion,
    /// Malformed constraint expression.
    InvalidConstraint,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemverError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid operator \"{operator}\", you should use one of: =, ==, <, <=, >, >=, <>, !=")]
    InvalidOperator { operator: String },

    #[error("Invalid version string \"{version}\"{context}")]
    InvalidVersion { version: String, context: String },

    #[error("Could not parse version constraint {constraint}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },
}

impl SemverError {
    pub(crate) fn invalid_constraint(constraint: impl Into<String>, reason: impl ToString) -> Self {
        SemverError::InvalidConstraint {
            constraint: constraint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SemverError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SemverError::InvalidOperator { .. } => ErrorKind::InvalidOperator,
            SemverError::InvalidVersion { .. } => ErrorKind::InvalidVersion,
            SemverError::InvalidConstraint { .. } => ErrorKind::InvalidConstraint,
        }
    }
}
