//! Relational operators used by simple constraints

use std::fmt;
use std::str::FromStr;

use crate::error::SemverError;

/// Comparison operator of a simple constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (==)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Not equal (!=)
    NotEqual,
}

impl Operator {
    /// Canonical spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::NotEqual => "!=",
        }
    }

    /// The canonical spelling with every `=` removed.
    ///
    /// `<` and `<=` both become `<`, `>` and `>=` both become `>`, which is
    /// what the interval decision uses to detect same-direction bounds.
    pub fn without_equal(&self) -> &'static str {
        match self {
            Operator::Equal => "",
            Operator::LessThan | Operator::LessThanOrEqual => "<",
            Operator::GreaterThan | Operator::GreaterThanOrEqual => ">",
            Operator::NotEqual => "!",
        }
    }

    /// Whether the operator excludes its own boundary (`<`, `>`)
    pub fn is_strict(&self) -> bool {
        self.as_str() == self.without_equal()
    }

    /// Every token accepted by [`Operator::from_str`]
    pub fn supported_operators() -> &'static [&'static str] {
        &["=", "==", "<", "<=", ">", ">=", "<>", "!="]
    }
}

impl FromStr for Operator {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Operator::Equal),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "!=" | "<>" => Ok(Operator::NotEqual),
            _ => Err(SemverError::InvalidOperator {
                operator: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
