//! Composer-compatible version handling
//!
//! Versions are normalized to a canonical form, compared with PHP
//! `version_compare` rules, and matched against constraint expressions
//! (`^1.2`, `~2.4`, `1.0 - 2.0`, `>=1.0 <2.0 || 3.*`).
//!
//! ```
//! use composer_semver::Semver;
//!
//! assert!(Semver::satisfies("1.2.3", "^1.2"));
//! assert_eq!(Semver::sort(&["1.0", "0.1", "2.4.0-alpha"]), vec!["0.1", "1.0", "2.4.0-alpha"]);
//! ```

pub mod constraint;
mod comparator;
mod error;
mod semver;
mod version_parser;

pub use comparator::{php_version_compare, version_compare, Comparator};
pub use constraint::{matches, Constraint, ConstraintKind, MultiConstraint, Operator, SimpleConstraint};
pub use error::{ErrorKind, Result, SemverError};
pub use semver::Semver;
pub use version_parser::{adjust_version_component, Stability, VersionParser, DEFAULT_BRANCH_VERSION};
