//! Regular expressions shared by version normalization and constraint parsing

use lazy_static::lazy_static;
use regex::Regex;

/// Optional stability modifier: token (group 1), numeric tail (group 2) and
/// dev suffix (group 3).
pub(crate) const MODIFIER: &str =
    r"[._-]?(?:(stable|beta|b|RC|alpha|a|patch|pl|p)((?:[.-]?\d+)*)?)?([.-]?dev)?";

/// Stabilities accepted in `@stability` flags
pub(crate) const STABILITIES: &str = "stable|RC|beta|alpha|dev";

lazy_static! {
    pub(crate) static ref ALIAS: Regex = Regex::new(r"^([^,\s]+) +as +([^,\s]+)$").unwrap();

    pub(crate) static ref BUILD_METADATA: Regex = Regex::new(r"^([^,\s+]+)\+[^\s]+$").unwrap();

    pub(crate) static ref DEFAULT_BRANCH: Regex =
        Regex::new(r"(?i)^(?:dev-)?(?:master|trunk|default)$").unwrap();

    pub(crate) static ref CLASSICAL_VERSION: Regex = Regex::new(&format!(
        r"(?i)^v?(\d{{1,5}})(\.\d+)?(\.\d+)?(\.\d+)?{}$",
        MODIFIER
    ))
    .unwrap();

    pub(crate) static ref DATE_VERSION: Regex = Regex::new(&format!(
        r"(?i)^v?(\d{{4}}(?:[.:-]?\d{{2}}){{1,6}}(?:[.:-]?\d{{1,3}})?){}$",
        MODIFIER
    ))
    .unwrap();

    pub(crate) static ref DEV_SUFFIX: Regex = Regex::new(r"(?i)(.*?)[.-]?dev$").unwrap();

    pub(crate) static ref NUMERIC_BRANCH: Regex = Regex::new(
        r"(?i)^v?(\d+)(\.(?:\d+|[xX*]))?(\.(?:\d+|[xX*]))?(\.(?:\d+|[xX*]))?$"
    )
    .unwrap();

    pub(crate) static ref NUMERIC_ALIAS_PREFIX: Regex =
        Regex::new(r"(?i)^(?P<version>(?:\d+\.)*\d+)(?:\.x)?-dev$").unwrap();

    /// Trailing modifier of any version, tolerating build metadata
    pub(crate) static ref STABILITY_SUFFIX: Regex =
        Regex::new(&format!(r"(?i){}(?:\+.*)?$", MODIFIER)).unwrap();

    /// A `-<modifier>` at the end of a constraint literal
    pub(crate) static ref EXPLICIT_MODIFIER: Regex =
        Regex::new(&format!(r"(?i)-{}$", MODIFIER)).unwrap();

    pub(crate) static ref CONSTRAINTS_STABILITY_FLAG: Regex =
        Regex::new(&format!(r"(?i)^([^,\s]*?)@({})$", STABILITIES)).unwrap();

    pub(crate) static ref CONSTRAINT_STABILITY_FLAG: Regex =
        Regex::new(&format!(r"(?i)^([^,\s]+?)@({})$", STABILITIES)).unwrap();

    pub(crate) static ref DEV_REFERENCE: Regex =
        Regex::new(r"(?i)^(dev-[^,\s@]+?|[^,\s@]+?\.x-dev)#.+$").unwrap();

    pub(crate) static ref OR_SEPARATOR: Regex = Regex::new(r"\s*\|\|?\s*").unwrap();

    pub(crate) static ref WILDCARD: Regex = Regex::new(r"(?i)^v?[xX*](?:\.[xX*])*$").unwrap();

    /// Version literal inside range grammars: numbers in groups 1-4, then
    /// the modifier groups 5-7
    static ref VERSION: String = format!(
        r"v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:\.(\d+))?{}(?:\+[^\s]+)?",
        MODIFIER
    );

    pub(crate) static ref TILDE: Regex = Regex::new(&format!(r"(?i)^~{}$", *VERSION)).unwrap();

    pub(crate) static ref CARET: Regex = Regex::new(&format!(r"(?i)^\^{}$", *VERSION)).unwrap();

    pub(crate) static ref X_RANGE: Regex =
        Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:\.[xX*])+$").unwrap();

    /// `from - to`: group 1 is the whole lower literal with its parts in
    /// 2-8, group 9 the whole upper literal with its parts in 10-16
    pub(crate) static ref HYPHEN: Regex =
        Regex::new(&format!(r"(?i)^({}) +- +({})$", *VERSION, *VERSION)).unwrap();

    pub(crate) static ref BASIC_COMPARATOR: Regex =
        Regex::new(r"^(<>|!=|>=?|<=?|==?)?\s*(.*)").unwrap();
}
