//! Non-fatal diagnostics produced during ruleset loading and resolution.
//!
//! A malformed rule or dependency never aborts resolution of the rest of
//! the ruleset; it is excluded (or fails closed) and reported here, so the
//! caller always receives the best achievable action list together with
//! an account of what was skipped. Silent partial results are disallowed.

use thiserror::Error;

/// One non-fatal problem encountered while loading or evaluating a ruleset.
///
/// Coordinates are zero-based indices into the ruleset as loaded, so a
/// caller can point back at the offending rule file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A rule's trigger pattern failed to compile; the rule is excluded
    /// from matching.
    #[error("rule {rule} ({description:?}): pattern {pattern:?} failed to compile: {message}")]
    PatternCompile {
        /// Index of the rule in the ruleset.
        rule: usize,
        /// The rule's description, for operator-facing reports.
        description: String,
        /// The pattern source text.
        pattern: String,
        /// The compiler's error message.
        message: String,
    },

    /// A dependency's version constraint could not be built; the
    /// dependency is treated as non-matching.
    #[error("rule {rule}, dependency {dependency}: invalid version constraint: {message}")]
    VersionConstraint {
        /// Index of the rule in the ruleset.
        rule: usize,
        /// Index of the dependency within the rule.
        dependency: usize,
        /// What was wrong with the constraint.
        message: String,
    },

    /// The environment's package version did not parse; every dependency
    /// with a bounded constraint fails closed for this resolution.
    #[error("package version {version:?} is not a dotted-numeric version: {message}")]
    PackageVersion {
        /// The version string as supplied by the caller.
        version: String,
        /// The parse error.
        message: String,
    },

    /// An archive entry looked like a rule file but did not decode; the
    /// entry was skipped during ingestion.
    #[error("ruleset entry {path:?} could not be decoded: {message}")]
    MalformedEntry {
        /// Path of the entry inside the archive.
        path: String,
        /// The decode error.
        message: String,
    },
}

impl Diagnostic {
    /// Whether this diagnostic excludes an entire rule (as opposed to a
    /// single dependency or entry failing closed).
    pub fn excludes_rule(&self) -> bool {
        matches!(self, Self::PatternCompile { .. })
    }
}
