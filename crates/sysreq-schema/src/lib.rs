//! Shared types and wire format for sysreq rulesets.
//!
//! A ruleset maps native-library requirement patterns to the OS packages
//! and setup scripts that satisfy them on a given platform. This crate
//! holds the value types both sides of that contract agree on: versions
//! and version constraints, platform identifiers, the raw JSON record
//! shapes rules are persisted in, and the resolved [`Action`] payload.

pub mod action;
pub mod constraint;
pub mod platform;
pub mod record;
pub mod version;

// Re-exports
pub use action::Action;
pub use constraint::{ConstraintError, SystemConstraint, VersionConstraint};
pub use platform::{Arch, Environment, Flavor, Os};
pub use record::{ConstraintRecord, DependencyRecord, RuleRecord};
pub use version::{Version, VersionError};

/// Token separator used in requirement signatures (`",libcurl,libssl,"`).
pub const SIGNATURE_SEPARATOR: char = ',';

/// Format a requirement signature from a list of native-library tokens.
///
/// The result carries leading and trailing separators so that rule
/// patterns anchored to token boundaries (e.g. `,libcurl,`) behave
/// predictably.
///
/// # Example
///
/// ```
/// use sysreq_schema::signature;
///
/// assert_eq!(signature(&["libcurl", "libssl"]), ",libcurl,libssl,");
/// assert_eq!(signature::<&str>(&[]), ",");
/// ```
pub fn signature<S: AsRef<str>>(libs: &[S]) -> String {
    let mut out = String::from(SIGNATURE_SEPARATOR);
    for lib in libs {
        out.push_str(lib.as_ref().trim());
        out.push(SIGNATURE_SEPARATOR);
    }
    out
}
