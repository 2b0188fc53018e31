//! Dotted-numeric version strings as used by ruleset files.
//!
//! Ruleset versions are plain dotted integers (`1`, `1.2`, `1.2.3`, ...)
//! and are not semver: `1.2` and `1.2.0` denote the same version, and
//! there are no pre-release or build components. Ordering compares
//! components left-to-right as integers, zero-padding the shorter side.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Errors produced when parsing a [`Version`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The version string was empty.
    #[error("empty version string")]
    Empty,

    /// A dotted component was not a plain non-negative integer.
    #[error("invalid version component '{component}' in '{input}'")]
    InvalidComponent {
        /// The offending component text.
        component: String,
        /// The full input string.
        input: String,
    },
}

/// A parsed dotted-numeric version.
///
/// Comparison zero-pads the shorter component list on the right, so
/// `1.2 == 1.2.0` and `1.2 < 1.2.1`.
///
/// # Example
///
/// ```
/// use sysreq_schema::Version;
///
/// let a: Version = "1.2".parse().unwrap();
/// let b: Version = "1.2.0".parse().unwrap();
/// assert_eq!(a, b);
/// assert!(a < "1.10".parse().unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    components: Vec<u64>,
    text: String,
}

impl Version {
    /// The version's components as parsed, without padding.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The original version text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut components = Vec::new();
        for part in trimmed.split('.') {
            let n: u64 = part
                .parse()
                .map_err(|_| VersionError::InvalidComponent {
                    component: part.to_string(),
                    input: trimmed.to_string(),
                })?;
            components.push(n);
        }

        Ok(Self {
            components,
            text: trimmed.to_string(),
        })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.text
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl std::hash::Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Strip trailing zero components so `1.2` and `1.2.0` hash alike, matching Eq.
        let mut components = self.components.as_slice();
        while let [rest @ .., 0] = components {
            components = rest;
        }
        components.hash(state);
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
