//! Version-range and system-platform constraints.
//!
//! A [`VersionConstraint`] gates a dependency by the requesting package's
//! version; a [`SystemConstraint`] gates it by the evaluating environment.
//! Both are immutable once constructed. Invalid bound combinations are
//! rejected at construction time so that evaluation never has to reason
//! about half-formed constraints.

use crate::platform::{Arch, Environment, Flavor, Os};
use crate::record::SystemConstraintRecord;
use crate::version::{Version, VersionError};

/// Errors produced when building a [`VersionConstraint`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// A bound string failed to parse as a version.
    #[error("invalid version bound: {0}")]
    Version(#[from] VersionError),

    /// Both `minVer` and `minVerExclusive` were given.
    #[error("both inclusive and exclusive minimum bounds given")]
    ConflictingMin,

    /// Both `maxVer` and `maxVerExclusive` were given.
    #[error("both inclusive and exclusive maximum bounds given")]
    ConflictingMax,

    /// The minimum bound exceeds the maximum bound.
    #[error("empty version range: min {min} > max {max}")]
    EmptyRange {
        /// The minimum bound as given.
        min: String,
        /// The maximum bound as given.
        max: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: Version,
    exclusive: bool,
}

/// A version range with optional bounds on either side.
///
/// An absent bound imposes no restriction on that side; a constraint with
/// no bounds at all satisfies every version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionConstraint {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl VersionConstraint {
    /// Build a constraint from the four optional wire-format bound strings.
    ///
    /// Empty strings are treated as absent, matching the persisted record
    /// format where an unset field serializes as `""`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError`] if a bound is malformed, if both the
    /// inclusive and exclusive variant of one side are given, or if the
    /// resulting range is empty (min > max).
    pub fn new(
        min_ver: Option<&str>,
        min_ver_exclusive: Option<&str>,
        max_ver: Option<&str>,
        max_ver_exclusive: Option<&str>,
    ) -> Result<Self, ConstraintError> {
        fn present(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        let min = match (present(min_ver), present(min_ver_exclusive)) {
            (Some(_), Some(_)) => return Err(ConstraintError::ConflictingMin),
            (Some(s), None) => Some(Bound {
                version: s.parse()?,
                exclusive: false,
            }),
            (None, Some(s)) => Some(Bound {
                version: s.parse()?,
                exclusive: true,
            }),
            (None, None) => None,
        };

        let max = match (present(max_ver), present(max_ver_exclusive)) {
            (Some(_), Some(_)) => return Err(ConstraintError::ConflictingMax),
            (Some(s), None) => Some(Bound {
                version: s.parse()?,
                exclusive: false,
            }),
            (None, Some(s)) => Some(Bound {
                version: s.parse()?,
                exclusive: true,
            }),
            (None, None) => None,
        };

        if let (Some(lo), Some(hi)) = (&min, &max) {
            if lo.version > hi.version {
                return Err(ConstraintError::EmptyRange {
                    min: lo.version.to_string(),
                    max: hi.version.to_string(),
                });
            }
        }

        Ok(Self { min, max })
    }

    /// A constraint with no bounds, satisfied by every version.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether this constraint imposes no restriction.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `v` falls within this constraint's range.
    pub fn satisfies(&self, v: &Version) -> bool {
        if let Some(lo) = &self.min {
            let ok = if lo.exclusive {
                *v > lo.version
            } else {
                *v >= lo.version
            };
            if !ok {
                return false;
            }
        }
        if let Some(hi) = &self.max {
            let ok = if hi.exclusive {
                *v < hi.version
            } else {
                *v <= hi.version
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

/// A predicate over the evaluating environment.
///
/// Each field is optional; an absent field means "don't care", so the
/// all-empty constraint matches every environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemConstraint {
    /// Required operating system, if any.
    pub os: Option<Os>,
    /// Required distribution flavor, if any.
    pub flavor: Option<Flavor>,
    /// Required CPU architecture, if any.
    pub arch: Option<Arch>,
}

impl SystemConstraint {
    /// Whether every non-empty field equals the corresponding environment field.
    pub fn matches(&self, env: &Environment) -> bool {
        if let Some(os) = &self.os {
            if *os != env.os {
                return false;
            }
        }
        if let Some(flavor) = &self.flavor {
            if *flavor != env.flavor {
                return false;
            }
        }
        if let Some(arch) = &self.arch {
            if *arch != env.arch {
                return false;
            }
        }
        true
    }
}

impl From<&SystemConstraintRecord> for SystemConstraint {
    fn from(rec: &SystemConstraintRecord) -> Self {
        let field = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            os: field(&rec.os).map(|s| s.as_str().into()),
            flavor: field(&rec.flavor).map(|s| s.as_str().into()),
            arch: field(&rec.arch).map(|s| s.as_str().into()),
        }
    }
}
