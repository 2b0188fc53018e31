//! Platform identifiers for the evaluating environment.
//!
//! Ruleset files spell operating systems, distribution flavors, and CPU
//! architectures as free-form strings, and vendors are not consistent
//! about naming (`amd64` vs `x86_64`, `darwin` vs `macos`). Each field is
//! therefore an open enumeration: known names parse to a tagged variant
//! (normalizing aliases), and anything else falls back to `Other` rather
//! than being rejected, so new platforms keep working without a schema
//! change.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::version::Version;

/// Operating system identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Os {
    /// Linux-based operating systems.
    Linux,
    /// Apple macOS (`darwin`, `macos`, and `osx` all normalize here).
    Darwin,
    /// Microsoft Windows.
    Windows,
    /// An operating system not in the known set, kept verbatim (lowercased).
    Other(String),
}

/// Distribution flavor within an operating system (e.g. `ubuntu`, `centos`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Flavor {
    /// Debian and derivatives using apt.
    Debian,
    /// Ubuntu specifically (rules often target it apart from Debian).
    Ubuntu,
    /// Red Hat family: RHEL, CentOS, Fedora.
    RedHat,
    /// SUSE family.
    Suse,
    /// A flavor not in the known set, kept verbatim (lowercased).
    Other(String),
}

/// CPU architecture identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Arch {
    /// Intel/AMD 64-bit (`x86_64`, `amd64`).
    X86_64,
    /// ARM 64-bit (`arm64`, `aarch64`).
    Arm64,
    /// 32-bit x86 (`i386`, `x86`).
    X86,
    /// An architecture not in the known set, kept verbatim (lowercased).
    Other(String),
}

macro_rules! open_enum_impls {
    ($ty:ident) => {
        impl From<String> for $ty {
            fn from(s: String) -> Self {
                s.parse().unwrap_or_else(|never| match never {})
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                s.parse().unwrap_or_else(|never| match never {})
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                v.as_str().to_string()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

impl Os {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
            Self::Other(s) => s,
        }
    }

    /// The operating system this binary was compiled for.
    pub fn current() -> Self {
        std::env::consts::OS.into()
    }
}

impl FromStr for Os {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "linux" => Self::Linux,
            "darwin" | "macos" | "osx" => Self::Darwin,
            "windows" | "win" => Self::Windows,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Flavor {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Debian => "debian",
            Self::Ubuntu => "ubuntu",
            Self::RedHat => "redhat",
            Self::Suse => "suse",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for Flavor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "debian" => Self::Debian,
            "ubuntu" => Self::Ubuntu,
            "redhat" | "rhel" | "centos" | "fedora" => Self::RedHat,
            "suse" | "opensuse" | "sles" => Self::Suse,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Arch {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
            Self::X86 => "x86",
            Self::Other(s) => s,
        }
    }

    /// The architecture this binary was compiled for.
    pub fn current() -> Self {
        std::env::consts::ARCH.into()
    }
}

impl FromStr for Arch {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Self::X86_64,
            "arm64" | "aarch64" => Self::Arm64,
            "x86" | "i386" | "i686" => Self::X86,
            other => Self::Other(other.to_string()),
        })
    }
}

open_enum_impls!(Os);
open_enum_impls!(Flavor);
open_enum_impls!(Arch);

/// The environment a resolution is performed for.
///
/// Constructed per resolution call by the shell; the engine never mutates
/// it. `package_version` is the version of the *requesting* package (the
/// one declaring native-library requirements), kept as the raw string
/// because rulesets are allowed to match environments whose version does
/// not parse (such dependencies simply fail closed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Operating system of the target.
    pub os: Os,
    /// Distribution flavor of the target.
    pub flavor: Flavor,
    /// CPU architecture of the target.
    pub arch: Arch,
    /// Version string of the requesting package.
    pub package_version: String,
}

impl Environment {
    /// Build an environment from raw strings, as received at the shell boundary.
    pub fn new(os: &str, flavor: &str, arch: &str, package_version: &str) -> Self {
        Self {
            os: os.into(),
            flavor: flavor.into(),
            arch: arch.into(),
            package_version: package_version.to_string(),
        }
    }

    /// Parse the requesting package's version, if it is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`](crate::version::VersionError) if the
    /// version is not dotted-numeric.
    pub fn parsed_version(&self) -> Result<Version, crate::version::VersionError> {
        self.package_version.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_normalization() {
        assert_eq!(Os::from("macOS"), Os::Darwin);
        assert_eq!(Os::from("osx"), Os::Darwin);
        assert_eq!(Arch::from("amd64"), Arch::X86_64);
        assert_eq!(Arch::from("aarch64"), Arch::Arm64);
        assert_eq!(Flavor::from("CentOS"), Flavor::RedHat);
    }

    #[test]
    fn test_unknown_falls_back_to_other() {
        assert_eq!(Os::from("plan9"), Os::Other("plan9".to_string()));
        assert_eq!(Arch::from("riscv64"), Arch::Other("riscv64".to_string()));
        // Lowercased, so two spellings of the same unknown platform compare equal.
        assert_eq!(Os::from("Plan9"), Os::from("plan9"));
    }

    #[test]
    fn test_serde_as_string() {
        let os: Os = serde_json::from_str("\"Linux\"").unwrap();
        assert_eq!(os, Os::Linux);
        assert_eq!(serde_json::to_string(&os).unwrap(), "\"linux\"");
    }
}
