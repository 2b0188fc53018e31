//! Optional `sysreq.toml` configuration.
//!
//! Precedence is CLI flag > config file > built-in default; the config
//! file supplies a ruleset location and default environment fields so
//! operators resolving for the same fleet repeatedly don't have to spell
//! them out each call.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parsed `sysreq.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Ruleset archive URL or local path to use when none is given.
    pub rules_url: Option<String>,

    /// Default environment fields.
    #[serde(default)]
    pub environment: EnvDefaults,
}

/// The `[environment]` section: defaults for resolution targets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvDefaults {
    /// Default operating system.
    pub os: Option<String>,
    /// Default distribution flavor.
    pub flavor: Option<String>,
    /// Default CPU architecture.
    pub arch: Option<String>,
    /// Default requesting-package version.
    pub package_version: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist and parse; the default path is
    /// optional and silently falls back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sysreq").join("sysreq.toml"))
    }

    /// The ruleset source to use, honoring flag > config > default.
    pub fn rules_source<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.rules_url.as_deref())
            .unwrap_or(sysreq_core::fetch::DEFAULT_RULES_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            rules_url = "https://example.com/rules.tar.gz"

            [environment]
            os = "linux"
            flavor = "ubuntu"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.rules_url.as_deref(),
            Some("https://example.com/rules.tar.gz")
        );
        assert_eq!(config.environment.os.as_deref(), Some("linux"));
        assert!(config.environment.arch.is_none());
    }

    #[test]
    fn test_rules_source_precedence() {
        let config = Config {
            rules_url: Some("from-config".into()),
            ..Default::default()
        };
        assert_eq!(config.rules_source(Some("from-flag")), "from-flag");
        assert_eq!(config.rules_source(None), "from-config");

        let empty = Config::default();
        assert_eq!(
            empty.rules_source(None),
            sysreq_core::fetch::DEFAULT_RULES_URL
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/sysreq.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
