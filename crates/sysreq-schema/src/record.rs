//! Raw rule records: the persisted JSON contract for ruleset files.
//!
//! These shapes mirror the ruleset repository's `deps/*.json` files
//! field-for-field. Every field is defaulted so that partially specified
//! records load cleanly, and unknown extra fields are ignored, which is
//! part of the contract any ruleset source must be able to rely on.
//! Conversion into the validated engine model happens in `sysreq-core`
//! at ruleset construction time.

use serde::{Deserialize, Serialize};

/// One rule file: a trigger pattern plus its remediation dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    /// Human-readable description of what the rule covers.
    #[serde(default)]
    pub description: String,

    /// Trigger pattern, matched case-insensitively against the
    /// requirement signature.
    #[serde(default)]
    pub regexp: String,

    /// Ordered remediation dependencies.
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
}

/// One remediation alternative within a rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    /// Whether the dependency is needed at runtime (informational).
    #[serde(default)]
    pub runtime: bool,

    /// System constraint alternatives; the dependency applies if any
    /// alternative matches the environment.
    #[serde(default)]
    pub sys_constraints: Vec<SystemConstraintRecord>,

    /// Version constraint on the requesting package.
    #[serde(default)]
    pub pkg_constraint: ConstraintRecord,

    /// System packages to install.
    #[serde(default)]
    pub sys_pkgs: Vec<String>,

    /// Setup scripts to run.
    #[serde(default)]
    pub scripts: Vec<String>,
}

/// Wire form of a system constraint; empty strings mean "don't care".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConstraintRecord {
    /// Required operating system, or empty.
    #[serde(default)]
    pub os: String,

    /// Required distribution flavor, or empty.
    #[serde(default)]
    pub flavor: String,

    /// Required CPU architecture, or empty.
    #[serde(default)]
    pub arch: String,
}

/// Wire form of a version constraint; empty strings mean "no bound".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintRecord {
    /// Inclusive minimum version, or empty.
    #[serde(default)]
    pub min_ver: String,

    /// Exclusive minimum version, or empty.
    #[serde(default)]
    pub min_ver_exclusive: String,

    /// Inclusive maximum version, or empty.
    #[serde(default)]
    pub max_ver: String,

    /// Exclusive maximum version, or empty.
    #[serde(default)]
    pub max_ver_exclusive: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record_parses() {
        let json = r#"{
            "description": "libcurl development headers",
            "regexp": "libcurl",
            "dependencies": [{
                "runtime": true,
                "sysConstraints": [{"os": "linux", "flavor": "debian"}],
                "pkgConstraint": {"minVer": "1.0", "maxVerExclusive": "2.0"},
                "sysPkgs": ["libcurl4-openssl-dev"],
                "scripts": []
            }]
        }"#;

        let rec: RuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.regexp, "libcurl");
        assert_eq!(rec.dependencies.len(), 1);
        let dep = &rec.dependencies[0];
        assert!(dep.runtime);
        assert_eq!(dep.sys_constraints[0].os, "linux");
        assert_eq!(dep.sys_constraints[0].arch, "");
        assert_eq!(dep.pkg_constraint.min_ver, "1.0");
        assert_eq!(dep.sys_pkgs, vec!["libcurl4-openssl-dev"]);
    }

    #[test]
    fn test_sparse_record_defaults() {
        let rec: RuleRecord = serde_json::from_str(r#"{"regexp": "libssl"}"#).unwrap();
        assert_eq!(rec.description, "");
        assert!(rec.dependencies.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"regexp": "libxml2", "maintainer": "someone", "dependencies": []}"#;
        let rec: RuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.regexp, "libxml2");
    }
}
