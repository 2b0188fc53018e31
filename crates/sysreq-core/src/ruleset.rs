//! The validated rule model, built once from raw records.
//!
//! [`Ruleset::from_records`] is the only way to obtain rules: it compiles
//! every trigger pattern up front (case-insensitively) and validates every
//! version constraint, so evaluation never pays compilation cost, never
//! races on a lazily filled cache, and never sees a half-formed
//! constraint. Problems found during construction become load
//! [`Diagnostic`]s carried on the ruleset; the offending rule or
//! dependency stays in place but is inert, preserving the indices
//! diagnostics refer to.

use regex::{Regex, RegexBuilder};
use sysreq_schema::{RuleRecord, SystemConstraint, VersionConstraint};

use crate::diagnostics::Diagnostic;

/// One remediation alternative within a [`Rule`], immutable after load.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Whether the dependency is needed at runtime (informational).
    pub runtime: bool,

    /// System constraint alternatives, OR semantics. The *first*
    /// alternative (in list order) that matches the environment wins, so
    /// ruleset authors should list the most specific constraint first.
    pub sys_constraints: Vec<SystemConstraint>,

    /// System packages this dependency installs.
    pub sys_pkgs: Vec<String>,

    /// Setup scripts this dependency runs.
    pub scripts: Vec<String>,

    // None means the record's constraint was malformed; the dependency
    // fails closed and the load diagnostic explains why.
    pkg_constraint: Option<VersionConstraint>,
}

impl Dependency {
    /// The constraint on the requesting package's version, if it loaded.
    pub fn pkg_constraint(&self) -> Option<&VersionConstraint> {
        self.pkg_constraint.as_ref()
    }
}

/// A trigger pattern plus its ordered remediation dependencies.
#[derive(Debug, Clone)]
pub struct Rule {
    description: String,
    pattern_source: String,
    // None means compilation failed at load; the rule never matches.
    pattern: Option<Regex>,
    dependencies: Vec<Dependency>,
}

impl Rule {
    /// Human-readable description of what the rule covers.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The trigger pattern's source text.
    pub fn pattern_source(&self) -> &str {
        &self.pattern_source
    }

    /// The compiled case-insensitive trigger pattern, or `None` if it
    /// failed to compile at load time.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Ordered dependencies of this rule.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }
}

/// An ordered, read-only collection of rules for one resolution session.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    rules: Vec<Rule>,
    load_diagnostics: Vec<Diagnostic>,
}

impl Ruleset {
    /// Build a ruleset from raw records, compiling patterns and
    /// validating constraints as it goes.
    ///
    /// Construction never fails: a record with a bad pattern or
    /// constraint is loaded in an inert form and reported through
    /// [`load_diagnostics`](Self::load_diagnostics). Record order is
    /// preserved, which fixes the output order of every later resolve.
    pub fn from_records<I: IntoIterator<Item = RuleRecord>>(records: I) -> Self {
        let mut rules = Vec::new();
        let mut load_diagnostics = Vec::new();

        for (rule_idx, record) in records.into_iter().enumerate() {
            let pattern = match RegexBuilder::new(&record.regexp)
                .case_insensitive(true)
                .build()
            {
                Ok(re) => Some(re),
                Err(err) => {
                    tracing::warn!(
                        rule = rule_idx,
                        pattern = %record.regexp,
                        error = %err,
                        "excluding rule with uncompilable pattern"
                    );
                    load_diagnostics.push(Diagnostic::PatternCompile {
                        rule: rule_idx,
                        description: record.description.clone(),
                        pattern: record.regexp.clone(),
                        message: err.to_string(),
                    });
                    None
                }
            };

            let mut dependencies = Vec::with_capacity(record.dependencies.len());
            for (dep_idx, dep) in record.dependencies.into_iter().enumerate() {
                let pkg_constraint = match VersionConstraint::new(
                    Some(&dep.pkg_constraint.min_ver),
                    Some(&dep.pkg_constraint.min_ver_exclusive),
                    Some(&dep.pkg_constraint.max_ver),
                    Some(&dep.pkg_constraint.max_ver_exclusive),
                ) {
                    Ok(c) => Some(c),
                    Err(err) => {
                        tracing::warn!(
                            rule = rule_idx,
                            dependency = dep_idx,
                            error = %err,
                            "dependency constraint failed to load; it will never match"
                        );
                        load_diagnostics.push(Diagnostic::VersionConstraint {
                            rule: rule_idx,
                            dependency: dep_idx,
                            message: err.to_string(),
                        });
                        None
                    }
                };

                dependencies.push(Dependency {
                    runtime: dep.runtime,
                    sys_constraints: dep.sys_constraints.iter().map(Into::into).collect(),
                    sys_pkgs: dep.sys_pkgs,
                    scripts: dep.scripts,
                    pkg_constraint,
                });
            }

            rules.push(Rule {
                description: record.description,
                pattern_source: record.regexp,
                pattern,
                dependencies,
            });
        }

        Self {
            rules,
            load_diagnostics,
        }
    }

    /// The rules in load order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Diagnostics recorded while building this ruleset.
    pub fn load_diagnostics(&self) -> &[Diagnostic] {
        &self.load_diagnostics
    }

    /// Number of rules, including inert ones.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the ruleset holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Total number of dependencies across all rules.
    pub fn dependency_count(&self) -> usize {
        self.rules.iter().map(|r| r.dependencies.len()).sum()
    }
}
