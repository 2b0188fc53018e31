//! The resolution algorithm: ruleset × requirement signature × environment
//! → ordered actions.
//!
//! Constraint composition is explicit: within one dependency the version
//! constraint ANDs with the system constraints, and the system constraint
//! alternatives OR with each other, first match winning. Rules are
//! independent of each other; ruleset order only affects output order,
//! never matching outcome.

use sysreq_schema::{Action, Environment, Version};
use thiserror::Error;

use crate::aggregate::ActionList;
use crate::diagnostics::Diagnostic;
use crate::ruleset::Ruleset;

/// Fatal errors for a resolution call. Data problems inside the ruleset
/// are never fatal; they surface as [`Diagnostic`]s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The requirement signature was empty. Callers must pre-format the
    /// signature with its delimiters (e.g. `",libcurl,libssl,"`).
    #[error("empty requirement signature")]
    InvalidInput,
}

/// The outcome of one resolution call: the best achievable action list
/// plus every diagnostic, so partial results are never silent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Matched remediation actions, in rule order then dependency order.
    pub actions: Vec<Action>,
    /// Load-time and call-time diagnostics, in encounter order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve the remediation actions for `signature` in `env`.
///
/// Deterministic: identical inputs yield identical, identically ordered
/// output. Safe to call concurrently against a shared [`Ruleset`]; the
/// ruleset is never mutated and all patterns were compiled at load.
///
/// For each rule whose pattern matches the signature, each dependency
/// contributes one action iff its version constraint admits the
/// environment's package version AND some system constraint alternative
/// matches the environment (first matching alternative wins). Rules whose
/// pattern failed to compile at load are skipped with a diagnostic.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidInput`] if `signature` is empty. No
/// other condition is fatal.
pub fn resolve(
    ruleset: &Ruleset,
    signature: &str,
    env: &Environment,
) -> Result<Resolution, ResolveError> {
    if signature.is_empty() {
        return Err(ResolveError::InvalidInput);
    }

    // Re-report load problems on every call so no caller sees a silently
    // reduced ruleset.
    let mut diagnostics = ruleset.load_diagnostics().to_vec();

    // Parsed once per call. A malformed package version makes every
    // *bounded* constraint fail closed; unbounded constraints still
    // match, since an absent bound imposes no restriction to evaluate.
    let pkg_version: Option<Version> = match env.parsed_version() {
        Ok(v) => Some(v),
        Err(err) => {
            diagnostics.push(Diagnostic::PackageVersion {
                version: env.package_version.clone(),
                message: err.to_string(),
            });
            None
        }
    };

    let mut actions = ActionList::new();

    for (rule_idx, rule) in ruleset.rules().iter().enumerate() {
        let Some(pattern) = rule.pattern() else {
            // Already in diagnostics from load; nothing more to evaluate.
            tracing::debug!(rule = rule_idx, "skipping rule with uncompiled pattern");
            continue;
        };

        if !pattern.is_match(signature) {
            continue;
        }
        tracing::debug!(
            rule = rule_idx,
            description = rule.description(),
            "rule pattern matched signature"
        );

        for (dep_idx, dep) in rule.dependencies().iter().enumerate() {
            let version_ok = match (dep.pkg_constraint(), &pkg_version) {
                // Constraint failed to load: fails closed (diagnosed at load).
                (None, _) => false,
                (Some(c), _) if c.is_unbounded() => true,
                (Some(c), Some(v)) => c.satisfies(v),
                // Bounded constraint but unparsable package version: fails closed.
                (Some(_), None) => false,
            };
            if !version_ok {
                tracing::debug!(
                    rule = rule_idx,
                    dependency = dep_idx,
                    "dependency skipped: package version outside constraint"
                );
                continue;
            }

            // First matching alternative wins; authors list the most
            // specific constraint first.
            if dep.sys_constraints.iter().any(|c| c.matches(env)) {
                actions.push(Action {
                    system_packages: dep.sys_pkgs.clone(),
                    scripts: dep.scripts.clone(),
                });
            }
        }
    }

    Ok(Resolution {
        actions: actions.into_vec(),
        diagnostics,
    })
}
