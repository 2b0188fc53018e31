//! Resolved remediation actions.

use serde::{Deserialize, Serialize};

/// The remediation payload for one matched dependency: system packages to
/// install and scripts to run.
///
/// An action carries no identity beyond its payload. The resolver emits
/// one per matched dependency, so two dependencies naming the same
/// package produce two actions; deduplication is deliberately left to the
/// caller (rule authors may want idempotent reapplication signaled
/// separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// System packages to install, in rule order.
    pub system_packages: Vec<String>,
    /// Script identifiers to run, in rule order.
    pub scripts: Vec<String>,
}

impl Action {
    /// Whether this action carries no packages and no scripts.
    pub fn is_empty(&self) -> bool {
        self.system_packages.is_empty() && self.scripts.is_empty()
    }
}
