//! Ordered accumulation of resolved actions.

use sysreq_schema::Action;

/// Push-only accumulator preserving emission order.
///
/// The order actions are pushed in (rule order, then dependency order
/// within a rule) is part of the resolver's contract: callers may depend
/// on it for reproducible remediation plans. No deduplication happens
/// here; identical payloads from different dependencies all appear.
#[derive(Debug, Default)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action, preserving insertion order.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Read-only view of the accumulated actions.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Number of accumulated actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Hand the ordered actions to the caller.
    pub fn into_vec(self) -> Vec<Action> {
        self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(pkg: &str) -> Action {
        Action {
            system_packages: vec![pkg.to_string()],
            scripts: vec![],
        }
    }

    #[test]
    fn test_order_preserved_and_duplicates_kept() {
        let mut list = ActionList::new();
        list.push(action("libcurl4"));
        list.push(action("libssl3"));
        list.push(action("libcurl4"));

        let actions = list.into_vec();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0], actions[2]);
        assert_eq!(actions[1].system_packages, vec!["libssl3"]);
    }
}
