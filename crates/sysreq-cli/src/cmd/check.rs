//! Check command: ruleset health report.

use anyhow::Result;
use sysreq_core::Ruleset;

use crate::config::Config;

/// Load a ruleset and report rule counts and every load problem.
///
/// Exits non-zero (via the returned error) if any rule's pattern failed
/// to compile, since such a ruleset silently under-matches.
pub async fn check(config: &Config, rules: Option<&str>) -> Result<()> {
    let source = config.rules_source(rules);
    let fetched = super::load_rules(source).await?;

    let skipped_entries = fetched.diagnostics.len();
    let ruleset = Ruleset::from_records(fetched.records);

    println!("Ruleset: {source}");
    println!("  rules:        {}", ruleset.len());
    println!("  dependencies: {}", ruleset.dependency_count());
    if skipped_entries > 0 {
        println!("  skipped archive entries: {skipped_entries}");
    }

    for diag in fetched.diagnostics.iter().chain(ruleset.load_diagnostics()) {
        println!("  warning: {diag}");
    }

    let excluded = ruleset
        .load_diagnostics()
        .iter()
        .filter(|d| d.excludes_rule())
        .count();
    if excluded > 0 {
        anyhow::bail!("{excluded} rule(s) excluded due to uncompilable patterns");
    }

    println!("OK");
    Ok(())
}
