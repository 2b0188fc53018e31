//! Subcommand implementations.

pub mod check;
pub mod fetch;
pub mod resolve;

use anyhow::{Context, Result};
use std::path::Path;
use sysreq_core::fetch::FetchedRules;

/// Load rule records from `source`: an `http(s)` URL is fetched and
/// streamed, anything else is treated as a local archive path.
pub async fn load_rules(source: &str) -> Result<FetchedRules> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = reqwest::Client::new();
        sysreq_core::fetch::fetch_rules(&client, source)
            .await
            .with_context(|| format!("Failed to fetch ruleset from {source}"))
    } else {
        let path = Path::new(source).to_path_buf();
        tokio::task::spawn_blocking(move || sysreq_core::fetch::load_rules_archive(&path))
            .await
            .context("Ruleset loader task failed")?
            .with_context(|| format!("Failed to load ruleset archive {source}"))
    }
}
