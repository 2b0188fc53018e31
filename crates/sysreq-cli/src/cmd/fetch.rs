//! Fetch command

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

/// Download the ruleset archive to `out` for offline resolves.
pub async fn fetch(config: &Config, rules: Option<&str>, out: &Path) -> Result<()> {
    let url = config.rules_source(rules);
    anyhow::ensure!(
        url.starts_with("http://") || url.starts_with("https://"),
        "fetch needs a URL, got a local path: {url}"
    );

    let client = reqwest::Client::new();
    let written = sysreq_core::fetch::download_archive(&client, url, out)
        .await
        .with_context(|| format!("Failed to download {url}"))?;

    println!("Saved {written} bytes to {}", out.display());
    Ok(())
}
