//! Resolve command

use anyhow::{Context, Result};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use sysreq_core::Ruleset;
use sysreq_schema::{Environment, signature};

use crate::config::Config;

/// Arguments for a resolve run, after clap parsing.
#[derive(Debug)]
pub struct ResolveOpts {
    pub libs: Vec<String>,
    pub os: Option<String>,
    pub flavor: Option<String>,
    pub arch: Option<String>,
    pub package_version: Option<String>,
    pub rules: Option<String>,
    pub json: bool,
}

/// Resolve the remediation plan for a set of native libraries and print it.
pub async fn resolve(config: &Config, opts: ResolveOpts) -> Result<()> {
    let start = std::time::Instant::now();

    let source = config.rules_source(opts.rules.as_deref());
    let fetched = super::load_rules(source).await?;
    let ruleset = Ruleset::from_records(fetched.records);

    let env = build_environment(config, &opts);
    let sig = signature(&opts.libs);
    tracing::debug!(signature = %sig, ?env, "resolving");

    let resolution = sysreq_core::resolve(&ruleset, &sig, &env)
        .context("Resolution failed")?;

    for diag in fetched.diagnostics.iter().chain(&resolution.diagnostics) {
        tracing::warn!("{diag}");
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&resolution.actions)?);
        return Ok(());
    }

    if resolution.actions.is_empty() {
        println!("No actions required for {sig} on {}/{}", env.os, env.arch);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(["#", "SYSTEM PACKAGES", "SCRIPTS"]);
    for (i, action) in resolution.actions.iter().enumerate() {
        table.add_row([
            (i + 1).to_string(),
            action.system_packages.join(" "),
            action.scripts.join(" "),
        ]);
    }
    println!("{table}");

    let elapsed = start.elapsed();
    println!(
        "RESOLVE COMPLETE {} action(s), {} diagnostic(s), elapsed {:.2}s",
        resolution.actions.len(),
        resolution.diagnostics.len() + fetched.diagnostics.len(),
        elapsed.as_secs_f64()
    );

    Ok(())
}

fn build_environment(config: &Config, opts: &ResolveOpts) -> Environment {
    let defaults = &config.environment;

    let os = opts
        .os
        .as_deref()
        .or(defaults.os.as_deref())
        .map_or_else(sysreq_schema::Os::current, Into::into);
    let flavor = opts
        .flavor
        .as_deref()
        .or(defaults.flavor.as_deref())
        .unwrap_or("")
        .into();
    let arch = opts
        .arch
        .as_deref()
        .or(defaults.arch.as_deref())
        .map_or_else(sysreq_schema::Arch::current, Into::into);
    let package_version = opts
        .package_version
        .as_deref()
        .or(defaults.package_version.as_deref())
        .unwrap_or("0")
        .to_string();

    Environment {
        os,
        flavor,
        arch,
        package_version,
    }
}
