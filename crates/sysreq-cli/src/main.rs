//! sysreq - system requirements resolution CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sysreq_cli::config::Config;
use sysreq_cli::{Cli, Commands, cmd};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve {
            libs,
            os,
            flavor,
            arch,
            package_version,
            rules,
            json,
        } => {
            let opts = cmd::resolve::ResolveOpts {
                libs,
                os,
                flavor,
                arch,
                package_version,
                rules,
                json,
            };
            cmd::resolve::resolve(&config, opts).await
        }
        Commands::Fetch { rules, out } => cmd::fetch::fetch(&config, rules.as_deref(), &out).await,
        Commands::Check { rules } => cmd::check::check(&config, rules.as_deref()).await,
    }
}
