//! sysreq - resolve system package requirements
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Command-line shell around the `sysreq-core` resolution engine: loads a
//! ruleset (remote archive or local snapshot), formats the requirement
//! signature, resolves, and prints the remediation plan.

pub mod cmd;
pub mod config;

// Re-exports from other crates for convenience
pub use sysreq_core::fetch::DEFAULT_RULES_URL;
pub use sysreq_core::{Resolution, Ruleset, resolve};
pub use sysreq_schema::{Environment, signature};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sysreq")]
#[command(author, version, about = "Resolve OS packages for native library requirements")]
pub struct Cli {
    /// Path to an alternate config file (default: ~/.config/sysreq/sysreq.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve remediation actions for a set of native-library requirements
    Resolve {
        /// Native libraries the package requires (e.g. libcurl libssl)
        #[arg(required = true)]
        libs: Vec<String>,

        /// Target operating system (defaults to the host)
        #[arg(long)]
        os: Option<String>,

        /// Target distribution flavor (e.g. ubuntu, redhat)
        #[arg(long)]
        flavor: Option<String>,

        /// Target CPU architecture (defaults to the host)
        #[arg(long)]
        arch: Option<String>,

        /// Version of the requesting package
        #[arg(long)]
        package_version: Option<String>,

        /// Ruleset archive URL or local .tar.gz path
        #[arg(long)]
        rules: Option<String>,

        /// Emit the action list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Download the ruleset archive to disk for offline resolves
    Fetch {
        /// Ruleset archive URL
        #[arg(long)]
        rules: Option<String>,

        /// Destination file
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Load a ruleset and report its health
    Check {
        /// Ruleset archive URL or local .tar.gz path
        #[arg(long)]
        rules: Option<String>,
    },
}
