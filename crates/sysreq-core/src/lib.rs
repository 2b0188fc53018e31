//! Core library for sysreq: the dependency rule resolution engine and the
//! ruleset ingestion collaborator.
//!
//! The engine is a pure decision function: given an immutable [`Ruleset`],
//! a requirement signature, and an [`Environment`](sysreq_schema::Environment),
//! [`resolve`] returns the ordered remediation actions plus any
//! diagnostics. All I/O lives in [`fetch`], which hands over a fully built
//! record list before any resolution begins; the engine itself never
//! blocks and is safe to call concurrently against a shared ruleset.

pub mod aggregate;
pub mod diagnostics;
pub mod fetch;
pub mod matcher;
pub mod ruleset;

pub use diagnostics::Diagnostic;
pub use matcher::{Resolution, ResolveError, resolve};
pub use ruleset::{Dependency, Rule, Ruleset};

/// User Agent string for network operations
pub const USER_AGENT: &str = concat!("sysreq-core/", env!("CARGO_PKG_VERSION"));
