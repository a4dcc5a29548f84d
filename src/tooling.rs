//! Tooling & Integration Layer
//!
//! Command-line surface over the fetcher facade.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
