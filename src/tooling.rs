//! Tooling & Integration Layer
//!
//! The `lcagents` command-line surface and its text rendering.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, CommandOutput, Commands};
