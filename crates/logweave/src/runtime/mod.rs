//! Runtime module: CLI lifecycle: boot, argument parsing, command execution.

pub mod boot;
pub mod cli;
pub mod run;

pub use cli::{Cli, Commands};
pub use run::{execute, RunError};
