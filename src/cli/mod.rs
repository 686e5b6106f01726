//! CLI layer: argument parsing, command dispatch and terminal output

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{build_cli, GlobalArgs};
pub use commands::{execute_command, run_operation};
pub use error::{CliError, CliResult};
