//! Command-line consumer of the schema library
//!
//! Provides:
//! - validate: validate one JSON document from stdin
//! - stream: validate newline-delimited JSON until EOF
//! - describe: print the declared schema tables

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{describe, run, run_command, stream, validate};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_requests, write_error, write_response, write_validation_failure};
