//! CLI argument definitions using clap
//!
//! Commands:
//! - intake-schema validate --kind <kind> [--config <path>]
//! - intake-schema stream --kind <kind> [--config <path>]
//! - intake-schema describe [--kind <kind>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::records::RecordKind;

/// intake-schema - validate intake records before they reach storage
#[derive(Parser, Debug)]
#[command(name = "intake-schema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Validate one JSON object read from stdin
    Validate {
        /// Record kind: user, product or appointment-request
        #[arg(long)]
        kind: RecordKind,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate newline-delimited JSON objects from stdin until EOF
    Stream {
        /// Record kind: user, product or appointment-request
        #[arg(long)]
        kind: RecordKind,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the declared schema tables as JSON
    Describe {
        /// Only describe this record kind
        #[arg(long)]
        kind: Option<RecordKind>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["intake-schema", "validate", "--kind", "appointment-request"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Validate {
                kind: RecordKind::AppointmentRequest,
                config: None
            }
        );
    }

    #[test]
    fn test_parse_stream_with_config() {
        let cli = Cli::try_parse_from([
            "intake-schema",
            "stream",
            "--kind",
            "User",
            "--config",
            "intake.json",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Stream {
                kind: RecordKind::User,
                config: Some(PathBuf::from("intake.json"))
            }
        );
    }

    #[test]
    fn test_parse_describe_without_kind() {
        let cli = Cli::try_parse_from(["intake-schema", "describe"]).unwrap();
        assert_eq!(cli.command, Command::Describe { kind: None });
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["intake-schema", "validate", "--kind", "blogpost"]).is_err());
    }

    #[test]
    fn test_kind_is_required_for_validate() {
        assert!(Cli::try_parse_from(["intake-schema", "validate"]).is_err());
    }
}
