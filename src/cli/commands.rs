//! CLI command implementations
//!
//! Each command reads JSON from stdin and writes JSON responses to stdout.
//! The generic variants take any reader and writer so they can be driven
//! from tests.

use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use serde_json::json;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_error, write_response, write_validation_failure};
use crate::observability::{log_event_with_fields, Event, MetricsSnapshot, ValidationMetrics};
use crate::records::{validate_record, RecordKind};
use crate::schema::{SchemaRegistry, SchemaValidator};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command against stdin and stdout
pub fn run_command(command: Command) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match command {
        Command::Validate { kind, config } => {
            let config = load_config(config.as_deref())?;
            validate(&config, kind, &mut stdin.lock(), &mut stdout.lock())
        }
        Command::Stream { kind, config } => {
            let config = load_config(config.as_deref())?;
            stream(&config, kind, stdin.lock(), &mut stdout.lock()).map(|_| ())
        }
        Command::Describe { kind } => describe(kind, &mut stdout.lock()),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load_optional(path)?;

    if let Some(path) = path {
        let path = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", &path)]);
    }

    Ok(config)
}

/// Validate a single JSON document.
///
/// A validation failure is a normal response. Unreadable or undecodable
/// input is a CLI error.
pub fn validate<R: Read, W: Write>(
    config: &Config,
    kind: RecordKind,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let raw = read_request(input)?;
    let metrics = ValidationMetrics::new();
    respond(config, &config.validator(), kind, &raw, output, &metrics)
}

/// Validate newline-delimited JSON documents until EOF.
///
/// Undecodable lines are answered with an error response and the stream
/// continues. A read or write failure ends the stream.
pub fn stream<R: BufRead, W: Write>(
    config: &Config,
    kind: RecordKind,
    input: R,
    output: &mut W,
) -> CliResult<MetricsSnapshot> {
    let validator = config.validator();
    let metrics = ValidationMetrics::new();

    log_event_with_fields(
        Event::StreamStart,
        &[("kind", kind.identifier()), ("collection", config.collection_for(kind))],
    );

    for request in read_requests(input) {
        match request? {
            Ok(raw) => respond(config, &validator, kind, &raw, output, &metrics)?,
            Err(e) => {
                metrics.input_malformed();
                log_event_with_fields(Event::InputMalformed, &[("error", e.message())]);
                write_error(output, e.code_str(), e.message())?;
            }
        }
    }

    let snapshot = metrics.snapshot();
    let fields = snapshot.to_fields();
    let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::StreamComplete, &fields);

    Ok(snapshot)
}

fn respond<W: Write>(
    config: &Config,
    validator: &SchemaValidator,
    kind: RecordKind,
    raw: &serde_json::Value,
    output: &mut W,
    metrics: &ValidationMetrics,
) -> CliResult<()> {
    match validate_record(kind, raw, validator) {
        Ok(record) => {
            metrics.record_accepted();
            let collection = config.collection_for(kind);
            log_event_with_fields(
                Event::RecordAccepted,
                &[("kind", kind.identifier()), ("collection", collection)],
            );

            write_response(
                output,
                json!({
                    "kind": kind,
                    "collection": collection,
                    "record": record.to_document()?
                }),
            )
        }
        Err(failure) => {
            let error_count = failure.errors().len();
            metrics.record_rejected(error_count);
            log_event_with_fields(
                Event::RecordRejected,
                &[("kind", kind.identifier()), ("errors", &error_count.to_string())],
            );

            write_validation_failure(output, &failure)
        }
    }
}

/// Print the declared schema tables, optionally for a single kind
pub fn describe<W: Write>(kind: Option<RecordKind>, output: &mut W) -> CliResult<()> {
    let registry =
        SchemaRegistry::builtin().map_err(|e| CliError::schema_error(e.to_string()))?;

    let schemas: Vec<_> = match kind {
        Some(kind) => registry.get(kind).into_iter().collect(),
        None => registry.all_schemas().collect(),
    };

    if schemas.is_empty() {
        return Err(CliError::schema_error("No schema registered for requested kind"));
    }

    write_response(output, json!({ "schemas": serde_json::to_value(&schemas)? }))
}
