//! JSON I/O handling for CLI
//!
//! - Input: JSON objects on stdin (one document, or one per line)
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::io::{BufRead, Read, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use crate::schema::ValidationFailure;

/// Read a whole JSON document from the reader
pub fn read_request<R: Read>(reader: &mut R) -> CliResult<Value> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;

    if is_blank(&content) {
        return Err(CliError::invalid_input("Empty input"));
    }

    let value: Value = serde_json::from_slice(&content)?;
    Ok(value)
}

/// Read newline-delimited JSON documents, skipping blank lines.
///
/// The outer error is a read failure; the inner one an undecodable line,
/// including a line that is not valid UTF-8.
pub fn read_requests<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = CliResult<CliResult<Value>>> {
    reader
        .split(b'\n')
        .filter(|line| !matches!(line, Ok(l) if is_blank(l)))
        .map(|line| -> CliResult<CliResult<Value>> {
            let line = line?;
            Ok(serde_json::from_slice(&line).map_err(CliError::from))
        })
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Write an error response
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(writer, &response)
}

/// Write a validation failure with every field error
pub fn write_validation_failure<W: Write>(
    writer: &mut W,
    failure: &ValidationFailure,
) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": ValidationFailure::CODE,
        "message": failure.to_string(),
        "errors": failure.errors()
    });
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordKind;
    use crate::schema::FieldError;
    use std::io::Cursor;

    #[test]
    fn test_read_request_accepts_multiline_json() {
        let mut input = Cursor::new("{\n  \"name\": \"Ada\"\n}\n");
        let value = read_request(&mut input).unwrap();
        assert_eq!(value["name"], "Ada");
    }

    #[test]
    fn test_read_request_rejects_empty_input() {
        let mut input = Cursor::new("   \n");
        let err = read_request(&mut input).unwrap_err();
        assert_eq!(err.code_str(), "INTAKE_CLI_INVALID_INPUT");
    }

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = Cursor::new("{\"a\":1}\n\n{oops\n{\"b\":2}\n");
        let results: Vec<_> = read_requests(input).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap()["a"], 1);
        assert!(results[1].as_ref().unwrap().is_err());
        assert_eq!(results[2].as_ref().unwrap().as_ref().unwrap()["b"], 2);
    }

    #[test]
    fn test_read_requests_reports_invalid_utf8_per_line() {
        let input = Cursor::new(b"{\"a\":1}\r\n\xff\xfe garbage\n{\"b\":2}\n".to_vec());
        let results: Vec<_> = read_requests(input).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap()["a"], 1);

        let err = results[1].as_ref().unwrap().as_ref().unwrap_err();
        assert_eq!(err.code_str(), "INTAKE_CLI_INVALID_INPUT");

        assert_eq!(results[2].as_ref().unwrap().as_ref().unwrap()["b"], 2);
    }

    #[test]
    fn test_write_response_is_one_line() {
        let mut out = Vec::new();
        write_response(&mut out, json!({"x": 1})).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["x"], 1);
    }

    #[test]
    fn test_write_validation_failure_lists_errors() {
        let failure = ValidationFailure::new(
            RecordKind::User,
            vec![FieldError::missing("name"), FieldError::missing("email")],
        );
        let mut out = Vec::new();
        write_validation_failure(&mut out, &failure).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "INTAKE_VALIDATION_FAILED");
        assert_eq!(parsed["errors"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["errors"][0]["error"], "missing_field");
        assert_eq!(parsed["errors"][1]["field"], "email");
    }
}
