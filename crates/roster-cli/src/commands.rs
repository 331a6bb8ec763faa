//! Command implementations.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, trace};

use roster_core::{Normalized, PipelineError, StatusClass, inspect_file, read_file};
use roster_standards::registry;

use crate::cli::{InputArgs, ReadArgs};
use crate::logging::redact_value;
use crate::summary::{inspection_report, schemas_table};

/// Text a command prints and the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

impl CommandOutput {
    fn success(stdout: String) -> Self {
        Self {
            stdout,
            stderr: None,
            exit_code: 0,
        }
    }
}

/// Exit code for a failed read.
pub fn exit_code(status: StatusClass) -> i32 {
    match status {
        StatusClass::ClientError => 2,
        StatusClass::NotFound => 3,
        StatusClass::ServerError => 1,
    }
}

/// `roster read`: prints the success or error envelope as JSON.
pub fn run_read(args: &ReadArgs) -> Result<CommandOutput> {
    let input = &args.input;
    let options = input.pipeline_options();
    match read_file(&input.file, input.original_name.as_deref(), &options) {
        Ok(response) => {
            info!(
                file = %input.file.display(),
                kind = response.kind.as_str(),
                records = response.data.len(),
                "read complete"
            );
            Ok(CommandOutput::success(render_json(&response, args.pretty)?))
        }
        Err(err) => {
            log_failure(input, &err);
            Ok(CommandOutput {
                stdout: render_json(&err.to_body(), args.pretty)?,
                stderr: None,
                exit_code: exit_code(err.status()),
            })
        }
    }
}

/// `roster schemas`: prints the built-in schema table.
pub fn run_schemas() -> Result<CommandOutput> {
    let table = schemas_table(registry().schemas());
    Ok(CommandOutput::success(table.to_string()))
}

/// `roster inspect`: prints the resolved schema and column mapping.
pub fn run_inspect(args: &InputArgs) -> Result<CommandOutput> {
    let options = args.pipeline_options();
    match inspect_file(&args.file, args.original_name.as_deref(), &options) {
        Ok(normalized) => {
            trace_first_record(&normalized);
            Ok(CommandOutput::success(inspection_report(&normalized)))
        }
        Err(err) => {
            log_failure(args, &err);
            let mut message = format!("error: {err}");
            if let PipelineError::RequiredColumnMissing { candidates, .. } = &err {
                message.push_str("\nscanned rows:");
                for (index, row) in candidates.iter().enumerate() {
                    let cells: Vec<&str> = row.iter().map(|cell| redact_value(cell)).collect();
                    message.push_str(&format!("\n  {index}: {}", cells.join(" | ")));
                }
            }
            Ok(CommandOutput {
                stdout: String::new(),
                stderr: Some(message),
                exit_code: exit_code(err.status()),
            })
        }
    }
}

/// Serializes without an intermediate `Value` so record keys keep field order.
fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("render json")
}

fn log_failure(args: &InputArgs, err: &PipelineError) {
    error!(
        file = %args.file.display(),
        status = %err.status(),
        error = %err,
        "read failed"
    );
}

fn trace_first_record(normalized: &Normalized<'_>) {
    let Some(record) = normalized.records.first() else {
        return;
    };
    for (field, value) in record.iter() {
        trace!(field, value = redact_value(value), "first record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_status() {
        assert_eq!(exit_code(StatusClass::ClientError), 2);
        assert_eq!(exit_code(StatusClass::NotFound), 3);
        assert_eq!(exit_code(StatusClass::ServerError), 1);
    }

    #[test]
    fn compact_and_pretty_json() {
        let value = serde_json::json!({"error": "x"});
        assert_eq!(render_json(&value, false).unwrap(), r#"{"error":"x"}"#);
        assert_eq!(
            render_json(&value, true).unwrap(),
            "{\n  \"error\": \"x\"\n}"
        );
    }
}
