//! Action Schema CLI
//!
//! Command-line interface for resolving controller schema configuration,
//! validating payloads, and inspecting the per-operation schema table.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use action_schema::{
    load_config, load_json, validate, Action, ApiInspector, Controller, Direction, OperationDoc,
    ValidateError,
};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "action-schema")]
#[command(about = "Resolve per-action, per-direction controller schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the schema for one action and direction
    Resolve {
        /// Controller configuration file (JSON, serializer_class grammar)
        config: PathBuf,

        /// Action name (e.g. list, create, partial_update, or a custom name)
        #[arg(long, short)]
        action: String,

        /// Resolve the read (response) schema
        #[arg(long, conflicts_with = "write", required_unless_present = "write")]
        read: bool,

        /// Resolve the write (payload) schema
        #[arg(long, conflicts_with = "read", required_unless_present = "read")]
        write: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Print the winning attribute key to stderr
        #[arg(long, short)]
        verbose: bool,
    },

    /// Validate a payload against the resolved schema
    Validate {
        /// Payload file to validate
        payload: PathBuf,

        /// Controller configuration file
        #[arg(long, short)]
        config: PathBuf,

        /// Action name
        #[arg(long, short)]
        action: String,

        /// Validate as read data (inferred from the action if omitted)
        #[arg(long, conflicts_with = "write")]
        read: bool,

        /// Validate as write data (inferred from the action if omitted)
        #[arg(long, conflicts_with = "read")]
        write: bool,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Show which schema applies to each routed operation
    Inspect {
        /// Controller configuration file
        config: PathBuf,

        /// Base path for the CRUD route table (default: "/" + config stem)
        #[arg(long)]
        path: Option<String>,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve {
            config,
            action,
            read: _,
            write,
            output,
            pretty,
            verbose,
        } => run_resolve(&config, &action, write, output, pretty, verbose),

        Commands::Validate {
            payload,
            config,
            action,
            read,
            write,
            json,
        } => run_validate(&payload, &config, &action, read, write, json),

        Commands::Inspect {
            config,
            path,
            format,
        } => run_inspect(&config, path.as_deref(), &format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_resolve(
    config_path: &Path,
    action: &str,
    write: bool,
    output: Option<PathBuf>,
    pretty: bool,
    verbose: bool,
) -> Result<(), u8> {
    let schemas = load_config(config_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let action = Action::parse(action);
    let direction = Direction::from_write_flag(write);
    let resolution = schemas.resolve_entry(&action, direction).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if verbose {
        eprintln!("resolved from {}", resolution.key);
    }

    let json_output = if pretty {
        serde_json::to_string_pretty(resolution.schema)
    } else {
        serde_json::to_string(resolution.schema)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_validate(
    payload_path: &Path,
    config_path: &Path,
    action: &str,
    read: bool,
    write: bool,
    json_output: bool,
) -> Result<(), u8> {
    let payload = load_json(payload_path).map_err(|e| {
        report_error(json_output, &format!("loading payload: {}", e));
        e.exit_code() as u8
    })?;

    let schemas = load_config(config_path).map_err(|e| {
        report_error(json_output, &format!("loading config: {}", e));
        e.exit_code() as u8
    })?;

    let action = Action::parse(action);

    // Direction: explicit flag > the action's own payload policy.
    let direction = if read {
        Direction::Read
    } else if write {
        Direction::Write
    } else {
        match action.has_request_payload() {
            Some(true) => Direction::Write,
            Some(false) => Direction::Read,
            None => {
                report_error(
                    json_output,
                    &format!(
                        "cannot infer direction for custom action \"{}\". Use --read or --write.",
                        action
                    ),
                );
                return Err(2);
            }
        }
    };

    match validate(&schemas, &payload, &action, direction) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(ValidateError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Validation failed:");
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            Err(1)
        }
        Err(ValidateError::Resolve(e)) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        let output = serde_json::json!({ "valid": false, "error": msg });
        println!("{}", output);
    } else {
        eprintln!("Error: {}", msg);
    }
}

fn run_inspect(config_path: &Path, base_path: Option<&str>, format: &str) -> Result<(), u8> {
    let schemas = load_config(config_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let stem = config_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resource");
    let base = match base_path {
        Some(p) => p.to_string(),
        None => format!("/{stem}"),
    };

    let controller: Controller<Value> = Controller::new(stem, schemas);
    let mut inspector = ApiInspector::new();
    inspector.register_resource(&base, &controller);

    let operations = inspector.operations().map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&operations).unwrap());
    } else {
        print_operation_table(&operations);
    }

    Ok(())
}

fn print_operation_table(operations: &[OperationDoc<'_, Value>]) {
    for op in operations {
        println!("{:<6} {:<24} {}", op.method.as_str(), op.path, op.action);
        if let Some(request) = &op.request {
            println!("    request:  {}", request.key);
        }
        println!("    response: {}", op.response.key);
    }
}
