//! OAS Inspect CLI
//!
//! Command-line interface for browsing dereferenced operation schemas and
//! validating payloads with closed-object semantics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use oas_inspect::{
    audit_refs, dereference, extract_with, fixture, fixture_names, has_errors, list_operations,
    load_document, load_document_auto, prepare_strict, validate_detailed, Dereferencer,
    OperationKey, Severity, DEFAULT_FIXTURE,
};

#[derive(Parser)]
#[command(name = "oas-inspect")]
#[command(about = "Dereference OpenAPI operation schemas and validate JSON payloads")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the paths of an OpenAPI document and their methods
    Paths {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the dereferenced request and 200 response schemas of an operation
    Schema {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        /// Path key under `paths`, e.g. /users/{id}
        #[arg(long)]
        path: String,

        /// HTTP method (case-insensitive)
        #[arg(long, short)]
        method: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Fail on $ref targets that do not exist instead of using {}
        #[arg(long)]
        deny_unresolved: bool,
    },

    /// Validate a payload against a schema or a bundled fixture
    Validate {
        /// Payload file to validate
        payload: PathBuf,

        /// Schema source: file path or URL (default: bundled fixture)
        #[arg(long, conflicts_with = "fixture")]
        schema: Option<String>,

        /// Bundled fixture name (see `fixtures`)
        #[arg(long)]
        fixture: Option<String>,

        /// Keep objects open: do not inject additionalProperties=false
        #[arg(long)]
        loose: bool,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Report $ref pointers that are malformed or do not resolve
    Lint {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List bundled fixture schemas
    Fixtures,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Paths { document, json } => run_paths(&document, json),
        Commands::Schema {
            document,
            path,
            method,
            output,
            pretty,
            deny_unresolved,
        } => run_schema(SchemaArgs {
            document,
            key: OperationKey::new(path, method),
            output,
            pretty,
            deny_unresolved,
        }),
        Commands::Validate {
            payload,
            schema,
            fixture,
            loose,
            json,
        } => run_validate(&payload, schema.as_deref(), fixture.as_deref(), loose, json),
        Commands::Lint { document, json } => run_lint(&document, json),
        Commands::Fixtures => {
            for name in fixture_names() {
                println!("{}", name);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn load(source: &str) -> Result<Value, u8> {
    load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn to_json(value: &impl serde::Serialize, pretty: bool) -> Result<String, u8> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })
}

fn run_paths(source: &str, json_output: bool) -> Result<(), u8> {
    let document = load(source)?;
    let paths = list_operations(&document);

    if json_output {
        println!("{}", to_json(&paths, false)?);
    } else {
        for entry in &paths {
            println!("{}: {}", entry.path, entry.methods.join(", "));
        }
    }
    Ok(())
}

struct SchemaArgs {
    document: String,
    key: OperationKey,
    output: Option<PathBuf>,
    pretty: bool,
    deny_unresolved: bool,
}

fn run_schema(args: SchemaArgs) -> Result<(), u8> {
    let document = load(&args.document)?;
    let dereferencer = Dereferencer::new().deny_unresolved(args.deny_unresolved);

    let schemas = extract_with(&dereferencer, &document, &args.key).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = to_json(&schemas, args.pretty)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => println!("{}", json_output),
    }
    Ok(())
}

fn run_validate(
    payload_path: &Path,
    schema_source: Option<&str>,
    fixture_name: Option<&str>,
    loose: bool,
    json_output: bool,
) -> Result<(), u8> {
    let payload = load_document(payload_path).map_err(|e| {
        report_error(json_output, &format!("loading payload: {}", e));
        e.exit_code() as u8
    })?;

    let schema = match schema_source {
        Some(source) => load_document_auto(source).map_err(|e| {
            report_error(json_output, &format!("loading schema: {}", e));
            e.exit_code() as u8
        })?,
        None => {
            let name = fixture_name.unwrap_or(DEFAULT_FIXTURE);
            fixture(name).ok_or_else(|| {
                report_error(json_output, &format!("unknown fixture: {}", name));
                2u8
            })?
        }
    };

    let prepared = if loose {
        dereference(&schema, &schema)
    } else {
        prepare_strict(&schema)
    }
    .map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let errors = validate_detailed(&prepared, &payload).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    if errors.is_empty() {
        if json_output {
            println!(r#"{{"valid":true}}"#);
        } else {
            println!("Valid");
        }
        return Ok(());
    }

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

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}

fn run_lint(source: &str, json_output: bool) -> Result<(), u8> {
    let document = load(source)?;
    let diagnostics = audit_refs(&document);

    if json_output {
        println!("{}", to_json(&diagnostics, true)?);
    } else if diagnostics.is_empty() {
        println!("No $ref problems found");
    } else {
        for diag in &diagnostics {
            let label = match diag.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!("{}[{}]: {} - {}", label, diag.code, diag.path, diag.message);
        }
    }

    if has_errors(&diagnostics) {
        Err(1)
    } else {
        Ok(())
    }
}
