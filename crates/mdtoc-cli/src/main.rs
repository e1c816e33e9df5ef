//! # mdtoc CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdtoc_cli::toc::{run_toc, TocArgs};
use mdtoc_cli::validate::{run_validate, ValidateArgs};

/// Markdown table-of-contents generator.
///
/// Prints one `- [text](#anchor)` line per heading of a Markdown document,
/// indented two spaces per level, and validates JSON/YAML documents
/// against JSON Schemas.
#[derive(Parser, Debug)]
#[command(name = "mdtoc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the table of contents of a Markdown document.
    Toc(TocArgs),

    /// Validate a JSON or YAML document against a JSON Schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mdtoc v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Toc(args) => run_toc(&args, cli.config.as_deref()),
        Commands::Validate(args) => {
            if cli.config.is_some() {
                tracing::debug!("--config has no effect on validate");
            }
            run_validate(&args)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
