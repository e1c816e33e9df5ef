//! # Validate Subcommand
//!
//! Validates a JSON or YAML document against a JSON Schema and prints every
//! message. Exits 0 when the document is valid, 1 otherwise.
//!
//! ```bash
//! mdtoc validate --schema schemas/toc-entries.schema.json toc.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mdtoc_schema::{JsonSchemaValidator, SchemaDraft};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON Schema file.
    #[arg(long)]
    pub schema: PathBuf,

    /// Document to validate (.json, .yaml or .yml).
    pub document: PathBuf,

    /// Schema draft: draft4, draft6, draft7, draft2019-09, draft2020-12.
    #[arg(long, default_value = "draft2019-09")]
    pub draft: SchemaDraft,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    tracing::info!(
        schema = %args.schema.display(),
        document = %args.document.display(),
        draft = %args.draft,
        "validating document"
    );

    let messages = JsonSchemaValidator::new()
        .with_draft(args.draft)
        .validate_files(&args.schema, &args.document)
        .with_context(|| format!("failed to validate {}", args.document.display()))?;

    if messages.is_empty() {
        println!("{}: valid", args.document.display());
        return Ok(0);
    }

    for m in &messages {
        tracing::debug!(schema_path = %m.schema_path, "{}", m.message);
        println!("{m}");
    }
    println!(
        "{}: {} validation message(s)",
        args.document.display(),
        messages.len()
    );
    Ok(1)
}
