//! # Configuration File
//!
//! Optional YAML or JSON file passed with `--config`. The file is validated
//! against `schemas/mdtoc-config.schema.json` before it is deserialized, so
//! every problem is reported with its location instead of failing on the
//! first unknown key.
//!
//! Precedence: command-line flags, then the config file, then defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use mdtoc_core::SlugPolicy;
use mdtoc_schema::{load_document, DocumentValidator, JsonSchemaValidator};

use crate::toc::OutputFormat;

/// Bundled schema for the configuration file.
pub const CONFIG_SCHEMA: &str = include_str!("../../../schemas/mdtoc-config.schema.json");

/// Settings read from a configuration file. Unset keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Markdown document to read.
    pub input: Option<PathBuf>,
    /// Anchor removal policy.
    pub policy: Option<SlugPolicy>,
    /// Escape `_` in link text.
    pub escape_underscores: Option<bool>,
    /// Ignore headings inside fenced code.
    pub skip_fenced_code: Option<bool>,
    /// Output format.
    pub format: Option<OutputFormat>,
}

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let document = load_document(path)
        .with_context(|| format!("failed to load config: {}", path.display()))?;
    config_from_value(document)
        .with_context(|| format!("invalid config: {}", path.display()))
}

/// Validate a parsed configuration document and deserialize it.
pub fn config_from_value(document: Value) -> Result<FileConfig> {
    let schema: Value =
        serde_json::from_str(CONFIG_SCHEMA).context("bundled config schema is not valid JSON")?;

    let messages = JsonSchemaValidator::new().validate(&schema, &document)?;
    if !messages.is_empty() {
        for m in &messages {
            tracing::error!(path = %m.instance_path, "{}", m.message);
        }
        bail!("{} schema violation(s):\n{messages}", messages.len());
    }

    tracing::debug!("config passed schema validation");
    Ok(serde_json::from_value(document)?)
}
