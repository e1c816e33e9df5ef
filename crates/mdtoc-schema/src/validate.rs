//! # Schema Validation
//!
//! Validates JSON/YAML documents against JSON Schema definitions through the
//! narrow [`DocumentValidator`] interface:
//!
//! ```text
//! validate(schema, document) -> set of messages   (empty set => valid)
//! ```
//!
//! Each [`ValidationMessage`] carries the JSON Pointer of the offending
//! instance location, the schema keyword location that rejected it, and a
//! human-readable description produced by the engine.
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s (`#/$defs/<name>`) are resolved by the jsonschema crate
//! natively. External `$ref`s are resolved only against files in a local
//! base directory, by file name. Nothing is fetched over the network.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jsonschema::{Draft, Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// Error during schema loading or compilation.
///
/// A document that fails validation is not an error: its messages are
/// returned as a [`ValidationMessages`] value.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// Unrecognized draft name.
    #[error("unknown schema draft '{0}' (expected one of: draft4, draft6, draft7, draft2019-09, draft2020-12)")]
    UnknownDraft(String),

    /// IO error reading schema or document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation message with its locations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValidationMessage {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the message.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// The messages produced by one validation. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationMessages {
    messages: Vec<ValidationMessage>,
}

impl ValidationMessages {
    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the document was valid.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns a slice of all messages.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Iterates over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationMessage> {
        self.messages.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationMessage> {
        self.messages
    }
}

impl FromIterator<ValidationMessage> for ValidationMessages {
    fn from_iter<T: IntoIterator<Item = ValidationMessage>>(iter: T) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ValidationMessages {
    type Item = &'a ValidationMessage;
    type IntoIter = std::slice::Iter<'a, ValidationMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for ValidationMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

/// Validates a document against a schema.
///
/// Implementations return the full message set for a compilable schema and
/// an error only when the schema itself cannot be used.
pub trait DocumentValidator {
    /// Validate `document` against `schema`.
    fn validate(
        &self,
        schema: &Value,
        document: &Value,
    ) -> Result<ValidationMessages, SchemaValidationError>;
}

/// JSON Schema draft used to interpret schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchemaDraft {
    /// Draft 4.
    Draft4,
    /// Draft 6.
    Draft6,
    /// Draft 7.
    Draft7,
    /// Draft 2019-09.
    #[default]
    Draft201909,
    /// Draft 2020-12.
    Draft202012,
}

impl SchemaDraft {
    /// Every draft, oldest first.
    pub const ALL: [SchemaDraft; 5] = [
        SchemaDraft::Draft4,
        SchemaDraft::Draft6,
        SchemaDraft::Draft7,
        SchemaDraft::Draft201909,
        SchemaDraft::Draft202012,
    ];

    /// Name accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaDraft::Draft4 => "draft4",
            SchemaDraft::Draft6 => "draft6",
            SchemaDraft::Draft7 => "draft7",
            SchemaDraft::Draft201909 => "draft2019-09",
            SchemaDraft::Draft202012 => "draft2020-12",
        }
    }

    fn to_jsonschema(self) -> Draft {
        match self {
            SchemaDraft::Draft4 => Draft::Draft4,
            SchemaDraft::Draft6 => Draft::Draft6,
            SchemaDraft::Draft7 => Draft::Draft7,
            SchemaDraft::Draft201909 => Draft::Draft201909,
            SchemaDraft::Draft202012 => Draft::Draft202012,
        }
    }
}

impl fmt::Display for SchemaDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaDraft {
    type Err = SchemaValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaDraft::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SchemaValidationError::UnknownDraft(s.to_string()))
    }
}

/// Resolves external `$ref` URIs to schema files in a local directory.
///
/// Only the last path segment of the URI is used, so both
/// `https://host/schemas/a.schema.json` and a relative `a.schema.json`
/// resolve to `<base_dir>/a.schema.json`.
struct LocalSchemaRetriever {
    base_dir: Option<PathBuf>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);

        let base_dir = self
            .base_dir
            .as_ref()
            .ok_or_else(|| format!("no local schema directory to resolve '{uri_str}'"))?;
        let path = base_dir.join(filename);
        if !path.is_file() {
            return Err(format!("'{uri_str}' not found in {}", base_dir.display()).into());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A [`DocumentValidator`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaValidator {
    draft: SchemaDraft,
    base_dir: Option<PathBuf>,
}

impl JsonSchemaValidator {
    /// Validator using draft 2019-09 and no external `$ref` resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `draft` to interpret schemas.
    pub fn with_draft(mut self, draft: SchemaDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Resolve external `$ref`s against files in `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// The draft in effect.
    pub fn draft(&self) -> SchemaDraft {
        self.draft
    }

    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(self.draft.to_jsonschema());
        opts.with_retriever(LocalSchemaRetriever {
            base_dir: self.base_dir.clone(),
        });
        opts
    }

    /// Compile `schema` into a reusable `Validator`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if the schema is
    /// invalid or references a schema that cannot be resolved locally.
    pub fn build_validator(&self, schema: &Value) -> Result<Validator, SchemaValidationError> {
        self.build_options()
            .build(schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                reason: e.to_string(),
            })
    }

    /// Load a schema and a document from disk and validate.
    ///
    /// External `$ref`s resolve against the schema file's directory unless a
    /// base directory was set explicitly.
    pub fn validate_files(
        &self,
        schema_path: &Path,
        document_path: &Path,
    ) -> Result<ValidationMessages, SchemaValidationError> {
        let schema = load_schema(schema_path)?;
        let document = load_document(document_path)?;

        match (&self.base_dir, schema_path.parent()) {
            (None, Some(parent)) => self
                .clone()
                .with_base_dir(parent)
                .validate(&schema, &document),
            _ => self.validate(&schema, &document),
        }
    }
}

impl DocumentValidator for JsonSchemaValidator {
    fn validate(
        &self,
        schema: &Value,
        document: &Value,
    ) -> Result<ValidationMessages, SchemaValidationError> {
        let validator = self.build_validator(schema)?;

        Ok(validator
            .iter_errors(document)
            .map(|e| ValidationMessage {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect())
    }
}

/// Load a schema file as JSON.
pub fn load_schema(path: &Path) -> Result<Value, SchemaValidationError> {
    let schema_name = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::SchemaLoadError {
            schema_name: schema_name.clone(),
            reason: format!("cannot read file: {e}"),
        }
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaValidationError::SchemaLoadError {
        schema_name,
        reason: format!("invalid JSON: {e}"),
    })
}

/// Load a JSON or YAML document from a file path.
///
/// `.yaml` and `.yml` files are parsed as YAML and converted to JSON; any
/// other extension is parsed as JSON.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => parse_yaml(&content).map_err(|reason| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason,
            }
        }),
        _ => serde_json::from_str(&content).map_err(|e| SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Parse YAML text into a JSON value.
pub fn parse_yaml(content: &str) -> Result<Value, String> {
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
    yaml_to_json_value(&yaml_value).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped; only the JSON-compatible subset of YAML is supported.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
