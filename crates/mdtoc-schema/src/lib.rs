//! # mdtoc-schema — JSON Schema Validation Boundary
//!
//! A narrow interface over an external JSON Schema engine:
//!
//! - [`DocumentValidator::validate`] — `validate(schema, document) -> set of
//!   messages`; an empty set means the document is valid.
//! - [`JsonSchemaValidator`] — the implementation on the `jsonschema` crate,
//!   with a selectable [`SchemaDraft`] and local-only `$ref` resolution.
//! - [`load_document`] / [`load_schema`] — JSON or YAML files into
//!   `serde_json::Value`.
//!
//! ## Crate Policy
//!
//! - Validation semantics belong to the engine. This crate wires inputs and
//!   passes messages through unchanged.
//! - Schemas are never fetched over the network.

pub mod validate;

pub use validate::{
    load_document, load_schema, parse_yaml, DocumentValidator, JsonSchemaValidator, SchemaDraft,
    SchemaValidationError, ValidationMessage, ValidationMessages,
};
