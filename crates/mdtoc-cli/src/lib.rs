//! # mdtoc-cli — Command-Line Interface
//!
//! Provides the `mdtoc` binary.
//!
//! ## Subcommands
//!
//! - `mdtoc toc` — print the table of contents of a Markdown document.
//! - `mdtoc validate` — validate a JSON/YAML document against a JSON Schema.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; TOC and validation logic live in
//!   `mdtoc-core` and `mdtoc-schema`.
//! - Handlers return an exit code; `main` maps errors to exit code 1.
//! - Logs go to stderr so stdout carries only command output.

pub mod config;
pub mod toc;
pub mod validate;
