//! # mdtoc-core — Markdown Table of Contents
//!
//! Turns the heading lines of a Markdown document into a nested list of
//! links, one per heading, in source order:
//!
//! ```text
//! # Getting Started        ->  - [Getting Started](#getting-started)
//! ## Foo_Bar; Baz          ->    - [Foo\_Bar; Baz](#foo_bar-baz)
//! ```
//!
//! ## Modules
//!
//! - [`slug`] — heading text to anchor fragment, under an explicit
//!   [`SlugPolicy`].
//! - [`heading`] — classifies a line as heading, malformed heading, or
//!   plain text.
//! - [`toc`] — assembles [`TocEntry`] values and renders them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mdtoc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Anchors are never deduplicated.

pub mod error;
pub mod heading;
pub mod slug;
pub mod toc;

// Re-export primary types for ergonomic imports.
pub use error::{TocError, UnknownPolicy};
pub use heading::{parse_line, Heading, LineKind};
pub use slug::{slugify, SlugPolicy};
pub use toc::{indent, MalformedHeading, Toc, TocBuilder, TocEntry, TocOptions};
