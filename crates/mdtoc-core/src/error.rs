//! # Error Types
//!
//! Errors raised by the TOC pipeline. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Malformed heading lines are not errors: the builder skips them and
//! reports them through [`Toc::malformed`](crate::toc::Toc::malformed).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for TOC generation.
#[derive(Error, Debug)]
pub enum TocError {
    /// The input document could not be opened or read.
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing rendered entries to the output failed.
    #[error("cannot write table of contents: {0}")]
    Write(#[from] std::io::Error),
}

/// A slug policy name that does not match any known policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "unknown slug policy '{0}' (expected one of: semicolon-underscore, semicolon, semicolon-backslash)"
)]
pub struct UnknownPolicy(pub String);
