//! # Heading Lines
//!
//! Classifies a single line of a Markdown document. A heading line is a run
//! of one or more `#` characters followed by exactly one separating space;
//! everything after that space is the heading text, verbatim.
//!
//! Lines that start with `#` but have no space after the marker run
//! (`#`, `#tag`, `##foo`) are [`LineKind::Malformed`]. The builder skips
//! them rather than guessing at a level.

use serde::Serialize;

/// Marker character that opens an ATX heading.
pub const HEADING_MARKER: char = '#';

/// A parsed heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Indentation level: marker count minus one. `#` is level 0.
    pub level: usize,
    /// Text after the marker and its single following space.
    pub text: String,
}

/// Classification of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Does not start with `#`.
    NotHeading,
    /// Starts with `#` but the marker run is not followed by a space.
    Malformed,
    /// A well-formed heading.
    Heading(Heading),
}

/// Classify `line`.
pub fn parse_line(line: &str) -> LineKind {
    let markers = line
        .chars()
        .take_while(|c| *c == HEADING_MARKER)
        .count();
    if markers == 0 {
        return LineKind::NotHeading;
    }

    // The marker is ASCII, so `markers` is also a byte offset.
    match line[markers..].strip_prefix(' ') {
        Some(text) => LineKind::Heading(Heading {
            level: markers - 1,
            text: text.to_string(),
        }),
        None => LineKind::Malformed,
    }
}
