//! # Table of Contents
//!
//! Builds TOC entries from the heading lines of a Markdown document.
//!
//! Each heading yields one [`TocEntry`] in source order. The display text
//! and the anchor are two independent transforms over the same heading
//! text: the display text may escape `_` as `\_` so renderers do not read
//! it as emphasis, while the anchor is always computed from the raw text.
//!
//! Entries render as:
//!
//! ```text
//! <indent>- [<display text>](#<anchor>)
//! ```
//!
//! where the indent is two spaces per level. Levels are never renumbered,
//! so a document that jumps from `#` to `###` produces a four-space indent
//! on the second entry.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TocError;
use crate::heading::{parse_line, LineKind};
use crate::slug::{slugify, SlugPolicy};

/// Spaces of indentation per heading level.
pub const INDENT_WIDTH: usize = 2;

/// Options controlling a TOC pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TocOptions {
    /// Characters removed from anchors.
    pub policy: SlugPolicy,
    /// Escape `_` as `\_` in the display text.
    pub escape_underscores: bool,
    /// Ignore `#` lines inside fenced code blocks.
    pub skip_fenced_code: bool,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            policy: SlugPolicy::default(),
            escape_underscores: true,
            skip_fenced_code: false,
        }
    }
}

/// One rendered TOC line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Indentation level (marker count minus one).
    pub level: usize,
    /// Heading text as written in the document.
    pub text: String,
    /// Text shown in the link.
    pub display_text: String,
    /// Anchor fragment, without the leading `#`.
    pub anchor: String,
}

impl fmt::Display for TocEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}- [{}](#{})",
            indent(self.level),
            self.display_text,
            self.anchor
        )
    }
}

/// A heading line that was skipped because no space follows its markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedHeading {
    /// 1-based line number in the document.
    pub line_number: usize,
    /// The line as read.
    pub line: String,
}

/// Result of one TOC pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toc {
    /// Entries in source order.
    pub entries: Vec<TocEntry>,
    /// Heading lines that were skipped.
    pub malformed: Vec<MalformedHeading>,
}

impl Toc {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the document had no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write entries to `out`, one per line, in source order.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), TocError> {
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render all entries into a single string, newline terminated.
    pub fn render(&self) -> String {
        self.entries.iter().map(|e| format!("{e}\n")).collect()
    }
}

/// Indentation for `level`: two spaces per level, empty at level 0.
pub fn indent(level: usize) -> String {
    " ".repeat(level * INDENT_WIDTH)
}

/// Display text for a heading, escaped per `options`.
pub fn display_text(text: &str, options: &TocOptions) -> String {
    if options.escape_underscores {
        text.replace('_', "\\_")
    } else {
        text.to_string()
    }
}

/// Builds a [`Toc`] from document text.
#[derive(Debug, Clone, Default)]
pub struct TocBuilder {
    options: TocOptions,
}

impl TocBuilder {
    /// Builder with the given options.
    pub fn new(options: TocOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &TocOptions {
        &self.options
    }

    /// Build the TOC for a whole document held in memory.
    pub fn build(&self, document: &str) -> Toc {
        self.build_lines(document.lines())
    }

    /// Build the TOC from an ordered sequence of lines.
    pub fn build_lines<'a, I>(&self, lines: I) -> Toc
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut toc = Toc::default();
        let mut fence = FenceTracker::default();

        for (idx, line) in lines.into_iter().enumerate() {
            if self.options.skip_fenced_code && fence.in_code(line) {
                continue;
            }
            match parse_line(line) {
                LineKind::NotHeading => {}
                LineKind::Malformed => toc.malformed.push(MalformedHeading {
                    line_number: idx + 1,
                    line: line.to_string(),
                }),
                LineKind::Heading(heading) => {
                    let anchor = slugify(&heading.text, self.options.policy);
                    toc.entries.push(TocEntry {
                        level: heading.level,
                        display_text: display_text(&heading.text, &self.options),
                        anchor,
                        text: heading.text,
                    });
                }
            }
        }

        toc
    }

    /// Read the document at `path` in full and build its TOC.
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Toc, TocError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.build(&content))
    }
}

/// Tracks whether the current line is inside a fenced code block.
#[derive(Debug, Default)]
struct FenceTracker {
    /// Fence character and run length of the open fence.
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Returns true when `line` is a fence line or lies inside a fence.
    fn in_code(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let fence = ['`', '~'].into_iter().find_map(|ch| {
            let run = trimmed.chars().take_while(|c| *c == ch).count();
            (run >= 3).then_some((ch, run))
        });

        match (self.open, fence) {
            (None, Some(opened)) => {
                self.open = Some(opened);
                true
            }
            (Some((ch, len)), Some((close_ch, close_len)))
                if ch == close_ch
                    && close_len >= len
                    && trimmed[close_len..].trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Lines that never start with `#`.
    fn body_line() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ._;-]{0,40}".prop_filter("not a heading", |s| !s.starts_with('#'))
    }

    proptest! {
        /// `n` markers give level `n - 1` and `2 * (n - 1)` spaces of indent.
        #[test]
        fn level_and_indent_follow_marker_count(n in 1usize..12, text in "[a-zA-Z0-9 ]{0,30}") {
            let line = format!("{} {}", "#".repeat(n), text);
            let toc = TocBuilder::default().build_lines([line.as_str()]);
            prop_assert_eq!(toc.len(), 1);
            let entry = &toc.entries[0];
            prop_assert_eq!(entry.level, n - 1);
            let rendered = entry.to_string();
            let leading = rendered.len() - rendered.trim_start_matches(' ').len();
            prop_assert_eq!(leading, 2 * (n - 1));
        }

        /// Documents without heading lines produce no entries.
        #[test]
        fn no_heading_lines_no_entries(lines in prop::collection::vec(body_line(), 0..20)) {
            let doc = lines.join("\n");
            prop_assert!(TocBuilder::default().build(&doc).is_empty());
        }

        /// Entry count equals heading count, in source order.
        #[test]
        fn entries_preserve_heading_order(
            headings in prop::collection::vec((1usize..7, "[a-z]{1,12}"), 0..16),
            filler in body_line(),
        ) {
            let mut lines = Vec::new();
            for (n, text) in &headings {
                lines.push(filler.clone());
                lines.push(format!("{} {}", "#".repeat(*n), text));
            }
            let doc = lines.join("\n");
            let toc = TocBuilder::default().build(&doc);
            prop_assert_eq!(toc.len(), headings.len());
            for (entry, (n, text)) in toc.entries.iter().zip(&headings) {
                prop_assert_eq!(entry.level, n - 1);
                prop_assert_eq!(&entry.text, text);
            }
        }
    }
}
