//! # Toc Subcommand
//!
//! Reads a Markdown document and prints its table of contents, one entry
//! per heading, in source order.
//!
//! ```bash
//! mdtoc toc                          # reads ./README.MD
//! mdtoc toc docs/GUIDE.md --policy semicolon-underscore
//! mdtoc toc --format json --output toc.json
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Deserialize;

use mdtoc_core::{SlugPolicy, Toc, TocBuilder, TocOptions};

use crate::config::{load_config, FileConfig};

/// Document read when no input is given.
pub const DEFAULT_INPUT: &str = "README.MD";

/// How entries are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<indent>- [text](#anchor)` lines.
    #[default]
    Markdown,
    /// Pretty-printed JSON array of entries.
    Json,
}

/// Arguments for the toc subcommand.
#[derive(Args, Debug, Default)]
pub struct TocArgs {
    /// Markdown document to read [default: README.MD].
    pub input: Option<PathBuf>,

    /// Characters removed from anchors: semicolon-underscore, semicolon,
    /// or semicolon-backslash [default: semicolon].
    #[arg(long)]
    pub policy: Option<SlugPolicy>,

    /// Keep underscores unescaped in link text.
    #[arg(long)]
    pub no_escape: bool,

    /// Ignore `#` lines inside fenced code blocks.
    #[arg(long)]
    pub skip_fenced_code: bool,

    /// Output format [default: markdown].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocSettings {
    pub input: PathBuf,
    pub options: TocOptions,
    pub format: OutputFormat,
}

/// Merge flags over config values over defaults.
pub fn resolve_settings(args: &TocArgs, config: &FileConfig) -> TocSettings {
    let defaults = TocOptions::default();
    let options = TocOptions {
        policy: args.policy.or(config.policy).unwrap_or(defaults.policy),
        escape_underscores: !args.no_escape
            && config
                .escape_underscores
                .unwrap_or(defaults.escape_underscores),
        skip_fenced_code: args.skip_fenced_code
            || config.skip_fenced_code.unwrap_or(defaults.skip_fenced_code),
    };

    TocSettings {
        input: args
            .input
            .clone()
            .or_else(|| config.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
        options,
        format: args.format.or(config.format).unwrap_or_default(),
    }
}

/// Execute the toc subcommand.
pub fn run_toc(args: &TocArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let settings = resolve_settings(args, &config);

    tracing::info!(
        input = %settings.input.display(),
        policy = %settings.options.policy,
        escape_underscores = settings.options.escape_underscores,
        "building table of contents"
    );

    let toc = TocBuilder::new(settings.options).from_path(&settings.input)?;

    for m in &toc.malformed {
        tracing::warn!(
            line = m.line_number,
            "skipping heading without a space after its markers: {:?}",
            m.line
        );
    }
    tracing::debug!(entries = toc.len(), "table of contents built");

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output: {}", path.display()))?;
            write_toc(&toc, settings.format, BufWriter::new(file))?;
        }
        None => write_toc(&toc, settings.format, std::io::stdout().lock())?,
    }

    Ok(0)
}

/// Write `toc` to `out` in `format`.
pub fn write_toc<W: Write>(toc: &Toc, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Markdown => toc.write_to(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &toc.entries)?;
            writeln!(out)?;
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_readme(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("README.MD");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_without_flags_or_config() {
        let settings = resolve_settings(&TocArgs::default(), &FileConfig::default());
        assert_eq!(settings.input, PathBuf::from("README.MD"));
        assert_eq!(settings.options, TocOptions::default());
        assert_eq!(settings.format, OutputFormat::Markdown);
    }

    #[test]
    fn config_fills_unset_flags() {
        let config = FileConfig {
            input: Some(PathBuf::from("GUIDE.md")),
            policy: Some(SlugPolicy::SemicolonBackslash),
            escape_underscores: Some(false),
            skip_fenced_code: Some(true),
            format: Some(OutputFormat::Json),
        };
        let settings = resolve_settings(&TocArgs::default(), &config);
        assert_eq!(settings.input, PathBuf::from("GUIDE.md"));
        assert_eq!(settings.options.policy, SlugPolicy::SemicolonBackslash);
        assert!(!settings.options.escape_underscores);
        assert!(settings.options.skip_fenced_code);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn flags_override_config() {
        let config = FileConfig {
            input: Some(PathBuf::from("GUIDE.md")),
            policy: Some(SlugPolicy::SemicolonBackslash),
            format: Some(OutputFormat::Json),
            ..FileConfig::default()
        };
        let args = TocArgs {
            input: Some(PathBuf::from("OTHER.md")),
            policy: Some(SlugPolicy::SemicolonUnderscore),
            no_escape: true,
            format: Some(OutputFormat::Markdown),
            ..TocArgs::default()
        };
        let settings = resolve_settings(&args, &config);
        assert_eq!(settings.input, PathBuf::from("OTHER.md"));
        assert_eq!(settings.options.policy, SlugPolicy::SemicolonUnderscore);
        assert!(!settings.options.escape_underscores);
        assert_eq!(settings.format, OutputFormat::Markdown);
    }

    #[test]
    fn markdown_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_readme(dir.path(), "# Getting Started\ntext\n## Foo_Bar; Baz\n");
        let output = dir.path().join("toc.md");
        let args = TocArgs {
            input: Some(input),
            output: Some(output.clone()),
            ..TocArgs::default()
        };
        assert_eq!(run_toc(&args, None).unwrap(), 0);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "- [Getting Started](#getting-started)\n  - [Foo\\_Bar; Baz](#foo_bar-baz)\n"
        );
    }

    #[test]
    fn json_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_readme(dir.path(), "# A_B\n");
        let output = dir.path().join("toc.json");
        let args = TocArgs {
            input: Some(input),
            format: Some(OutputFormat::Json),
            output: Some(output.clone()),
            ..TocArgs::default()
        };
        run_toc(&args, None).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"level": 0, "text": "A_B", "display_text": "A\\_B", "anchor": "a_b"}
            ])
        );
    }

    #[test]
    fn config_file_applies() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_readme(dir.path(), "# A_B\n");
        let config = dir.path().join("mdtoc.yaml");
        std::fs::write(&config, "policy: semicolon-underscore\nescape_underscores: false\n")
            .unwrap();
        let output = dir.path().join("toc.md");
        let args = TocArgs {
            input: Some(input),
            output: Some(output.clone()),
            ..TocArgs::default()
        };
        run_toc(&args, Some(&config)).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "- [A_B](#ab)\n");
    }

    #[test]
    fn missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = TocArgs {
            input: Some(dir.path().join("README.MD")),
            ..TocArgs::default()
        };
        let err = run_toc(&args, None).unwrap_err();
        assert!(err.to_string().contains("README.MD"));
    }

    #[test]
    fn empty_document_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_readme(dir.path(), "no headings here\n");
        let output = dir.path().join("toc.md");
        let args = TocArgs {
            input: Some(input),
            output: Some(output.clone()),
            ..TocArgs::default()
        };
        assert_eq!(run_toc(&args, None).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }
}
