//! Export formats and conversion results
//!
//! This module defines the target formats, their MIME types and file
//! extensions, and the result type every conversion returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Export Format
// ─────────────────────────────────────────────────────────────────────────────

/// Supported export formats for documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML document with math rendered as images
    #[default]
    Html,
    /// Plain text with all markup stripped
    #[serde(rename = "text")]
    PlainText,
    /// The (normalized) Markdown source itself
    Markdown,
    /// reStructuredText
    Rst,
    /// Complete LaTeX document
    Latex,
}

impl ExportFormat {
    /// Get the display label for this format.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Html => "HTML",
            ExportFormat::PlainText => "Plain Text",
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Rst => "reStructuredText",
            ExportFormat::Latex => "LaTeX",
        }
    }

    /// Get the MIME type of documents in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html",
            ExportFormat::PlainText => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Rst => "text/x-rst",
            ExportFormat::Latex => "application/x-tex",
        }
    }

    /// Get the default file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::PlainText => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Rst => "rst",
            ExportFormat::Latex => "tex",
        }
    }

    /// Name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::PlainText => "text",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Rst => "rst",
            ExportFormat::Latex => "latex",
        }
    }

    /// Get all available export formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Html,
            ExportFormat::PlainText,
            ExportFormat::Markdown,
            ExportFormat::Rst,
            ExportFormat::Latex,
        ]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = ExportFormat::all().iter().map(|f| f.name()).collect();
        write!(
            f,
            "unknown format '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    /// Accepts format names and file extensions, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExportFormat::all()
            .iter()
            .copied()
            .find(|format| format.name() == wanted || format.extension() == wanted)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion Result
// ─────────────────────────────────────────────────────────────────────────────

/// A converted document together with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// The converted text
    pub content: String,
    /// The format of `content`
    pub format: ExportFormat,
}

impl ConversionResult {
    pub fn new(content: String, format: ExportFormat) -> Self {
        Self { content, format }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Suggested file name for saving, e.g. `notes.tex`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
