//! Document Export Module for texmark
//!
//! This module converts a document into every supported target format and
//! copies the rich HTML rendering to the clipboard.
//!
//! # Supported Export Formats
//!
//! - **HTML**: Standalone document (and clipboard-safe fragment) with math as images
//! - **Plain Text**: All markup stripped
//! - **Markdown**: The normalized source
//! - **reStructuredText**: Sections, directives and roles
//! - **LaTeX**: Complete `article` document
//!
//! # Architecture
//!
//! - `options.rs` - Export formats and conversion results
//! - `html.rs` - HTML fragment and document generation
//! - `plain_text.rs`, `rst.rs`, `latex.rs` - The other converters
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod html;
pub mod latex;
pub mod options;
pub mod plain_text;
pub mod rst;

pub use clipboard::{copy_html_to_clipboard, copy_text_to_clipboard, ClipboardError};
pub use html::{
    download_link, generate_html_document, math_image_url, to_html_fragment,
    to_html_fragment_with,
};
pub use latex::{to_latex_document, LATEX_POSTAMBLE, LATEX_PREAMBLE};
pub use options::{ConversionResult, ExportFormat, UnknownFormat};
pub use plain_text::to_plain_text;
pub use rst::to_rst;

use log::debug;

use crate::config::Settings;
use crate::markdown::normalize;

/// Markdown export: the text is already markdown and is returned unchanged.
pub fn to_markdown(text: &str) -> String {
    text.to_string()
}

/// Convert a source document to `format`.
///
/// The delimiter normalizer runs first when `auto_fix_delimiters` is set.
/// HTML output is a complete document titled `document_title`.
pub fn convert(source: &str, format: ExportFormat, settings: &Settings) -> ConversionResult {
    let normalized = if settings.auto_fix_delimiters {
        normalize(source)
    } else {
        source.to_string()
    };

    let content = match format {
        ExportFormat::Html => {
            generate_html_document(&normalized, &settings.document_title, &settings.math)
        }
        ExportFormat::PlainText => to_plain_text(&normalized),
        ExportFormat::Markdown => to_markdown(&normalized),
        ExportFormat::Rst => to_rst(&normalized),
        ExportFormat::Latex => to_latex_document(&normalized),
    };

    debug!(
        "Converted {} bytes to {} ({} bytes)",
        source.len(),
        format.label(),
        content.len()
    );

    ConversionResult::new(content, format)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(auto_fix: bool) -> Settings {
        Settings {
            auto_fix_delimiters: auto_fix,
            ..Settings::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cross-format properties
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_across_converters() {
        assert_eq!(to_html_fragment(""), "");
        assert_eq!(to_plain_text(""), "");
        assert_eq!(to_markdown(""), "");
        assert_eq!(to_rst(""), "");
        assert_eq!(
            to_latex_document(""),
            format!("{}{}", LATEX_PREAMBLE, LATEX_POSTAMBLE)
        );
    }

    #[test]
    fn test_title_heading_across_formats() {
        assert_eq!(to_html_fragment("# Title"), "<h1>Title</h1>");
        assert_eq!(to_rst("# Title"), "=====\nTitle\n=====");
        assert!(to_latex_document("# Title").contains("\\section{Title}"));
        assert_eq!(to_plain_text("# Title"), "Title");
    }

    #[test]
    fn test_markdown_passthrough_is_identity() {
        let text = "# Doc\n\n\\(x\\) and *y*\n";
        assert_eq!(to_markdown(text), text);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion facade
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_convert_normalizes_when_enabled() {
        let result = convert("\\(a+b\\)", ExportFormat::Markdown, &settings(true));
        assert_eq!(result.content, "$a+b$");
        assert_eq!(result.format, ExportFormat::Markdown);
        assert_eq!(result.mime_type(), "text/markdown");
    }

    #[test]
    fn test_convert_leaves_source_when_disabled() {
        let result = convert("\\(a+b\\)", ExportFormat::Markdown, &settings(false));
        assert_eq!(result.content, "\\(a+b\\)");
    }

    #[test]
    fn test_convert_html_is_full_document_with_title() {
        let settings = Settings {
            document_title: "Lecture <1>".to_string(),
            ..Settings::default()
        };
        let result = convert("# Hi\n\n\\[x^2\\]", ExportFormat::Html, &settings);
        assert!(result.content.starts_with("<!DOCTYPE html>"));
        assert!(result.content.contains("<title>Lecture &lt;1&gt;</title>"));
        assert!(result.content.contains("<h1>Hi</h1>"));
        assert!(result.content.contains("png.latex?\\dpi{150} x%5E2"));
    }

    #[test]
    fn test_convert_every_format() {
        for format in ExportFormat::all() {
            let result = convert("# T\n\n**b** $m$", *format, &Settings::default());
            assert_eq!(result.format, *format);
            assert!(!result.content.is_empty());
        }
    }

    #[test]
    fn test_convert_plain_text_strips_normalized_math() {
        let result = convert("Area \\(\\pi r^2\\)", ExportFormat::PlainText, &settings(true));
        assert_eq!(result.content, "Area \\pi r^2");
    }
}
