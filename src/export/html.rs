//! HTML Export Generation
//!
//! This module turns normalized markdown into HTML without a markdown
//! engine: an ordered list of substitutions produces a self-contained
//! fragment (inline styles, math as remote images) that survives being
//! pasted into mail clients and word processors. The same fragment is the
//! body of the standalone HTML document export.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::options::ConversionResult;
use crate::config::MathRenderOptions;
use crate::markdown::patterns::{
    is_table_separator, split_table_cells, BOLD, BOLD_ITALIC, BLOCK_MATH, DASH_RULE,
    FENCED_CODE, HEADING, INLINE_CODE, ITALIC, LIST_ITEM, QUOTE_LINE,
};
use crate::markdown::stash::{starts_with_block_placeholder, Stash};

// ─────────────────────────────────────────────────────────────────────────────
// Inline Styles
// ─────────────────────────────────────────────────────────────────────────────

const INLINE_CODE_STYLE: &str =
    "background-color: #f4f4f4; padding: 2px 4px; border-radius: 3px; font-family: monospace;";
const CODE_BLOCK_STYLE: &str = "background-color: #f4f4f4; padding: 12px; border-radius: 5px; \
     overflow-x: auto; font-family: monospace; white-space: pre;";
const BLOCKQUOTE_STYLE: &str =
    "border-left: 4px solid #ccc; margin: 0.5em 0; padding: 0 1em; color: #555;";
const BLOCK_MATH_STYLE: &str = "text-align: center; margin: 1em 0;";
const RUN_IN_MATH_STYLE: &str = "display: block; text-align: center; margin: 1em 0;";
const INLINE_MATH_STYLE: &str = "vertical-align: middle;";
const TABLE_STYLE: &str = "border-collapse: collapse; width: 100%; margin: 1em 0;";
const HEADER_ROW_STYLE: &str = "background-color: #f2f2f2; text-align: left;";
const EVEN_ROW_STYLE: &str = "background-color: #ffffff;";
const ODD_ROW_STYLE: &str = "background-color: #f9f9f9;";

// ─────────────────────────────────────────────────────────────────────────────
// Fragment Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert normalized markdown to an HTML fragment using the default math
/// rendering service.
pub fn to_html_fragment(normalized: &str) -> String {
    to_html_fragment_with(normalized, &MathRenderOptions::default())
}

/// Convert normalized markdown to an HTML fragment.
///
/// Code and math regions are rendered first and held in a [`Stash`] so the
/// heading, emphasis and block rules never see their contents. The
/// remaining rules run in a fixed order: headings, emphasis, block quotes,
/// rules, list items, paragraphs, tables.
pub fn to_html_fragment_with(normalized: &str, math: &MathRenderOptions) -> String {
    if normalized.is_empty() {
        return String::new();
    }

    let mut stash = Stash::new();
    let text = stash.lift_block(normalized, &FENCED_CODE, |caps| {
        render_code_block(&caps[1], &caps[2])
    });
    let text = stash.lift(&text, &INLINE_CODE, |caps| render_inline_code(&caps[1]));
    let text = BLOCK_MATH
        .replace_all(&text, |caps: &Captures| {
            if caps.get(0).is_some_and(|m| stands_alone(&text, m.range())) {
                stash.push_block(render_block_math(&caps[1], math))
            } else {
                stash.push(render_run_in_math(&caps[1], math))
            }
        })
        .into_owned();
    let text = stash.lift_inline_math(&text, |body| render_inline_math(body, math));

    let text = HEADING.replace_all(&text, |caps: &Captures| {
        let level = caps[1].len();
        format!("<h{}>{}</h{}>", level, caps[2].trim(), level)
    });
    let text = BOLD_ITALIC.replace_all(&text, "<strong><em>${1}</em></strong>");
    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");

    let quote = format!("<blockquote style=\"{}\">${{1}}</blockquote>", BLOCKQUOTE_STYLE);
    let text = QUOTE_LINE.replace_all(&text, quote.as_str());
    let text = DASH_RULE.replace_all(&text, "<hr>");
    let text = LIST_ITEM.replace_all(&text, "<li>${1}</li>");

    let text = wrap_list_runs(&text);
    let text = wrap_paragraphs(&text);
    let text = convert_tables(&text);

    stash.restore(&text)
}

/// Check whether `range` covers whole lines of `text`.
fn stands_alone(text: &str, range: std::ops::Range<usize>) -> bool {
    let before = &text[..range.start];
    let after = &text[range.end..];
    (before.is_empty() || before.ends_with('\n')) && (after.is_empty() || after.starts_with('\n'))
}

/// Wrap each run of consecutive `<li>` lines in a single `<ul>`.
fn wrap_list_runs(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n') {
        let is_item = line.starts_with("<li>");
        if is_item && !in_list {
            out.push("<ul>");
        } else if !is_item && in_list {
            out.push("</ul>");
        }
        in_list = is_item;
        out.push(line);
    }
    if in_list {
        out.push("</ul>");
    }

    out.join("\n")
}

/// A line opening with a block-level tag (or an HTML comment).
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^<(?:!--|/?(?:address|article|aside|blockquote|details|div|dl|dd|dt|figure|footer|form|h[1-6]|header|hr|li|nav|ol|p|pre|section|summary|table|tbody|td|tfoot|th|thead|tr|ul)\b)",
    )
    .expect("valid block tag regex")
});

/// Wrap non-empty lines that do not already start with a block-level tag
/// in `<p>`.
fn wrap_paragraphs(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.is_empty()
                || BLOCK_TAG.is_match(trimmed)
                || starts_with_block_placeholder(trimmed)
            {
                line.to_string()
            } else {
                format!("<p>{}</p>", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Table being assembled from consecutive pipe rows.
struct TableBuilder {
    html: String,
    rows: usize,
}

impl TableBuilder {
    fn new(header: &str) -> Self {
        let mut html = format!("<table style=\"{}\">\n<thead>\n", TABLE_STYLE);
        html.push_str(&render_row(header, "th", HEADER_ROW_STYLE));
        html.push_str("</thead>\n<tbody>\n");
        Self { html, rows: 0 }
    }

    fn push_row(&mut self, line: &str) {
        let style = if self.rows % 2 == 0 {
            EVEN_ROW_STYLE
        } else {
            ODD_ROW_STYLE
        };
        self.html.push_str(&render_row(line, "td", style));
        self.rows += 1;
    }

    fn finish(mut self) -> String {
        self.html.push_str("</tbody>\n</table>");
        self.html
    }
}

fn render_row(line: &str, cell_tag: &str, style: &str) -> String {
    let cells: String = split_table_cells(line)
        .into_iter()
        .map(|cell| format!("<{tag}>{}</{tag}>", cell, tag = cell_tag))
        .collect();
    format!("<tr style=\"{}\">{}</tr>\n", style, cells)
}

/// Strip the paragraph wrapper the paragraph rule put around a table line.
fn unwrap_paragraph(line: &str) -> &str {
    line.strip_prefix("<p>")
        .and_then(|inner| inner.strip_suffix("</p>"))
        .unwrap_or(line)
}

/// Replace pipe tables with `<table>` markup.
///
/// A line containing `|` followed by a separator row opens a table; every
/// following line that contains `|` is a body row, and the first line
/// without one closes the table.
fn convert_tables(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut table: Option<TableBuilder> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = unwrap_paragraph(lines[i]);

        if let Some(current) = table.as_mut() {
            if line.contains('|') {
                current.push_row(line);
                i += 1;
                continue;
            }
        }
        if let Some(finished) = table.take() {
            out.push(finished.finish());
        }

        let opens_table = line.contains('|')
            && lines
                .get(i + 1)
                .is_some_and(|next| is_table_separator(unwrap_paragraph(next)));
        if opens_table {
            table = Some(TableBuilder::new(line));
            i += 2;
            continue;
        }

        out.push(lines[i].to_string());
        i += 1;
    }

    if let Some(finished) = table {
        out.push(finished.finish());
    }

    out.join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Literal Region Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_inline_code(code: &str) -> String {
    format!(
        "<code style=\"{}\">{}</code>",
        INLINE_CODE_STYLE,
        html_escape(code)
    )
}

fn render_code_block(language: &str, body: &str) -> String {
    let body = body.strip_suffix('\n').unwrap_or(body);
    let class = if language.is_empty() {
        String::new()
    } else {
        format!(" class=\"language-{}\"", html_escape(language))
    };
    format!(
        "<pre style=\"{}\"><code{}>{}</code></pre>",
        CODE_BLOCK_STYLE,
        class,
        html_escape(body)
    )
}

fn render_block_math(latex: &str, math: &MathRenderOptions) -> String {
    let latex = latex.trim();
    format!(
        "<div style=\"{}\"><img src=\"{}\" alt=\"{}\"></div>",
        BLOCK_MATH_STYLE,
        math_image_url(latex, math.block_dpi, math),
        html_escape(latex)
    )
}

/// Display math written inside a prose line stays phrasing content so the
/// surrounding paragraph remains valid.
fn render_run_in_math(latex: &str, math: &MathRenderOptions) -> String {
    let latex = latex.trim();
    format!(
        "<span style=\"{}\"><img src=\"{}\" alt=\"{}\"></span>",
        RUN_IN_MATH_STYLE,
        math_image_url(latex, math.block_dpi, math),
        html_escape(latex)
    )
}

fn render_inline_math(latex: &str, math: &MathRenderOptions) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" style=\"{}\">",
        math_image_url(latex, math.inline_dpi, math),
        html_escape(latex),
        INLINE_MATH_STYLE
    )
}

/// Build the rendering-service URL for a LaTeX expression.
///
/// The URL is only constructed here; fetching it is up to whatever displays
/// the HTML.
pub fn math_image_url(latex: &str, dpi: u16, math: &MathRenderOptions) -> String {
    format!(
        "{}/png.latex?\\dpi{{{}}} {}",
        math.service_url,
        dpi,
        urlencoding::encode(latex)
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from normalized markdown.
///
/// # Arguments
///
/// * `normalized` - The normalized markdown source
/// * `title` - Document title
/// * `math` - Math image rendering options
pub fn generate_html_document(normalized: &str, title: &str, math: &MathRenderOptions) -> String {
    let body = to_html_fragment_with(normalized, math);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="texmark">
    <title>{title}</title>
    <style>
{base_css}
    </style>
</head>
<body>
    <article class="markdown-body">
{body}
    </article>
</body>
</html>
"#,
        title = html_escape(title),
        base_css = BASE_CSS,
        body = body,
    )
}

/// Build a self-contained download anchor carrying the artifact as a
/// base64 data URI.
pub fn download_link(result: &ConversionResult) -> String {
    let payload = BASE64_STANDARD.encode(result.content.as_bytes());
    format!(
        "<a href=\"data:{mime};base64,{payload}\" download=\"{file}\" style=\"{style}\">Download as {label}</a>",
        mime = result.mime_type(),
        payload = payload,
        file = result.file_name("rendered_document"),
        style = DOWNLOAD_LINK_STYLE,
        label = result.format.label(),
    )
}

const DOWNLOAD_LINK_STYLE: &str = "text-decoration: none; padding: 10px 15px; \
     background-color: #4CAF50; color: white; border-radius: 5px; font-weight: bold;";

/// Base CSS for exported documents (layout, typography).
const BASE_CSS: &str = r#"
body {
    margin: 0;
    padding: 0;
    font-family: Arial, Helvetica, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: #24292f;
}

.markdown-body {
    max-width: 900px;
    margin: 0 auto;
    padding: 20px;
}

.markdown-body h1,
.markdown-body h2 {
    border-bottom: 1px solid #ddd;
    padding-bottom: 0.3em;
}

.markdown-body table {
    border-collapse: collapse;
    width: 100%;
    margin: 20px 0;
}

.markdown-body th,
.markdown-body td {
    border: 1px solid #ddd;
    padding: 8px;
}

.markdown-body pre {
    overflow-x: auto;
}

.markdown-body img {
    max-width: 100%;
}
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
