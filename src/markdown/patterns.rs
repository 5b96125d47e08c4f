//! Shared markup patterns
//!
//! Regexes used by more than one converter (and by the statistics) are
//! compiled once here. The `regex` crate has no lookaround, so inline math
//! is found by scanning for lone `$` signs instead of with a pattern.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Block-Level Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// ATX heading: 1-6 `#` followed by a space. Group 1 is the marker run,
/// group 2 the title.
pub static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").expect("valid heading regex"));

/// Fenced code block. Group 1 is the (possibly empty) language tag,
/// group 2 the body including its final newline.
pub static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```[ \t]*([\w+#.-]*)[ \t]*\n(.*?)^```[ \t]*$")
        .expect("valid fenced code regex")
});

/// A fence marker line on its own (opening or closing).
pub static FENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```[ \t]*[\w+#.-]*[ \t]*$\n?").expect("valid fence line regex")
});

/// Horizontal rule made of dashes.
pub static DASH_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^-{3,}[ \t]*$").expect("valid rule regex"));

/// Block quote line. Group 1 is the quoted text.
pub static QUOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^> (.*)$").expect("valid quote regex"));

/// Unordered list item using a dash marker. Group 1 is the item text.
pub static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (.*)$").expect("valid list item regex"));

// ─────────────────────────────────────────────────────────────────────────────
// Inline Patterns
// ─────────────────────────────────────────────────────────────────────────────

pub static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid bold italic regex"));
pub static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
pub static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic regex"));

/// Inline code span on a single line. Group 1 is the code.
pub static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid inline code regex"));

/// Image `![alt](url)`. Group 1 is the alt text, group 2 the URL.
pub static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").expect("valid image regex"));

/// Link `[text](url)`. Group 1 is the text, group 2 the URL.
pub static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("valid link regex"));

/// Any HTML tag.
pub static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

// ─────────────────────────────────────────────────────────────────────────────
// Math Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Display math `$$...$$`, possibly spanning lines. Group 1 is the body.
pub static BLOCK_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("valid block math regex"));

/// Check that the byte at `index` is a `$` with no `$` on either side.
fn is_lone_dollar(bytes: &[u8], index: usize) -> bool {
    bytes[index] == b'$'
        && (index == 0 || bytes[index - 1] != b'$')
        && bytes.get(index + 1) != Some(&b'$')
}

/// Byte ranges of all inline math spans, dollars included.
///
/// A span opens at a lone `$` and closes at the next `$` on the same line,
/// which must be lone as well. Dollars belonging to a `$$` never open or
/// close a span, and a failed opener never consumes a later lone `$`.
fn inline_math_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        if !is_lone_dollar(bytes, index) {
            index += 1;
            continue;
        }
        let close = bytes[index + 1..]
            .iter()
            .position(|&b| b == b'$' || b == b'\n')
            .map(|offset| index + 1 + offset);
        match close {
            Some(end) if is_lone_dollar(bytes, end) => {
                spans.push(index..end + 1);
                index = end + 1;
            }
            _ => index += 1,
        }
    }

    spans
}

/// Replace every inline math span with the output of `render`, which
/// receives the math body without its dollars.
pub fn replace_inline_math(text: &str, mut render: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for span in inline_math_spans(text) {
        out.push_str(&text[last..span.start]);
        out.push_str(&render(&text[span.start + 1..span.end - 1]));
        last = span.end;
    }

    out.push_str(&text[last..]);
    out
}

/// Count inline math spans (single dollars, never part of `$$`).
pub fn count_inline_math(text: &str) -> usize {
    inline_math_spans(text).len()
}

// ─────────────────────────────────────────────────────────────────────────────
// Table Rows
// ─────────────────────────────────────────────────────────────────────────────

/// Dash segments with optional alignment colons, separated by pipes.
static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\|?(?:\s*:?-+:?\s*\|)*\s*:?-+:?\s*\|?\s*$").expect("valid separator regex")
});

/// Check whether a line is a table separator row (`---|:---:`, `|---|`).
///
/// At least one pipe is required, so a bare `---` stays a horizontal rule.
pub fn is_table_separator(line: &str) -> bool {
    line.contains('|') && TABLE_SEPARATOR.is_match(line)
}

/// Check whether a line is a table row carrying cells (separator excluded).
///
/// Either the row splits into two or more cells, or it is a single cell
/// closed by pipes on both sides (`| A |`).
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    let enclosed = trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|');
    !is_table_separator(line) && (enclosed || split_table_cells(line).len() >= 2)
}

/// Split a pipe row into trimmed cells, ignoring the optional outer pipes.
pub fn split_table_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(str::trim).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
