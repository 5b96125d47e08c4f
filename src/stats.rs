//! Document statistics
//!
//! Counts words, characters and lines plus the structural elements the
//! converters care about: headings, fenced code blocks, math regions and
//! table rows.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::markdown::patterns::{count_inline_math, is_table_row};

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s").expect("valid heading line regex"));

// ─────────────────────────────────────────────────────────────────────────────
// DocumentStats
// ─────────────────────────────────────────────────────────────────────────────

/// Statistics for one document.
///
/// Text counts come from the raw source. Math counts come from the
/// normalized document, where every formula is in dollar form.
///
/// # Example
///
/// ```ignore
/// let stats = DocumentStats::compute("# Hi\n\n$x$", "# Hi\n\n$x$");
/// assert_eq!(stats.headers, 1);
/// assert_eq!(stats.inline_math, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Whitespace-separated tokens
    pub words: usize,
    /// Unicode scalar values
    pub chars: usize,
    /// Lines (an empty document has one)
    pub lines: usize,
    /// ATX headings of level 1-6
    pub headers: usize,
    /// Fenced code blocks (pairs of triple backticks)
    pub code_blocks: usize,
    /// Single-dollar math spans
    pub inline_math: usize,
    /// `$$` math regions
    pub block_math: usize,
    /// Pipe table rows, separator rows excluded
    pub table_rows: usize,
}

impl DocumentStats {
    /// Calculate statistics for a raw document and its normalized form.
    pub fn compute(raw: &str, normalized: &str) -> Self {
        Self {
            words: raw.split_whitespace().count(),
            chars: raw.chars().count(),
            lines: raw.matches('\n').count() + 1,
            headers: raw.lines().filter(|line| HEADING_LINE.is_match(line)).count(),
            code_blocks: raw.matches("```").count() / 2,
            inline_math: count_inline_math(normalized),
            block_math: normalized.matches("$$").count() / 2,
            table_rows: raw.lines().filter(|line| is_table_row(line)).count(),
        }
    }

    /// Format the statistics for a single status line.
    ///
    /// Returns a compact string like "150 words | 892 chars | 25 lines | 3 formulas"
    pub fn format_compact(&self) -> String {
        format!(
            "{} words | {} chars | {} lines | {} formulas",
            self.words,
            self.chars,
            self.lines,
            self.inline_math + self.block_math
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
