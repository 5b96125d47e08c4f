//! Plain text export
//!
//! Strips markup and keeps the readable content: heading markers, emphasis
//! markers, code fences and math delimiters are removed, links and images
//! collapse to their visible text.

use regex::Regex;
use std::sync::LazyLock;

use crate::markdown::patterns::{
    replace_inline_math, BLOCK_MATH, BOLD, BOLD_ITALIC, FENCE_LINE, HTML_TAG, IMAGE, INLINE_CODE,
    ITALIC, LINK,
};

/// Leading heading marker, including the whitespace after it.
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid heading marker regex"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank run regex"));

/// Convert markdown to plain text.
pub fn to_plain_text(text: &str) -> String {
    let text = HEADING_MARKER.replace_all(text, "");
    let text = BOLD_ITALIC.replace_all(&text, "${1}");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = INLINE_CODE.replace_all(&text, "${1}");
    let text = FENCE_LINE.replace_all(&text, "");
    let text = BLOCK_MATH.replace_all(&text, "${1}");
    let text = replace_inline_math(&text, str::to_string);
    let text = HTML_TAG.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "${1}");
    let text = LINK.replace_all(&text, "${1}");
    let text = BLANK_RUN.replace_all(&text, "\n\n");

    text.trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
