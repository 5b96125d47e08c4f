//! Math delimiter normalization
//!
//! Rewrites LaTeX-style math delimiters into the dollar convention used by
//! every exporter and by the preview engine:
//!
//! - `\[ ... \]` becomes a `$$` display block on its own lines
//! - `\( ... \)` becomes `$ ... $`
//! - a bare `\begin{env} ... \end{env}` standing on its own lines is wrapped
//!   in a `$$` display block, unless a `$$` already sits directly around it
//!
//! Normalizing an already normalized document changes nothing.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Math environments that get wrapped in display math when found bare.
pub const MATH_ENVIRONMENTS: [&str; 7] = [
    "equation", "align", "aligned", "gather", "matrix", "bmatrix", "pmatrix",
];

static DISPLAY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").expect("valid display math regex"));

static INLINE_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\((.*?)\\\)").expect("valid inline math regex"));

/// One `\begin{env}...\end{env}` matcher per environment, in wrapping order.
static ENVIRONMENT_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MATH_ENVIRONMENTS
        .iter()
        .map(|env| {
            Regex::new(&format!(r"(?s)\\begin\{{{env}\}}.*?\\end\{{{env}\}}"))
                .expect("valid environment regex")
        })
        .collect()
});

/// Normalize math delimiters to the dollar convention.
///
/// # Example
///
/// ```ignore
/// assert_eq!(normalize(r"\(a+b\)"), "$a+b$");
/// assert_eq!(normalize(r"\[x^2\]"), "\n$$\nx^2\n$$\n");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = DISPLAY_BRACKETS.replace_all(text, |caps: &Captures| {
        format!("\n$$\n{}\n$$\n", &caps[1])
    });
    let text = INLINE_PARENS.replace_all(&text, |caps: &Captures| format!("${}$", &caps[1]));

    ENVIRONMENT_BLOCKS
        .iter()
        .fold(text.into_owned(), |text, block| wrap_environment(&text, block))
}

/// Wrap every own-line match of `block` that is not already next to `$$`.
fn wrap_environment(text: &str, block: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in block.find_iter(text) {
        let Some(lead) = leading_boundary(&text[..m.start()]) else {
            continue;
        };
        let Some(trail) = trailing_boundary(&text[m.end()..]) else {
            continue;
        };

        // The newline before this block may already have been consumed as
        // the trailing boundary of the previous one.
        let cut = (m.start() - lead).max(last);
        out.push_str(&text[last..cut]);
        out.push_str("\n$$\n");
        out.push_str(m.as_str());
        out.push_str("\n$$\n");
        last = m.end() + trail;
    }

    out.push_str(&text[last..]);
    out
}

/// Length of the line break that opens the block (`0` at the start of the
/// text), or `None` when the block does not start a line or follows `$$`.
fn leading_boundary(before: &str) -> Option<usize> {
    if before.is_empty() {
        return Some(0);
    }
    let rest = before.strip_suffix('\n')?;
    if rest.ends_with("$$") {
        None
    } else {
        Some(1)
    }
}

/// Length of the line break that closes the block (`0` at the end of the
/// text), or `None` when the block does not end a line or precedes `$$`.
fn trailing_boundary(after: &str) -> Option<usize> {
    if after.is_empty() {
        return Some(0);
    }
    let rest = after.strip_prefix('\n')?;
    if rest.starts_with("$$") {
        None
    } else {
        Some(1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Bracket and parenthesis delimiters
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_display_brackets() {
        assert_eq!(normalize(r"\[x^2\]"), "\n$$\nx^2\n$$\n");
    }

    #[test]
    fn test_display_brackets_multiline() {
        let out = normalize("before \\[\na + b\n\\] after");
        assert_eq!(out, "before \n$$\n\na + b\n\n$$\n after");
    }

    #[test]
    fn test_inline_parens() {
        assert_eq!(normalize(r"\(a+b\)"), "$a+b$");
        assert_eq!(normalize(r"let \(x\) and \(y\)"), "let $x$ and $y$");
    }

    #[test]
    fn test_shortest_match() {
        assert_eq!(normalize(r"\[a\] and \[b\]"), "\n$$\na\n$$\n and \n$$\nb\n$$\n");
    }

    #[test]
    fn test_unmatched_delimiters_untouched() {
        assert_eq!(normalize(r"a stray \[ here"), r"a stray \[ here");
        assert_eq!(normalize(r"and \( there"), r"and \( there");
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "# Title\n\nSome *text* with $x$ and $$y$$.";
        assert_eq!(normalize(text), text);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Math environments
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bare_environment_wrapped() {
        let text = "Intro\n\\begin{equation}E=mc^2\\end{equation}\nOutro";
        assert_eq!(
            normalize(text),
            "Intro\n$$\n\\begin{equation}E=mc^2\\end{equation}\n$$\nOutro"
        );
    }

    #[test]
    fn test_environment_at_text_boundaries() {
        let text = "\\begin{align}a &= b\\end{align}";
        assert_eq!(
            normalize(text),
            "\n$$\n\\begin{align}a &= b\\end{align}\n$$\n"
        );
    }

    #[test]
    fn test_already_wrapped_environment_unchanged() {
        let text = "\n$$\n\\begin{equation}E=mc^2\\end{equation}\n$$\n";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_one_sided_dollars_block_wrapping() {
        let text = "$$\n\\begin{gather}x\\end{gather}\nmore";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_inline_environment_not_wrapped() {
        let text = "see \\begin{matrix}a\\end{matrix} inline";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_aligned_not_confused_with_align() {
        let text = "x\n\\begin{aligned}a\\end{aligned}\ny";
        let out = normalize(text);
        assert_eq!(out.matches("$$").count(), 2);
        assert!(out.contains("$$\n\\begin{aligned}a\\end{aligned}\n$$"));
    }

    #[test]
    fn test_adjacent_environments() {
        let text = "\\begin{equation}a\\end{equation}\n\\begin{equation}b\\end{equation}";
        let out = normalize(text);
        assert_eq!(out.matches("\\begin{equation}").count(), 2);
        assert_eq!(out.matches("$$").count(), 4);
    }

    #[test]
    fn test_rejected_block_is_skipped_as_unit() {
        // The first block already sits in `$$`; the scan must not stretch
        // it to the second block's `\end`.
        let text = "$$\n\\begin{pmatrix}1\\end{pmatrix}\n$$\ntext\n\\begin{pmatrix}2\\end{pmatrix}\n";
        let out = normalize(text);
        assert!(out.starts_with("$$\n\\begin{pmatrix}1\\end{pmatrix}\n$$\ntext"));
        assert!(out.ends_with("text\n$$\n\\begin{pmatrix}2\\end{pmatrix}\n$$\n"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Idempotence
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            r"\[x^2\]",
            r"\(a+b\)",
            "a\n\\begin{equation}E=mc^2\\end{equation}\nb",
            "\\begin{align}x\\end{align}",
            "\n$$\n\\begin{align}x\\end{align}\n$$\n",
            "\\begin{equation}\n\\begin{aligned}\na\n\\end{aligned}\n\\end{equation}",
            r"mixed \(a\) and \[b\] and $c$ and $$d$$",
            r"stray \[ open",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
