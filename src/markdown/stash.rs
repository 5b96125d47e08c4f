//! Literal-region stash
//!
//! Code spans, fenced blocks and math must come out of a conversion exactly
//! as their own rule rendered them, untouched by the emphasis, heading and
//! paragraph rules that run over the rest of the document. A [`Stash`] swaps
//! each such region for an opaque placeholder, keeps the rendered form, and
//! puts it back once the structural passes are done.
//!
//! Placeholders are delimited by private-use code points, so a placeholder
//! line never looks like markup to any of the line-oriented rules. Block
//! regions (fenced code, display math) get a distinct opening code point so
//! paragraph wrapping can leave their lines alone.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::patterns;

/// Opening delimiter of an inline placeholder.
const OPEN: char = '\u{E000}';
/// Opening delimiter of a block placeholder.
const BLOCK_OPEN: char = '\u{E002}';
/// Closing delimiter of both placeholder kinds.
const CLOSE: char = '\u{E001}';

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{E000}\x{E002}](\d+)\x{E001}").expect("valid placeholder regex")
});

/// Rendered literal regions, addressed by placeholder index.
#[derive(Debug, Default)]
pub struct Stash {
    items: Vec<String>,
}

impl Stash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an already rendered inline region and return its placeholder.
    pub fn push(&mut self, rendered: String) -> String {
        self.store(OPEN, rendered)
    }

    /// Store an already rendered block region and return its placeholder.
    pub fn push_block(&mut self, rendered: String) -> String {
        self.store(BLOCK_OPEN, rendered)
    }

    fn store(&mut self, open: char, rendered: String) -> String {
        let index = self.items.len();
        self.items.push(rendered);
        format!("{}{}{}", open, index, CLOSE)
    }

    /// Replace every match of `pattern` with an inline placeholder for `render(caps)`.
    pub fn lift(
        &mut self,
        text: &str,
        pattern: &Regex,
        mut render: impl FnMut(&Captures) -> String,
    ) -> String {
        pattern
            .replace_all(text, |caps: &Captures| {
                let rendered = render(caps);
                self.push(rendered)
            })
            .into_owned()
    }

    /// Replace every match of `pattern` with a block placeholder for `render(caps)`.
    pub fn lift_block(
        &mut self,
        text: &str,
        pattern: &Regex,
        mut render: impl FnMut(&Captures) -> String,
    ) -> String {
        pattern
            .replace_all(text, |caps: &Captures| {
                let rendered = render(caps);
                self.push_block(rendered)
            })
            .into_owned()
    }

    /// Replace every single-dollar math span with a placeholder for `render(body)`.
    pub fn lift_inline_math(
        &mut self,
        text: &str,
        mut render: impl FnMut(&str) -> String,
    ) -> String {
        patterns::replace_inline_math(text, |body| {
            let rendered = render(body);
            self.push(rendered)
        })
    }

    /// Put every stashed region back in place.
    ///
    /// A region lifted after another one may contain the earlier region's
    /// placeholder, so substitution repeats until nothing is left to expand.
    pub fn restore(&self, text: &str) -> String {
        let mut current = text.to_string();

        for _ in 0..=self.items.len() {
            if !current.contains([OPEN, BLOCK_OPEN]) {
                break;
            }
            let expanded = PLACEHOLDER
                .replace_all(&current, |caps: &Captures| {
                    caps[1]
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| self.items.get(index))
                        .cloned()
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned();
            if expanded == current {
                break;
            }
            current = expanded;
        }

        current
    }
}

/// Check whether a line begins with a stashed block region.
pub fn starts_with_block_placeholder(line: &str) -> bool {
    line.starts_with(BLOCK_OPEN)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
