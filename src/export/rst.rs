//! reStructuredText export

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::markdown::patterns::{BLOCK_MATH, FENCED_CODE, IMAGE, INLINE_CODE, LINK};
use crate::markdown::stash::Stash;

/// Section adornment characters, by heading level.
const ADORNMENTS: [char; 5] = ['=', '-', '~', '^', '"'];

/// Transition line replacing markdown horizontal rules.
const TRANSITION_WIDTH: usize = 40;

static RST_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,5}) (.+)$").expect("valid rst heading regex"));

/// Horizontal rule of dashes or asterisks.
static RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:-{3,}|\*{3,})[ \t]*$").expect("valid rst rule regex")
});

/// Convert markdown to reStructuredText.
///
/// Bold and italic markers are shared by both syntaxes and pass through.
/// Rules are rewritten before headings get their underlines, and images
/// before links, since each later pattern would also match the earlier one.
/// Headings are rendered last so the adornment matches the finished title.
pub fn to_rst(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut stash = Stash::new();
    let text = stash.lift_block(text, &FENCED_CODE, |caps| {
        render_code_block(&caps[1], &caps[2])
    });
    let text = stash.lift(&text, &INLINE_CODE, |caps| format!("``{}``", &caps[1]));
    let text = stash.lift_block(&text, &BLOCK_MATH, |caps| render_math_block(&caps[1]));
    let text = stash.lift_inline_math(&text, |body| format!(":math:`{}`", body));

    let transition = "-".repeat(TRANSITION_WIDTH);
    let text = RULE.replace_all(&text, transition.as_str());
    let text = IMAGE.replace_all(&text, ".. image:: ${2}\n   :alt: ${1}");
    let text = LINK.replace_all(&text, "`${1} <${2}>`_");
    let text = stash.restore(&text);

    RST_HEADING
        .replace_all(&text, |caps: &Captures| {
            render_heading(caps[1].len(), caps[2].trim())
        })
        .into_owned()
}

fn render_heading(level: usize, title: &str) -> String {
    let adornment = ADORNMENTS[(level - 1).min(ADORNMENTS.len() - 1)];
    let line: String = std::iter::repeat(adornment)
        .take(title.chars().count())
        .collect();

    if level == 1 {
        format!("{}\n{}\n{}", line, title, line)
    } else {
        format!("{}\n{}", title, line)
    }
}

fn render_code_block(language: &str, body: &str) -> String {
    let directive = if language.is_empty() {
        "::".to_string()
    } else {
        format!(".. code-block:: {}", language)
    };
    format!("{}\n\n{}", directive, indent(body))
}

fn render_math_block(latex: &str) -> String {
    format!(".. math::\n\n{}", indent(latex.trim()))
}

/// Indent every non-blank line by four spaces.
fn indent(body: &str) -> String {
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("    {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Headings and rules
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert_eq!(to_rst(""), "");
    }

    #[test]
    fn test_level_one_heading_has_overline() {
        assert_eq!(to_rst("# Title"), "=====\nTitle\n=====");
    }

    #[test]
    fn test_lower_levels_underline_only() {
        assert_eq!(to_rst("## Sub"), "Sub\n---");
        assert_eq!(to_rst("### Deeper"), "Deeper\n~~~~~~");
        assert_eq!(to_rst("#### Four"), "Four\n^^^^");
        assert_eq!(to_rst("##### Five"), "Five\n\"\"\"\"");
    }

    #[test]
    fn test_six_hashes_untouched() {
        assert_eq!(to_rst("###### Six"), "###### Six");
    }

    #[test]
    fn test_underline_counts_characters_not_bytes() {
        assert_eq!(to_rst("## Café"), "Café\n----");
    }

    #[test]
    fn test_underline_matches_rendered_title() {
        assert_eq!(to_rst("## Use `x` here"), "Use ``x`` here\n--------------");
        assert_eq!(to_rst("## Area $r$"), "Area :math:`r`\n--------------");
        let title = "See `docs <d.html>`_";
        let line = "=".repeat(title.chars().count());
        assert_eq!(
            to_rst("# See [docs](d.html)"),
            format!("{}\n{}\n{}", line, title, line)
        );
    }

    #[test]
    fn test_rules_become_transitions() {
        let transition = "-".repeat(40);
        assert_eq!(to_rst("---"), transition);
        assert_eq!(to_rst("*****"), transition);
    }

    #[test]
    fn test_heading_underline_not_taken_for_rule() {
        assert_eq!(to_rst("## Abc\ntext"), "Abc\n---\ntext");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline markup
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_inline_code_doubles_backticks() {
        assert_eq!(to_rst("run `cargo`"), "run ``cargo``");
    }

    #[test]
    fn test_inline_code_shields_link_syntax() {
        assert_eq!(to_rst("`[a](b)`"), "``[a](b)``");
    }

    #[test]
    fn test_links() {
        assert_eq!(
            to_rst("see [docs](https://x.org)"),
            "see `docs <https://x.org>`_"
        );
    }

    #[test]
    fn test_images_before_links() {
        assert_eq!(
            to_rst("![chart](c.png)"),
            ".. image:: c.png\n   :alt: chart"
        );
    }

    #[test]
    fn test_emphasis_passes_through() {
        assert_eq!(to_rst("**b** and *i*"), "**b** and *i*");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Code and math
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            to_rst("```python\nx = 1\n\ny = `z`\n```"),
            ".. code-block:: python\n\n    x = 1\n\n    y = `z`"
        );
    }

    #[test]
    fn test_untagged_code_block() {
        assert_eq!(to_rst("```\n# not a heading\n```"), "::\n\n    # not a heading");
    }

    #[test]
    fn test_math() {
        assert_eq!(to_rst("$$\nx^2\n$$"), ".. math::\n\n    x^2");
        assert_eq!(to_rst("let $a$ be"), "let :math:`a` be");
    }
}
