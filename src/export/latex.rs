//! LaTeX document export
//!
//! Produces a complete `article` document. Math is already LaTeX and passes
//! through verbatim; everything else is mapped construct by construct. Literal
//! text is not escaped, so a stray `%`, `&`, `_`, `#` or `$` outside a
//! recognized construct reaches the output as is.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::markdown::patterns::{
    BLOCK_MATH, BOLD, BOLD_ITALIC, DASH_RULE, FENCED_CODE, IMAGE, INLINE_CODE, ITALIC, LINK,
};
use crate::markdown::stash::Stash;

/// Everything up to and including `\begin{document}`.
pub const LATEX_PREAMBLE: &str = r"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath}
\usepackage{amssymb}
\usepackage{graphicx}
\usepackage{hyperref}
\usepackage{listings}
\usepackage{booktabs}
\usepackage[margin=1in]{geometry}

\lstset{
    basicstyle=\ttfamily\small,
    breaklines=true,
    frame=single
}

\begin{document}
";

pub const LATEX_POSTAMBLE: &str = r"
\end{document}
";

const SECTION_COMMANDS: [&str; 4] = ["section", "subsection", "subsubsection", "paragraph"];

static LATEX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,4}) (.+)$").expect("valid latex heading regex"));

/// Convert markdown to a complete LaTeX document.
pub fn to_latex_document(text: &str) -> String {
    format!("{}{}{}", LATEX_PREAMBLE, to_latex_body(text), LATEX_POSTAMBLE)
}

fn to_latex_body(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut stash = Stash::new();
    let text = stash.lift_block(text, &FENCED_CODE, |caps| {
        render_listing(&caps[1], &caps[2])
    });
    let text = stash.lift(&text, &INLINE_CODE, |caps| format!("\\texttt{{{}}}", &caps[1]));
    let text = stash.lift_block(&text, &BLOCK_MATH, |caps| caps[0].to_string());
    let text = stash.lift_inline_math(&text, |body| format!("${}$", body));

    let text = LATEX_HEADING.replace_all(&text, |caps: &Captures| {
        let command = SECTION_COMMANDS[caps[1].len() - 1];
        format!("\\{}{{{}}}", command, caps[2].trim())
    });
    let text = BOLD_ITALIC.replace_all(&text, r"\textbf{\textit{${1}}}");
    let text = BOLD.replace_all(&text, r"\textbf{${1}}");
    let text = ITALIC.replace_all(&text, r"\textit{${1}}");
    let text = IMAGE.replace_all(&text, |caps: &Captures| render_figure(&caps[1], &caps[2]));
    let text = LINK.replace_all(&text, r"\href{${2}}{${1}}");
    let text = DASH_RULE.replace_all(&text, r"\hrulefill");
    let text = group_environments(&text);

    stash.restore(&text)
}

fn render_listing(language: &str, body: &str) -> String {
    let options = if language.is_empty() {
        String::new()
    } else {
        format!("[language={}]", language)
    };
    format!(
        "\\begin{{lstlisting}}{}\n{}\\end{{lstlisting}}",
        options, body
    )
}

fn render_figure(alt: &str, url: &str) -> String {
    format!(
        "\\begin{{figure}}[h]\n\\centering\n\\includegraphics[width=\\linewidth]{{{}}}\n\\caption{{{}}}\n\\end{{figure}}",
        url, alt
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Environments
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnvironment {
    Quote,
    Itemize,
}

impl LineEnvironment {
    fn name(self) -> &'static str {
        match self {
            LineEnvironment::Quote => "quote",
            LineEnvironment::Itemize => "itemize",
        }
    }

    /// Classify a line, returning its environment and the rendered content.
    fn classify(line: &str) -> Option<(Self, String)> {
        if let Some(quoted) = line.strip_prefix("> ") {
            Some((LineEnvironment::Quote, quoted.to_string()))
        } else {
            line.strip_prefix("- ")
                .map(|item| (LineEnvironment::Itemize, format!("\\item {}", item)))
        }
    }
}

/// Wrap each run of `> ` lines in one `quote` environment and each run of
/// `- ` items in one `itemize` environment.
fn group_environments(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current: Option<LineEnvironment> = None;

    for line in text.split('\n') {
        let classified = LineEnvironment::classify(line);
        let kind = classified.as_ref().map(|(kind, _)| *kind);

        if kind != current {
            if let Some(open) = current {
                out.push(format!("\\end{{{}}}", open.name()));
            }
            if let Some(next) = kind {
                out.push(format!("\\begin{{{}}}", next.name()));
            }
            current = kind;
        }

        match classified {
            Some((_, content)) => out.push(content),
            None => out.push(line.to_string()),
        }
    }

    if let Some(open) = current {
        out.push(format!("\\end{{{}}}", open.name()));
    }

    out.join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> String {
        let document = to_latex_document(text);
        document
            .strip_prefix(LATEX_PREAMBLE)
            .and_then(|rest| rest.strip_suffix(LATEX_POSTAMBLE))
            .expect("document wraps the body")
            .to_string()
    }

    #[test]
    fn test_empty_input_is_preamble_and_postamble() {
        assert_eq!(
            to_latex_document(""),
            format!("{}{}", LATEX_PREAMBLE, LATEX_POSTAMBLE)
        );
    }

    #[test]
    fn test_preamble_packages() {
        for package in ["amsmath", "amssymb", "graphicx", "hyperref", "listings", "booktabs"] {
            assert!(LATEX_PREAMBLE.contains(&format!("\\usepackage{{{}}}", package)));
        }
        assert!(LATEX_PREAMBLE.contains("\\usepackage[margin=1in]{geometry}"));
        assert!(LATEX_PREAMBLE.ends_with("\\begin{document}\n"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sections and inline markup
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_headings() {
        assert_eq!(body("# Title"), "\\section{Title}");
        assert_eq!(body("## Two"), "\\subsection{Two}");
        assert_eq!(body("### Three"), "\\subsubsection{Three}");
        assert_eq!(body("#### Four"), "\\paragraph{Four}");
        assert_eq!(body("##### Five"), "##### Five");
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            body("***a*** **b** *c*"),
            "\\textbf{\\textit{a}} \\textbf{b} \\textit{c}"
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(body("call `f(*x*)`"), "call \\texttt{f(*x*)}");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(body("[site](https://x.org)"), "\\href{https://x.org}{site}");

        let figure = body("![Plot](plot.png)");
        assert!(figure.starts_with("\\begin{figure}[h]"));
        assert!(figure.contains("\\includegraphics[width=\\linewidth]{plot.png}"));
        assert!(figure.contains("\\caption{Plot}"));
        assert!(!figure.contains("\\href"));
    }

    #[test]
    fn test_rule() {
        assert_eq!(body("a\n---\nb"), "a\n\\hrulefill\nb");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Environments
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_consecutive_quotes_share_environment() {
        assert_eq!(
            body("> one\n> two\ntext"),
            "\\begin{quote}\none\ntwo\n\\end{quote}\ntext"
        );
    }

    #[test]
    fn test_itemize() {
        assert_eq!(
            body("- a\n- b"),
            "\\begin{itemize}\n\\item a\n\\item b\n\\end{itemize}"
        );
    }

    #[test]
    fn test_quote_then_list_switches_environment() {
        assert_eq!(
            body("> q\n- i"),
            "\\begin{quote}\nq\n\\end{quote}\n\\begin{itemize}\n\\item i\n\\end{itemize}"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Code and math
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_listing_with_language() {
        assert_eq!(
            body("```python\n# comment\nx = 1\n```"),
            "\\begin{lstlisting}[language=python]\n# comment\nx = 1\n\\end{lstlisting}"
        );
    }

    #[test]
    fn test_listing_without_language() {
        assert_eq!(
            body("```\n- not an item\n```"),
            "\\begin{lstlisting}\n- not an item\n\\end{lstlisting}"
        );
    }

    #[test]
    fn test_math_passes_through_verbatim() {
        assert_eq!(body("$$\na*b*c\n$$"), "$$\na*b*c\n$$");
        assert_eq!(body("with $x_{*}*y$ here"), "with $x_{*}*y$ here");
    }
}
