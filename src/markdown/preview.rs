//! On-screen preview rendering using comrak
//!
//! The preview goes through a real CommonMark + GFM engine rather than the
//! export converters: the delimiter normalizer runs first (when enabled) so
//! that comrak's dollar-math extension sees every formula, and raw HTML is
//! only passed through when the settings allow it.

use comrak::{markdown_to_html, Options};

use super::delimiters::normalize;
use crate::config::Settings;

/// Shown instead of an empty preview.
pub const EMPTY_PREVIEW_HINT: &str = "<p><em>Render preview will appear here...</em></p>\n";

/// Render the source document to preview HTML.
///
/// # Arguments
///
/// * `source` - The raw document text
/// * `settings` - Provides `auto_fix_delimiters` and `allow_raw_html`
pub fn render_preview(source: &str, settings: &Settings) -> String {
    if source.trim().is_empty() {
        return EMPTY_PREVIEW_HINT.to_string();
    }

    let text = if settings.auto_fix_delimiters {
        normalize(source)
    } else {
        source.to_string()
    };

    markdown_to_html(&text, &preview_options(settings.allow_raw_html))
}

/// Build comrak options for the preview.
fn preview_options(allow_raw_html: bool) -> Options {
    let mut options = Options::default();

    // Enable common extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.math_dollars = true;

    // Raw HTML is dropped unless explicitly allowed
    options.render.unsafe_ = allow_raw_html;

    options
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
