//! Clipboard Operations for HTML Export
//!
//! This module provides cross-platform clipboard functionality for copying
//! the rich HTML fragment to the system clipboard using the arboard crate.

// - enum_variant_names: Error variants follow standard naming convention
#![allow(clippy::enum_variant_names)]

use arboard::Clipboard;
use log::{debug, info};

use super::html::to_html_fragment_with;
use super::plain_text::to_plain_text;
use crate::config::MathRenderOptions;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Copy the rendered HTML fragment of a normalized document to the clipboard.
///
/// The fragment is offered as HTML so mail clients and word processors
/// paste it formatted; the plain-text conversion is attached as the
/// fallback for targets that only accept text.
///
/// # Example
///
/// ```ignore
/// use texmark::config::MathRenderOptions;
/// use texmark::export::copy_html_to_clipboard;
///
/// copy_html_to_clipboard("# Hello\n\nArea is $\\pi r^2$", &MathRenderOptions::default())?;
/// ```
pub fn copy_html_to_clipboard(
    normalized: &str,
    math: &MathRenderOptions,
) -> Result<(), ClipboardError> {
    let html = to_html_fragment_with(normalized, math);
    let plain_text = to_plain_text(normalized);
    debug!(
        "Copying {} bytes of HTML ({} bytes plain text) to clipboard",
        html.len(),
        plain_text.len()
    );

    copy_html_with_fallback(&html, &plain_text)?;
    info!("Copied rendered HTML to clipboard");
    Ok(())
}

/// Copy plain text to clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::WriteError(e.to_string()))?;

    Ok(())
}

/// Set HTML on the clipboard together with a plain-text alternative.
fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    clipboard
        .set_html(html, Some(plain_text))
        .map_err(|e| ClipboardError::WriteError(e.to_string()))?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
