//! User settings for texmark
//!
//! This module defines the `Settings` struct holding every recognized
//! conversion option, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

// ─────────────────────────────────────────────────────────────────────────────
// Math Rendering Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Where and how math images are rendered in exported HTML.
///
/// Image URLs have the form `<service_url>/png.latex?\dpi{N} <latex>`; the
/// service is only referenced, never contacted, by the converters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathRenderOptions {
    /// Base URL of the LaTeX-to-PNG rendering service
    pub service_url: String,
    /// Resolution of inline (`$...$`) math images
    pub inline_dpi: u16,
    /// Resolution of display (`$$...$$`) math images
    pub block_dpi: u16,
}

impl Default for MathRenderOptions {
    fn default() -> Self {
        Self {
            service_url: Self::DEFAULT_SERVICE_URL.to_string(),
            inline_dpi: 110,
            block_dpi: 150,
        }
    }
}

impl MathRenderOptions {
    /// Default rendering service.
    pub const DEFAULT_SERVICE_URL: &'static str = "https://latex.codecogs.com";
    /// Minimum image resolution
    pub const MIN_DPI: u16 = 50;
    /// Maximum image resolution
    pub const MAX_DPI: u16 = 600;

    /// Clamp resolutions and tidy the service URL.
    pub fn sanitize(&mut self) {
        self.inline_dpi = self.inline_dpi.clamp(Self::MIN_DPI, Self::MAX_DPI);
        self.block_dpi = self.block_dpi.clamp(Self::MIN_DPI, Self::MAX_DPI);

        // Inline math never renders larger than display math
        if self.inline_dpi > self.block_dpi {
            self.inline_dpi = self.block_dpi;
        }

        let trimmed = self.service_url.trim().trim_end_matches('/');
        self.service_url = if trimmed.is_empty() {
            Self::DEFAULT_SERVICE_URL.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion settings.
///
/// Every component receives these explicitly; nothing is read from ambient
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pass raw HTML through in the preview (turn off for untrusted text)
    pub allow_raw_html: bool,

    /// Rewrite `\[..\]`, `\(..\)` and bare environments before converting
    pub auto_fix_delimiters: bool,

    /// Format produced when none is requested explicitly
    pub export_format: ExportFormat,

    /// Title of exported HTML documents
    pub document_title: String,

    /// Math image rendering for HTML output
    pub math: MathRenderOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_raw_html: true,
            auto_fix_delimiters: true,
            export_format: ExportFormat::default(),
            document_title: Self::DEFAULT_TITLE.to_string(),
            math: MathRenderOptions::default(),
        }
    }
}

impl Settings {
    /// Title used when none is configured.
    pub const DEFAULT_TITLE: &'static str = "Exported Render";

    /// Sanitize settings after loading them from a possibly hand-edited file.
    pub fn sanitize(&mut self) {
        self.math.sanitize();

        let title = self.document_title.trim();
        self.document_title = if title.is_empty() {
            Self::DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
