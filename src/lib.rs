//! texmark
//!
//! Converts Markdown documents with embedded LaTeX math and HTML into a
//! rendered preview, standalone or clipboard-ready HTML, plain text,
//! reStructuredText and LaTeX.
//!
//! Every conversion is a pure function of the source text and the
//! [`Settings`](config::Settings) passed in. The delimiter normalizer runs
//! first so the converters only ever see `$`/`$$` math.
//!
//! ```ignore
//! use texmark::config::Settings;
//! use texmark::export::{convert, ExportFormat};
//!
//! let result = convert("# Notes\n\n\\(e^{i\\pi}\\)", ExportFormat::Latex, &Settings::default());
//! std::fs::write(result.file_name("notes"), result.content)?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod markdown;
pub mod stats;

pub use config::Settings;
pub use error::{Error, Result};
pub use export::{convert, ConversionResult, ExportFormat};
pub use markdown::{normalize, render_preview};
pub use stats::DocumentStats;
