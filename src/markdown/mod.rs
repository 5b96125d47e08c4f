//! Markdown source handling
//!
//! This module holds everything that works on the source document before a
//! target format is chosen:
//!
//! - `delimiters.rs` - rewrites `\[..\]`, `\(..\)` and bare math environments
//!   into the `$$`/`$` convention
//! - `patterns.rs` - regexes shared by the converters and the statistics
//! - `stash.rs` - keeps code and math regions out of the structural rewrites
//! - `preview.rs` - renders the on-screen preview through comrak
//!
//! # Example
//! ```ignore
//! use texmark::markdown::{normalize, render_preview};
//!
//! let normalized = normalize(r"Energy: \(E=mc^2\)");
//! assert_eq!(normalized, "Energy: $E=mc^2$");
//! let html = render_preview(&normalized, &Settings::default());
//! ```

mod delimiters;
pub mod patterns;
mod preview;
pub mod stash;

pub use delimiters::{normalize, MATH_ENVIRONMENTS};
pub use preview::{render_preview, EMPTY_PREVIEW_HINT};
