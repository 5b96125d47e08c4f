//! Configuration module for texmark
//!
//! This module handles the conversion settings, including serialization
//! to/from JSON and persistent storage in the platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
