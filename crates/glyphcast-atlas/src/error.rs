//! Error types for atlas construction.

use thiserror::Error;

/// Errors that can occur when building glyph atlases or loading fonts.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// The character set resolved to zero usable glyphs.
    #[error("Character set contains no glyphs the font can rasterize")]
    EmptyCharacterSet,

    /// Failed to load or parse a TrueType font.
    #[error("Failed to load TrueType font: {0}")]
    FontError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
