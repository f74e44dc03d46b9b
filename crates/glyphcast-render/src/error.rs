//! Error types for renderer configuration.

use thiserror::Error;

/// Errors that can occur when validating render options.
///
/// Rendering itself is total: every error here is caught before any pixel
/// work starts.
#[derive(Error, Debug)]
pub enum RenderError {
    /// An option holds a value outside its valid range.
    #[error("Invalid option {name}: {reason}")]
    InvalidOption {
        /// The option's field name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The character set resolved to an empty string.
    #[error("Character set is empty")]
    EmptyCharset,
}

/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
