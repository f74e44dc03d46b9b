//! Error types for playback.

use thiserror::Error;

/// Errors that can occur during playback.
///
/// Cancellation is not an error — it reports through
/// [`PlayOutcome`](crate::PlayOutcome).
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Writing to the terminal failed. Terminal state has already been
    /// restored when this surfaces.
    #[error("Terminal I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for playback operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
