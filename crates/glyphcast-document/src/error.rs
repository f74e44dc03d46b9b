//! Error types for document I/O.

use thiserror::Error;

/// Errors that can occur when reading or writing documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record failed to parse. `line` is set for the streaming form
    /// (1-based); standard-form failures report the whole document.
    #[error("Parse error{}: {source}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        /// 1-based line number for streaming records.
        line: Option<usize>,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The root `@type` tag is not a known document type.
    #[error("Unknown document type {found:?}")]
    SchemaMismatch {
        /// The tag that was found.
        found: String,
    },

    /// A streaming file is missing its header record.
    #[error("Streaming document has no header record")]
    MissingHeader,

    /// A frame's dimensions differ from the document's.
    #[error("Frame is {found_w}x{found_h} cells but the document is {expected_w}x{expected_h}")]
    DimensionMismatch {
        /// Established document width.
        expected_w: u32,
        /// Established document height.
        expected_h: u32,
        /// Offending frame width.
        found_w: u32,
        /// Offending frame height.
        found_h: u32,
    },

    /// The footer claims completeness but frames are missing.
    #[error("Footer reports {expected} complete frames but {found} were read")]
    Truncated {
        /// Frame count from the footer.
        expected: u64,
        /// Frames actually present.
        found: u64,
    },
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
