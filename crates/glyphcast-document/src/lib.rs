//! Persisted frame archives.
//!
//! # Overview
//!
//! `glyphcast-document` stores rendered frame sequences on disk and loads
//! them back for replay without re-rendering. Two encodings share one
//! in-memory type:
//!
//! *   **Standard form:** a single JSON object — schema tags, creation
//!     time, render mode, condensed settings, and the frame list.
//! *   **Streaming form:** line-delimited records — one header, one record
//!     per frame, one footer. The writer emits records as frames arrive,
//!     so an interrupted write still yields a parseable file whose footer
//!     (if any) reports `IsComplete: false`.
//!
//! [`Document::read_from`] sniffs the encoding (and transparent gzip) and
//! returns the same [`Document`] either way.
//!
//! # Example
//!
//! ```
//! use glyphcast_document::{Document, DocumentSettings};
//! use glyphcast_frame::{Cell, Frame};
//! use glyphcast_render::RenderMode;
//!
//! let frames = vec![Frame::from_cells(2, 1, vec![Cell::new('h'), Cell::new('i')], 40); 3];
//! let doc = Document::from_frames(
//!     RenderMode::Ascii,
//!     DocumentSettings::default(),
//!     None,
//!     &frames,
//!     true,
//! )
//! .unwrap();
//!
//! let mut buf = Vec::new();
//! doc.write_to(&mut buf).unwrap();
//! let loaded = Document::read_from(&buf[..]).unwrap();
//! assert_eq!(loaded.frame_count(), 3);
//! assert!(loaded.is_animated());
//! assert_eq!(loaded.total_duration_ms(), 120);
//! ```

#![deny(missing_docs)]

mod document;
mod error;
mod stream;

pub use document::{Document, DocumentFrame, DocumentSettings};
pub use error::{DocumentError, Result};
pub use stream::{create_stream, StreamHeader, StreamingWriter};

pub mod prelude {
    //! Convenience re-exports.
    pub use crate::{Document, DocumentFrame, DocumentSettings, StreamHeader, StreamingWriter};
}

/// Root `@context` tag of every glyphcast document.
pub const SCHEMA_CONTEXT: &str = "https://glyphcast.rs/schema/v1";
/// `@type` of the standard single-object form.
pub const DOCUMENT_TYPE: &str = "ConsoleImageDocument";
/// `@type` of the streaming header record.
pub const HEADER_TYPE: &str = "ConsoleImageDocumentHeader";
/// `@type` of streaming frame records.
pub const FRAME_TYPE: &str = "Frame";
/// `@type` of the streaming footer record.
pub const FOOTER_TYPE: &str = "ConsoleImageDocumentFooter";
/// Current schema version tag.
pub const SCHEMA_VERSION: &str = "1.0";
