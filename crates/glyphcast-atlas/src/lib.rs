//! Glyph coverage atlases and nearest-pattern lookup.
//!
//! # Overview
//!
//! `glyphcast-atlas` turns characters into small feature vectors and feature
//! vectors back into characters:
//!
//! *   **[`ShapeAtlas`]:** For each character of a set, a normalized 6-D
//!     coverage vector sampled from a rasterized glyph, with a K-D tree for
//!     nearest-neighbor lookup and a quantized-key cache for repeated cell
//!     signatures.
//! *   **[`braille`]:** The 256 braille patterns as compile-time 8-D
//!     vectors generated from the Unicode dot bit layout — no font needed —
//!     with a linear-scan matcher and its own cache.
//! *   **[`Font`]:** A small rasterization trait with two implementations —
//!     the built-in 8×8 bitmap font (zero files on disk) and TrueType
//!     loading via `ab_glyph` for custom fonts.
//! *   **[`sampling`]:** The shared sample geometry — 6 staggered internal
//!     disc centers, 10 outer disc centers, and the inner→outer pairing the
//!     ASCII renderer uses for directional contrast.
//!
//! Atlases are process-wide immutable after construction; [`shared_atlas`]
//! memoizes one atlas per character set.
//!
//! # Example
//!
//! ```
//! use glyphcast_atlas::shared_atlas;
//!
//! let atlas = shared_atlas(" .:ox%#@");
//! assert_eq!(atlas.lookup(&[0.0; 6]), ' ');
//! // A saturated cell maps to the densest glyph in the set.
//! let dense = atlas.lookup(&[1.0; 6]);
//! assert_ne!(dense, ' ');
//! ```

#![deny(missing_docs)]

pub mod braille;
mod error;
mod font;
mod font8x8;
mod kdtree;
pub mod sampling;
mod shape;

pub use error::{AtlasError, Result};
pub use font::{BuiltinFont, Font, TrueTypeFont};
pub use shape::{shared_atlas, GlyphShape, ShapeAtlas};

pub mod prelude {
    //! Convenience re-exports.
    pub use crate::braille::{self, BrailleMatcher};
    pub use crate::{shared_atlas, BuiltinFont, Font, ShapeAtlas, TrueTypeFont};
}
