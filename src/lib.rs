//! # glyphcast
//!
//! ## Images, GIFs and video frames as terminal text
//!
//! `glyphcast` converts raster images into visually faithful text for
//! ANSI-capable terminals: shape-matched ASCII, braille dot patterns,
//! half-block color pairs, or a digital-rain overlay — with a flicker-free
//! animation player and an on-disk document format for replaying rendered
//! sequences without re-rendering.
//!
//! This crate is the facade, re-exporting the focused member crates of the
//! glyphcast workspace.
//!
//! ## Quick Start
//!
//! ```rust
//! use glyphcast::prelude::*;
//! use image::RgbaImage;
//!
//! fn main() {
//!     let img = RgbaImage::from_pixel(64, 64, image::Rgba([255, 140, 0, 255]));
//!
//!     let mut opts = RenderOptions::default();
//!     opts.max_width = 40;
//!     opts.max_height = 20;
//!
//!     let frame = render(&img, RenderMode::Braille, &opts).unwrap();
//!     print!("{}", frame.to_ansi(true));
//! }
//! ```
//!
//! ## Crates
//!
//! -   `color`: RGBA color model, HSL conversion, palette quantization.
//! -   `frame`: the cell-grid frame model and exact ANSI encoding.
//! -   `atlas`: glyph coverage atlases and nearest-pattern lookup.
//! -   `render`: the four renderers, sizing, dithering, frame hashing.
//! -   `player` (feature `player`): flicker-free terminal playback.
//! -   `document` (feature `document`): persisted frame archives.

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
#![deny(missing_docs)]

// Re-export core crates (always available)
pub use glyphcast_atlas as atlas;
pub use glyphcast_color as color;
pub use glyphcast_frame as frame;
pub use glyphcast_render as render;

// Optional feature-gated crates
#[cfg(feature = "document")]
pub use glyphcast_document as document;

#[cfg(feature = "player")]
pub use glyphcast_player as player;

/// Common imports for typical use.
pub mod prelude {
    pub use glyphcast_color::Color;
    pub use glyphcast_frame::{Cell, Frame};
    pub use glyphcast_render::prelude::*;

    #[cfg(feature = "document")]
    pub use glyphcast_document::prelude::*;

    #[cfg(feature = "player")]
    pub use glyphcast_player::prelude::*;
}

#[cfg(all(feature = "player", feature = "document"))]
mod playback {
    use glyphcast_document::Document;
    use glyphcast_player::{PlayOutcome, Player, PlayerOptions, PrerenderedFrame, Result};
    use std::io::Write;

    /// Plays a loaded document's stored frames with their stored timing.
    ///
    /// The document's speed and loop settings seed the player options;
    /// callers can override both via `opts`.
    pub fn play_document<W: Write>(
        out: W,
        doc: &Document,
        opts: Option<PlayerOptions>,
    ) -> Result<PlayOutcome> {
        let opts = opts.unwrap_or_else(|| PlayerOptions {
            speed: doc.settings.speed,
            loop_count: doc.settings.loop_count,
            use_color: doc.settings.use_color,
            ..PlayerOptions::default()
        });
        let frames: Vec<PrerenderedFrame> = doc
            .frames
            .iter()
            .map(|f| PrerenderedFrame {
                content: f.content.clone(),
                delay_ms: f.delay_ms,
            })
            .collect();
        let mut player = Player::new(out, opts);
        player.play_prerendered(&frames)
    }
}

#[cfg(all(feature = "player", feature = "document"))]
pub use playback::play_document;

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(all(feature = "player", feature = "document"))]
    fn document_playback_replays_stored_content() {
        use glyphcast_document::{Document, DocumentSettings};
        use glyphcast_frame::{Cell, Frame};
        use glyphcast_player::{PlayerOptions, SyncMode};
        use glyphcast_render::RenderMode;

        let frames = vec![Frame::from_cells(2, 1, vec![Cell::new('o'), Cell::new('k')], 1)];
        let doc = Document::from_frames(
            RenderMode::Ascii,
            DocumentSettings::default(),
            None,
            &frames,
            false,
        )
        .unwrap();

        let mut out = Vec::new();
        let opts = PlayerOptions {
            loop_count: 1,
            alt_screen: false,
            hide_cursor: false,
            interactive: false,
            sync: SyncMode::Never,
            ..PlayerOptions::default()
        };
        crate::play_document(&mut out, &doc, Some(opts)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ok"));
    }
}
