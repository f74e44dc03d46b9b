//! Image-to-text renderers for ANSI terminals.
//!
//! # Overview
//!
//! `glyphcast-render` converts raster images into [`Frame`]s of colored
//! text. Four renderers share one options struct and one sizing rule:
//!
//! *   **ASCII** ([`render_ascii`]): resamples each cell into a 6-D coverage
//!     vector and picks the nearest glyph from a shape atlas.
//! *   **Braille** ([`render_braille`]): binarizes a 2×4 dot grid per cell
//!     with Otsu thresholding and Atkinson diffusion, then matches the 8-D
//!     dot sample against all 256 braille patterns.
//! *   **Half-block** ([`render_blocks`]): paints two pixels per cell with
//!     `▀` and paired foreground/background colors.
//! *   **Matrix** ([`MatrixRenderer`]): digital-rain overlay modulated by
//!     the source's brightness field.
//!
//! [`render`] dispatches on a [`RenderMode`] tag. Rendering is total on
//! validated options: a zero-sized source yields an empty frame, never an
//! error.
//!
//! # Example
//!
//! ```
//! use glyphcast_render::{render, RenderMode, RenderOptions};
//! use image::RgbaImage;
//!
//! let img = RgbaImage::from_pixel(64, 64, image::Rgba([255, 255, 255, 255]));
//! let mut opts = RenderOptions::default();
//! opts.max_width = 20;
//! opts.max_height = 10;
//! opts.use_color = false;
//!
//! let frame = render(&img, RenderMode::Ascii, &opts).unwrap();
//! assert!(frame.width() <= 20 && frame.height() <= 10);
//! ```

#![deny(missing_docs)]

mod animate;
mod ascii;
mod braille;
mod builder;
mod charset;
mod dither;
mod error;
mod halfblock;
mod hash;
mod matrix;
mod mode;
mod options;
mod sizing;
mod source;
mod stability;

pub use animate::{AnimationRenderer, FrameSource};
pub use ascii::{render_ascii, AsciiOptions};
pub use braille::{render_braille, BrailleOptions};
pub use charset::Charset;
pub use dither::{atkinson_dither, otsu_threshold};
pub use error::{RenderError, Result};
pub use halfblock::{render_blocks, BlockOptions};
pub use hash::FrameHash;
pub use matrix::{MatrixColor, MatrixOptions, MatrixRenderer};
pub use mode::{render, RenderMode};
pub use options::RenderOptions;
pub use sizing::Sizing;
pub use stability::stabilize_colors;

pub use glyphcast_frame::{Cell, Frame};

pub mod prelude {
    //! Convenience re-exports.
    pub use crate::{
        render, render_ascii, render_blocks, render_braille, stabilize_colors,
        AnimationRenderer, Charset, Frame, FrameHash, FrameSource, MatrixColor, MatrixRenderer,
        RenderMode, RenderOptions,
    };
}
