//! Render mode dispatch.

use std::fmt;
use std::str::FromStr;

use glyphcast_frame::Frame;
use image::RgbaImage;

use crate::ascii::{render_ascii, AsciiOptions};
use crate::braille::{render_braille, BrailleOptions};
use crate::error::{RenderError, Result};
use crate::halfblock::{render_blocks, BlockOptions};
use crate::matrix::{MatrixOptions, MatrixRenderer};
use crate::options::RenderOptions;

/// The renderer arms, as a tagged variant rather than trait objects: each
/// arm is a plain function taking its own options slice by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum RenderMode {
    /// 6-D shape-matched glyphs.
    Ascii,
    /// Half-block 2×1 color pairs.
    Blocks,
    /// Braille 2×4 dot patterns.
    Braille,
    /// Digital-rain overlay.
    Matrix,
}

impl RenderMode {
    /// The canonical mode tag used in documents.
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "Ascii",
            RenderMode::Blocks => "Blocks",
            RenderMode::Braille => "Braille",
            RenderMode::Matrix => "Matrix",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(RenderMode::Ascii),
            "blocks" | "block" | "halfblock" => Ok(RenderMode::Blocks),
            "braille" => Ok(RenderMode::Braille),
            "matrix" => Ok(RenderMode::Matrix),
            other => Err(RenderError::InvalidOption {
                name: "mode",
                reason: format!("unknown render mode {other:?}"),
            }),
        }
    }
}

/// Renders one image with the chosen mode.
///
/// Options are validated once here; the arms themselves are total. Matrix
/// mode renders a single cascade tick — use [`MatrixRenderer`] directly for
/// the synthetic animation.
pub fn render(img: &RgbaImage, mode: RenderMode, opts: &RenderOptions) -> Result<Frame> {
    opts.validate()?;
    log::debug!(
        "rendering {}x{} source as {mode}",
        img.width(),
        img.height()
    );
    let frame = match mode {
        RenderMode::Ascii => render_ascii(img, AsciiOptions::from(opts)),
        RenderMode::Blocks => render_blocks(img, BlockOptions::from(opts)),
        RenderMode::Braille => render_braille(img, BrailleOptions::from(opts)),
        RenderMode::Matrix => MatrixRenderer::new(img, MatrixOptions::from(opts)).tick(),
    };
    Ok(frame)
}
