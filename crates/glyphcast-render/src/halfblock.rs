//! The half-block 2×1 color renderer.

use glyphcast_color::Color;
use glyphcast_frame::{Cell, Frame};
use image::RgbaImage;

use crate::builder::FrameBuilder;
use crate::options::RenderOptions;
use crate::sizing::Sizing;
use crate::source::{SourceView, PARALLEL_ROW_THRESHOLD};

/// Upper half block: foreground paints the top pixel, background the bottom.
const UPPER_HALF: char = '▀';

/// The options slice the half-block arm consumes.
#[derive(Debug, Clone)]
pub struct BlockOptions {
    /// Sizing rule for the output grid.
    pub sizing: Sizing,
    /// Gamma applied to source brightness.
    pub gamma: f32,
}

impl From<&RenderOptions> for BlockOptions {
    fn from(opts: &RenderOptions) -> Self {
        Self {
            sizing: opts.sizing(),
            gamma: opts.gamma,
        }
    }
}

/// Renders an image as `▀` cells with paired foreground/background colors.
///
/// Each cell covers two vertically adjacent pixels. No thresholding, no
/// shape matching — the renderer paints pixel pairs directly. Transparent
/// top pixels degrade to a space with background only; transparent bottom
/// pixels drop the background escape.
pub fn render_blocks(img: &RgbaImage, opts: BlockOptions) -> Frame {
    let (cols, rows) = opts.sizing.resolve(img.width(), img.height());
    if cols == 0 || rows == 0 {
        return Frame::empty();
    }

    let view = SourceView::from_image(img, cols, rows * 2, opts.gamma);

    let mut builder = FrameBuilder::new(cols, rows);
    let parallel = rows * 2 > PARALLEL_ROW_THRESHOLD;
    builder.fill_rows(parallel, |y, row| {
        for (x, cell) in row.iter_mut().enumerate() {
            let top = view.color_at(x as u32, y * 2);
            let bottom = view.color_at(x as u32, y * 2 + 1);
            *cell = pair_cell(top, bottom);
        }
    });

    builder.build(0)
}

fn pair_cell(top: Color, bottom: Color) -> Cell {
    match (top.is_transparent(), bottom.is_transparent()) {
        (true, true) => Cell::blank(),
        (true, false) => Cell::new(' ').with_bg(bottom),
        (false, true) => Cell::new(UPPER_HALF).with_fg(top),
        (false, false) => Cell::new(UPPER_HALF).with_fg(top).with_bg(bottom),
    }
}
