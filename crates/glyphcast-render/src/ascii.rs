//! The shape-matching ASCII renderer.

use glyphcast_atlas::sampling::{INNER, INNER_COUNT, OUTER, OUTER_FOR_INNER};
use glyphcast_atlas::{shared_atlas, ShapeAtlas};
use glyphcast_color::quantize::{nearest_in_palette, quantize_palette};
use glyphcast_color::Color;
use glyphcast_frame::{Cell, Frame};
use image::RgbaImage;

use crate::builder::FrameBuilder;
use crate::options::RenderOptions;
use crate::sizing::Sizing;
use crate::source::{SourceView, PARALLEL_ROW_THRESHOLD};

/// Disc radius for cell sampling, in normalized cell units.
const DISC_RADIUS: f32 = 0.09;

/// The options slice the ASCII arm consumes.
#[derive(Debug, Clone)]
pub struct AsciiOptions {
    /// Sizing rule for the output grid.
    pub sizing: Sizing,
    /// Resolved character set string.
    pub charset: String,
    /// Gamma applied to source brightness.
    pub gamma: f32,
    /// Contrast exponent on coverage components.
    pub contrast_power: f32,
    /// Dark source pixels become dense glyphs.
    pub invert: bool,
    /// Attach a foreground color to each cell.
    pub use_color: bool,
    /// Optional palette quantization target.
    pub color_count: Option<u32>,
    /// Background suppression threshold for dark terminals.
    pub dark_cutoff: f32,
    /// Background suppression threshold for light terminals.
    pub light_cutoff: f32,
    /// Apply the light cutoff instead of the dark one.
    pub light_background: bool,
    /// Mix outer samples into the coverage vector.
    pub edge_detection: bool,
    /// Directional contrast strength.
    pub edge_strength: f32,
    /// Supersampling factor: pixels per cell axis.
    pub detail: u32,
}

impl From<&RenderOptions> for AsciiOptions {
    fn from(opts: &RenderOptions) -> Self {
        Self {
            sizing: opts.sizing(),
            // Spaces come from the brightness cutoffs, never from shape
            // matching: a cell that survives suppression always gets ink.
            charset: opts.charset.chars().chars().filter(|&c| c != ' ').collect(),
            gamma: opts.gamma,
            contrast_power: opts.contrast_power,
            invert: opts.invert,
            use_color: opts.use_color,
            color_count: opts.color_count,
            dark_cutoff: opts.dark_cutoff,
            light_cutoff: opts.light_cutoff,
            light_background: opts.light_background,
            edge_detection: opts.edge_detection,
            edge_strength: opts.edge_strength,
            detail: opts.detail.max(1),
        }
    }
}

/// Renders an image to a frame of shape-matched glyphs.
///
/// Total on validated options: a zero-dimension source yields an empty
/// frame.
pub fn render_ascii(img: &RgbaImage, opts: AsciiOptions) -> Frame {
    let (cols, rows) = opts.sizing.resolve(img.width(), img.height());
    if cols == 0 || rows == 0 {
        return Frame::empty();
    }

    let ss = opts.detail.max(1);
    let view = SourceView::from_image(img, cols * ss, rows * ss, opts.gamma);
    let atlas = shared_atlas(&opts.charset);

    let mut builder = FrameBuilder::new(cols, rows);
    let parallel = rows * ss > PARALLEL_ROW_THRESHOLD;
    builder.fill_rows(parallel, |y, row| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = render_cell(&view, &atlas, &opts, x as u32, y, ss);
        }
    });

    if opts.use_color {
        if let Some(count) = opts.color_count {
            snap_to_palette(&mut builder, count as usize);
        }
    }

    builder.build(0)
}

fn render_cell(
    view: &SourceView,
    atlas: &ShapeAtlas,
    opts: &AsciiOptions,
    x: u32,
    y: u32,
    ss: u32,
) -> Cell {
    // Background suppression uses raw source brightness, not the inverted
    // matching polarity.
    let mean = view.mean_brightness(x * ss, y * ss, ss, ss);
    let suppressed = if opts.light_background {
        mean > opts.light_cutoff
    } else {
        mean < opts.dark_cutoff
    };
    if suppressed {
        return Cell::blank();
    }

    let polarity = |b: f32| if opts.invert { 1.0 - b } else { b };
    let shape = |b: f32| polarity(b).clamp(0.0, 1.0).powf(opts.contrast_power);

    let mut v = [0.0f32; INNER_COUNT];
    for (i, &(nx, ny)) in INNER.iter().enumerate() {
        v[i] = shape(view.sample_disc(x, y, ss, ss, nx, ny, DISC_RADIUS));
    }

    if opts.edge_detection && opts.edge_strength > 0.0 {
        let s = opts.edge_strength;
        for (i, &outer_idx) in OUTER_FOR_INNER.iter().enumerate() {
            let (nx, ny) = OUTER[outer_idx];
            let e = shape(view.sample_disc(x, y, ss, ss, nx, ny, DISC_RADIUS));
            v[i] = v[i].max(e) * s + v[i] * (1.0 - s);
        }
    }

    let ch = atlas.lookup(&v);
    let mut cell = Cell::new(ch);

    if opts.use_color && ch != ' ' {
        cell = cell.with_fg(cell_color(view, opts, x, y, ss));
    }
    cell
}

/// Mean cell color. With inverted polarity the dark pixels carry the
/// glyph, so the average weights toward them.
fn cell_color(view: &SourceView, opts: &AsciiOptions, x: u32, y: u32, ss: u32) -> Color {
    let x1 = ((x + 1) * ss).min(view.width);
    let y1 = ((y + 1) * ss).min(view.height);
    let mut sum = [0.0f32; 3];
    let mut weight_sum = 0.0f32;
    for py in y * ss..y1 {
        for px in x * ss..x1 {
            let c = view.color_at(px, py);
            let w = if opts.invert { 1.0 - c.luma() + 0.05 } else { 1.0 };
            sum[0] += c.r as f32 * w;
            sum[1] += c.g as f32 * w;
            sum[2] += c.b as f32 * w;
            weight_sum += w;
        }
    }
    if weight_sum == 0.0 {
        return Color::BLACK;
    }
    Color::rgb(
        (sum[0] / weight_sum).round() as u8,
        (sum[1] / weight_sum).round() as u8,
        (sum[2] / weight_sum).round() as u8,
    )
}

fn snap_to_palette(builder: &mut FrameBuilder, count: usize) {
    let colors: Vec<Color> = builder.cells().iter().filter_map(|c| c.fg).collect();
    if colors.is_empty() {
        return;
    }
    let palette = quantize_palette(&colors, count);
    if palette.is_empty() {
        return;
    }
    builder.map_cells(|cell| {
        if let Some(fg) = cell.fg {
            cell.fg = Some(nearest_in_palette(&palette, fg));
        }
    });
}
