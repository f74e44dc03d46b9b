//! The braille 2×4 dot renderer.

use glyphcast_atlas::braille::{pattern_char, BrailleMatcher, DOT_BITS, DOT_COUNT};
use glyphcast_atlas::sampling::disc_offsets;
use glyphcast_color::Color;
use glyphcast_frame::{Cell, Frame};
use image::RgbaImage;

use crate::builder::FrameBuilder;
use crate::dither::{atkinson_dither, otsu_threshold};
use crate::options::RenderOptions;
use crate::sizing::Sizing;
use crate::source::{SourceView, PARALLEL_ROW_THRESHOLD};

/// Pixels per cell, horizontally and vertically.
const CELL_PX: (u32, u32) = (2, 4);

/// Sub-pixel disc radius for dot sampling, in pixels.
const DOT_DISC_RADIUS: f32 = 0.45;

/// Saturation boost on the hybrid cell color.
const BOOST_SATURATION: f32 = 1.25;

/// Lightness boost on the hybrid cell color.
const BOOST_LIGHTNESS: f32 = 1.15;

/// The options slice the braille arm consumes.
#[derive(Debug, Clone)]
pub struct BrailleOptions {
    /// Sizing rule for the output grid.
    pub sizing: Sizing,
    /// Gamma applied to source brightness.
    pub gamma: f32,
    /// Dark source pixels become raised dots.
    pub invert: bool,
    /// Attach a foreground color to each cell.
    pub use_color: bool,
}

impl From<&RenderOptions> for BrailleOptions {
    fn from(opts: &RenderOptions) -> Self {
        Self {
            sizing: opts.sizing(),
            gamma: opts.gamma,
            invert: opts.invert,
            use_color: opts.use_color,
        }
    }
}

/// Renders an image to braille cells (U+2800..U+28FF, or spaces).
///
/// Pipeline: grayscale + gamma, Otsu global threshold, Atkinson diffusion,
/// then an 8-D coverage sample per 2×4 block matched against all 256
/// patterns. Cell color averages only the pixels under raised dots and
/// gets a fixed saturation/lightness boost.
pub fn render_braille(img: &RgbaImage, opts: BrailleOptions) -> Frame {
    let (cols, rows) = opts.sizing.resolve(img.width(), img.height());
    if cols == 0 || rows == 0 {
        return Frame::empty();
    }

    let px_w = cols * CELL_PX.0;
    let px_h = rows * CELL_PX.1;
    let view = SourceView::from_image(img, px_w, px_h, opts.gamma);

    // Binarize the (possibly inverted) brightness plane.
    let mut field: Vec<u8> = view
        .brightness
        .iter()
        .map(|&b| {
            let v = if opts.invert { 1.0 - b } else { b };
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect();
    let threshold = otsu_threshold(&field);
    atkinson_dither(&mut field, px_w, px_h, threshold);

    let dots: Vec<f32> = field.iter().map(|&v| v as f32 / 255.0).collect();
    let matcher = BrailleMatcher::shared();

    let mut builder = FrameBuilder::new(cols, rows);
    let parallel = px_h > PARALLEL_ROW_THRESHOLD;
    builder.fill_rows(parallel, |y, row| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = render_block(&view, &dots, matcher, &opts, x as u32, y);
        }
    });

    builder.build(0)
}

fn render_block(
    view: &SourceView,
    dots: &[f32],
    matcher: &BrailleMatcher,
    opts: &BrailleOptions,
    x: u32,
    y: u32,
) -> Cell {
    let base_x = x * CELL_PX.0;
    let base_y = y * CELL_PX.1;

    // Coverage at each dot: 13 sub-pixel samples around the dot center.
    let mut sample = [0.0f32; DOT_COUNT];
    for (i, s) in sample.iter_mut().enumerate() {
        let dx = (i as u32) % 2;
        let dy = (i as u32) / 2;
        let cx = (base_x + dx) as f32 + 0.5;
        let cy = (base_y + dy) as f32 + 0.5;
        let mut sum = 0.0;
        let offsets = disc_offsets(DOT_DISC_RADIUS);
        for (ox, oy) in offsets {
            let px = ((cx + ox).floor() as i64).clamp(0, view.width as i64 - 1);
            let py = ((cy + oy).floor() as i64).clamp(0, view.height as i64 - 1);
            sum += dots[(py as u32 * view.width + px as u32) as usize];
        }
        *s = sum / offsets.len() as f32;
    }

    let bits = matcher.best_pattern(&sample);
    if bits == 0 {
        return Cell::blank();
    }

    let mut cell = Cell::new(pattern_char(bits));
    if opts.use_color {
        cell = cell.with_fg(hybrid_color(view, bits, base_x, base_y));
    }
    cell
}

/// Average of the source pixels whose dot is raised, boosted in HSL.
fn hybrid_color(view: &SourceView, bits: u8, base_x: u32, base_y: u32) -> Color {
    let mut sum = [0u32; 3];
    let mut count = 0u32;
    for (i, &bit) in DOT_BITS.iter().enumerate() {
        if bits & bit == 0 {
            continue;
        }
        let px = (base_x + (i as u32) % 2).min(view.width - 1);
        let py = (base_y + (i as u32) / 2).min(view.height - 1);
        let c = view.color_at(px, py);
        sum[0] += c.r as u32;
        sum[1] += c.g as u32;
        sum[2] += c.b as u32;
        count += 1;
    }
    if count == 0 {
        return Color::BLACK;
    }
    Color::rgb(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
    .boost(BOOST_SATURATION, BOOST_LIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opts(max_w: u32, max_h: u32) -> BrailleOptions {
        let mut o = RenderOptions::default();
        o.max_width = max_w;
        o.max_height = max_h;
        BrailleOptions::from(&o)
    }

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    fn assert_braille_or_space(frame: &Frame) {
        for cell in frame.cells() {
            assert!(
                cell.ch == ' ' || ('\u{2800}'..='\u{28FF}').contains(&cell.ch),
                "unexpected glyph {:?}",
                cell.ch
            );
        }
    }

    #[test]
    fn output_stays_in_the_braille_block() {
        let mut img = RgbaImage::new(64, 64);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let v = ((x * 4 + y * 3) % 256) as u8;
            *p = Rgba([v, v, v, 255]);
        }
        let frame = render_braille(&img, opts(30, 15));
        assert!(frame.width() <= 30 && frame.height() <= 15);
        assert_braille_or_space(&frame);
    }

    #[test]
    fn white_on_dark_fills_every_dot() {
        let frame = render_braille(&solid(40, 40, [255, 255, 255, 255]), opts(10, 5));
        for cell in frame.cells() {
            assert_eq!(cell.ch, '\u{28FF}');
        }
    }

    #[test]
    fn black_source_renders_blank() {
        let frame = render_braille(&solid(40, 40, [0, 0, 0, 255]), opts(10, 5));
        assert!(frame.cells().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn inverted_black_source_emits_only_dark_colors() {
        let mut o = opts(10, 5);
        o.invert = true;
        let frame = render_braille(&solid(20, 20, [0, 0, 0, 255]), o);
        // Dots are fully raised (the inverted field is bright) but keep the
        // source's black color.
        let ansi = frame.to_ansi(true);
        for (r, g, b) in extract_fg_colors(&ansi) {
            assert!(r <= 50 && g <= 50 && b <= 50, "bright color ({r},{g},{b})");
        }
        assert!(frame.cells().iter().any(|c| c.ch == '\u{28FF}'));
    }

    fn extract_fg_colors(ansi: &str) -> Vec<(u8, u8, u8)> {
        let mut out = Vec::new();
        for chunk in ansi.split("\x1b[38;2;").skip(1) {
            let Some(end) = chunk.find('m') else { continue };
            let parts: Vec<u8> = chunk[..end]
                .split(';')
                .filter_map(|p| p.parse().ok())
                .collect();
            if parts.len() == 3 {
                out.push((parts[0], parts[1], parts[2]));
            }
        }
        out
    }

    #[test]
    fn narrow_source_still_produces_a_row() {
        let frame = render_braille(&solid(1, 8, [255, 255, 255, 255]), opts(40, 20));
        assert!(frame.height() >= 1);
        assert!(frame.width() >= 1);
    }

    #[test]
    fn zero_source_is_empty() {
        let frame = render_braille(&RgbaImage::new(0, 0), opts(40, 20));
        assert!(frame.is_empty());
    }

    #[test]
    fn color_cells_are_boosted() {
        // A dull red should come out at least as saturated.
        let frame = render_braille(&solid(40, 40, [180, 90, 90, 255]), opts(10, 5));
        let fg = frame.cells()[0].fg.expect("lit cell has a color");
        let (_, s_out, _) = fg.to_hsl();
        let (_, s_in, _) = Color::rgb(180, 90, 90).to_hsl();
        assert!(s_out >= s_in - 0.01);
    }
}
