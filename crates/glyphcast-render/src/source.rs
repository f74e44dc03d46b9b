//! Resized source views shared by the renderers.

use glyphcast_color::Color;
use image::{imageops, imageops::FilterType, RgbaImage};
use rayon::prelude::*;

/// Row count above which brightness conversion runs on the rayon pool.
pub(crate) const PARALLEL_ROW_THRESHOLD: u32 = 64;

/// A source image resized to the renderer's pixel grid, split into a color
/// plane and a gamma-corrected brightness plane.
///
/// Brightness keeps the source polarity — renderers that honor `invert`
/// flip at sampling time, so cutoff checks always see raw brightness.
pub(crate) struct SourceView {
    pub width: u32,
    pub height: u32,
    pub colors: Vec<Color>,
    pub brightness: Vec<f32>,
}

impl SourceView {
    /// Resizes `img` to `px_w`×`px_h` and computes per-pixel Rec. 709 luma
    /// raised to `gamma`. Transparent pixels scale toward black.
    pub fn from_image(img: &RgbaImage, px_w: u32, px_h: u32, gamma: f32) -> Self {
        if px_w == 0 || px_h == 0 {
            return Self {
                width: 0,
                height: 0,
                colors: Vec::new(),
                brightness: Vec::new(),
            };
        }

        let resized = if img.width() == px_w && img.height() == px_h {
            img.clone()
        } else if px_w <= img.width() && px_h <= img.height() {
            imageops::resize(img, px_w, px_h, FilterType::Lanczos3)
        } else {
            imageops::resize(img, px_w, px_h, FilterType::Triangle)
        };

        let colors: Vec<Color> = resized
            .pixels()
            .map(|p| Color::rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
            .collect();

        let luma_of = |c: &Color| {
            let alpha = c.a as f32 / 255.0;
            (c.luma() * alpha).powf(gamma)
        };

        let brightness: Vec<f32> = if px_h > PARALLEL_ROW_THRESHOLD {
            colors.par_iter().map(luma_of).collect()
        } else {
            colors.iter().map(luma_of).collect()
        };

        Self {
            width: px_w,
            height: px_h,
            colors,
            brightness,
        }
    }

    /// The brightness at clamped pixel coordinates.
    #[inline]
    pub fn brightness_at(&self, x: i64, y: i64) -> f32 {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.brightness[(y * self.width + x) as usize]
    }

    /// The color at in-bounds pixel coordinates.
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        self.colors[(y * self.width + x) as usize]
    }

    /// Mean brightness over a pixel rectangle (clamped to bounds).
    pub fn mean_brightness(&self, x0: u32, y0: u32, w: u32, h: u32) -> f32 {
        let x1 = (x0 + w).min(self.width);
        let y1 = (y0 + h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0.0;
        }
        let mut sum = 0.0;
        for y in y0..y1 {
            for x in x0..x1 {
                sum += self.brightness[(y * self.width + x) as usize];
            }
        }
        sum / ((x1 - x0) * (y1 - y0)) as f32
    }

    /// Mean intensity of a 13-point disc centered at normalized cell
    /// coordinates within the cell at `(cell_x, cell_y)`, where each cell
    /// covers `cell_w`×`cell_h` pixels. Sample points are clamped to the
    /// image, so discs reaching past the border read edge pixels.
    pub fn sample_disc(
        &self,
        cell_x: u32,
        cell_y: u32,
        cell_w: u32,
        cell_h: u32,
        nx: f32,
        ny: f32,
        radius: f32,
    ) -> f32 {
        let offsets = glyphcast_atlas::sampling::disc_offsets(radius);
        let base_x = (cell_x * cell_w) as f32;
        let base_y = (cell_y * cell_h) as f32;
        let mut sum = 0.0;
        for (dx, dy) in offsets {
            let px = (base_x + (nx + dx) * cell_w as f32).floor() as i64;
            let py = (base_y + (ny + dy) * cell_h as f32).floor() as i64;
            sum += self.brightness_at(px, py);
        }
        sum / offsets.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    #[test]
    fn white_image_has_unit_brightness() {
        let view = SourceView::from_image(&solid(16, 16, [255, 255, 255, 255]), 8, 8, 1.0);
        assert!(view.brightness.iter().all(|&b| (b - 1.0).abs() < 1e-3));
    }

    #[test]
    fn gamma_darkens_midtones() {
        let img = solid(8, 8, [128, 128, 128, 255]);
        let linear = SourceView::from_image(&img, 8, 8, 1.0);
        let squared = SourceView::from_image(&img, 8, 8, 2.0);
        assert!(squared.brightness[0] < linear.brightness[0]);
    }

    #[test]
    fn transparency_reads_dark() {
        let view = SourceView::from_image(&solid(8, 8, [255, 255, 255, 0]), 8, 8, 1.0);
        assert!(view.brightness[0] < 1e-3);
    }

    #[test]
    fn zero_target_is_empty() {
        let view = SourceView::from_image(&solid(8, 8, [0, 0, 0, 255]), 0, 5, 1.0);
        assert_eq!(view.width, 0);
        assert!(view.colors.is_empty());
    }

    #[test]
    fn clamped_sampling_reads_border() {
        let view = SourceView::from_image(&solid(4, 4, [255, 255, 255, 255]), 4, 4, 1.0);
        assert!((view.brightness_at(-10, -10) - 1.0).abs() < 1e-3);
        assert!((view.brightness_at(100, 2) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn mean_brightness_of_half_black_half_white() {
        let mut img = solid(8, 8, [0, 0, 0, 255]);
        for y in 0..8 {
            for x in 0..4 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let view = SourceView::from_image(&img, 8, 8, 1.0);
        let mean = view.mean_brightness(0, 0, 8, 8);
        assert!((mean - 0.5).abs() < 0.05);
    }
}
