//! Glyph rasterization sources.
//!
//! The shape atlas only needs one operation from a font: render a character
//! into a fixed-size coverage bitmap. Two implementations are provided —
//! [`BuiltinFont`], a compiled-in 8×8 monospace bitmap font extended with
//! procedural Unicode block elements, and [`TrueTypeFont`] for loading
//! arbitrary monospace fonts via `ab_glyph`.

use crate::error::{AtlasError, Result};
use crate::font8x8;

/// Trait for glyph rasterization sources.
pub trait Font: Send + Sync {
    /// Returns the name of the font.
    fn name(&self) -> &str;

    /// Checks if the font contains a glyph for the given character.
    fn has_glyph(&self, ch: char) -> bool;

    /// Rasterizes a character into a `size`×`size` coverage bitmap.
    ///
    /// Ink is 1.0, paper is 0.0, anti-aliased edges in between. Returns
    /// `None` for characters the font cannot draw.
    fn raster(&self, ch: char, size: u32) -> Option<Vec<f32>>;
}

/// The compiled-in monospace font.
///
/// Covers printable ASCII from an 8×8 bitmap table and the common Unicode
/// block elements (`█ ▀ ▄ ▌ ▐ ░ ▒ ▓`) procedurally, which is everything the
/// built-in character set presets use. No file on disk, no startup I/O.
#[derive(Debug, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    /// Creates the built-in font.
    pub fn new() -> Self {
        Self
    }

    /// Fractional coverage for block-element characters, by area.
    fn block_coverage(ch: char, fx: f32, fy: f32) -> Option<f32> {
        let v = match ch {
            '█' => 1.0,
            '▀' => {
                if fy < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            '▄' => {
                if fy >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            '▌' => {
                if fx < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            '▐' => {
                if fx >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            '░' => 0.25,
            '▒' => 0.5,
            '▓' => 0.75,
            _ => return None,
        };
        Some(v)
    }
}

impl Font for BuiltinFont {
    fn name(&self) -> &str {
        "builtin-8x8"
    }

    fn has_glyph(&self, ch: char) -> bool {
        font8x8::glyph(ch).is_some() || Self::block_coverage(ch, 0.0, 0.0).is_some()
    }

    fn raster(&self, ch: char, size: u32) -> Option<Vec<f32>> {
        let size = size.max(1);
        let n = (size * size) as usize;

        if let Some(rows) = font8x8::glyph(ch) {
            let mut out = vec![0.0f32; n];
            for y in 0..size {
                let src_y = (y * 8 / size).min(7);
                let row = rows[src_y as usize];
                for x in 0..size {
                    let src_x = (x * 8 / size).min(7);
                    if row >> src_x & 1 == 1 {
                        out[(y * size + x) as usize] = 1.0;
                    }
                }
            }
            return Some(out);
        }

        if Self::block_coverage(ch, 0.0, 0.0).is_some() {
            let mut out = vec![0.0f32; n];
            for y in 0..size {
                let fy = (y as f32 + 0.5) / size as f32;
                for x in 0..size {
                    let fx = (x as f32 + 0.5) / size as f32;
                    out[(y * size + x) as usize] =
                        Self::block_coverage(ch, fx, fy).unwrap_or(0.0);
                }
            }
            return Some(out);
        }

        None
    }
}

/// TrueType font loaded from .ttf or .otf data.
pub struct TrueTypeFont {
    font: ab_glyph::FontVec,
    name: String,
}

impl TrueTypeFont {
    /// Loads a TrueType font from bytes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use glyphcast_atlas::TrueTypeFont;
    ///
    /// let font_data = std::fs::read("font.ttf").unwrap();
    /// let font = TrueTypeFont::from_bytes(&font_data).unwrap();
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let font = ab_glyph::FontVec::try_from_vec(data.to_vec())
            .map_err(|e| AtlasError::FontError(e.to_string()))?;
        Ok(Self {
            font,
            name: "TrueType Font".to_string(),
        })
    }

    /// Loads a TrueType font from a file path.
    pub fn from_file(path: &str) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }
}

impl Font for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_glyph(&self, ch: char) -> bool {
        use ab_glyph::Font as AbFont;
        self.font.glyph_id(ch).0 != 0 || ch == '\0'
    }

    fn raster(&self, ch: char, size: u32) -> Option<Vec<f32>> {
        use ab_glyph::{Font as AbFont, ScaleFont};

        let size = size.max(1);
        let glyph_id = self.font.glyph_id(ch);
        if glyph_id.0 == 0 && ch != '\0' {
            return None;
        }

        let scale = ab_glyph::PxScale::from(size as f32);
        let scaled = self.font.as_scaled(scale);
        let ascent = scaled.ascent();

        let mut out = vec![0.0f32; (size * size) as usize];
        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(0.0, ascent));

        if let Some(outlined) = self.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if px >= 0 && py >= 0 && (px as u32) < size && (py as u32) < size {
                    let idx = (py as u32 * size + px as u32) as usize;
                    out[idx] = out[idx].max(coverage);
                }
            });
        }
        // No outline means a space-like glyph; the zero bitmap is correct.

        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(bitmap: &[f32]) -> f32 {
        bitmap.iter().sum::<f32>() / bitmap.len() as f32
    }

    #[test]
    fn builtin_covers_the_preset_repertoire() {
        let font = BuiltinFont::new();
        for ch in " .:-=+*#%@░▒▓█▀▄".chars() {
            assert!(font.has_glyph(ch), "missing glyph for {ch:?}");
        }
        assert!(!font.has_glyph('☃'));
    }

    #[test]
    fn builtin_raster_scales_coverage() {
        let font = BuiltinFont::new();
        let space = font.raster(' ', 32).unwrap();
        let at = font.raster('@', 32).unwrap();
        assert_eq!(mean(&space), 0.0);
        assert!(mean(&at) > 0.2);
    }

    #[test]
    fn shade_blocks_have_fractional_coverage() {
        let font = BuiltinFont::new();
        let light = mean(&font.raster('░', 16).unwrap());
        let medium = mean(&font.raster('▒', 16).unwrap());
        let full = mean(&font.raster('█', 16).unwrap());
        assert!(light < medium);
        assert!(medium < full);
        assert!((full - 1.0).abs() < 1e-6);
    }

    #[test]
    fn half_blocks_cover_half_the_cell() {
        let font = BuiltinFont::new();
        let upper = font.raster('▀', 16).unwrap();
        assert!((mean(&upper) - 0.5).abs() < 0.05);
        // Ink concentrated in the top rows.
        assert!(upper[..128].iter().sum::<f32>() > 100.0);
        assert_eq!(upper[128..].iter().sum::<f32>(), 0.0);
    }
}
