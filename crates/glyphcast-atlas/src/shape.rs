//! The ASCII shape atlas: per-glyph coverage vectors and nearest lookup.

use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::error::{AtlasError, Result};
use crate::font::{BuiltinFont, Font};
use crate::kdtree::KdTree;
use crate::sampling::{self, INNER_COUNT, OUTER_COUNT};

/// Raster resolution each glyph is sampled at.
const RASTER_SIZE: u32 = 32;

/// Disc radius in normalized cell units.
const DISC_RADIUS: f32 = 0.09;

/// Quantization width per component for the lookup cache key: 5 bits each
/// over 6 components packs into 30 bits.
const KEY_BITS: u32 = 5;

/// One glyph's sampled coverage profile.
#[derive(Debug, Clone)]
pub struct GlyphShape {
    /// The character this profile belongs to.
    pub ch: char,
    /// Normalized coverage at the six staggered internal sample discs.
    pub inner: [f32; INNER_COUNT],
    /// Normalized coverage at the ten outer sample discs, just past the
    /// cell boundary.
    pub outer: [f32; OUTER_COUNT],
}

/// A shape atlas over one character set.
///
/// Built once from a font, then immutable: concurrent lookups need no
/// synchronization beyond the internal memoization cache, which is a
/// benign last-write-wins map (equal keys always produce equal values).
pub struct ShapeAtlas {
    glyphs: Vec<GlyphShape>,
    tree: KdTree,
    cache: RwLock<HashMap<u32, char>>,
}

impl ShapeAtlas {
    /// Builds the atlas for `charset` using the given font.
    ///
    /// Characters the font cannot rasterize are skipped with a warning;
    /// duplicates keep their first occurrence so tie-breaking follows the
    /// charset string order. Errors only when nothing remains.
    pub fn build(font: &dyn Font, charset: &str) -> Result<Self> {
        let mut seen = HashMap::new();
        let mut glyphs: Vec<GlyphShape> = Vec::new();

        for ch in charset.chars() {
            if seen.contains_key(&ch) {
                continue;
            }
            seen.insert(ch, ());

            let Some(bitmap) = font.raster(ch, RASTER_SIZE) else {
                log::warn!("font {:?} has no glyph for {:?}, skipping", font.name(), ch);
                continue;
            };

            let mut inner = [0.0f32; INNER_COUNT];
            for (i, &(cx, cy)) in sampling::INNER.iter().enumerate() {
                inner[i] =
                    sampling::disc_mean(&bitmap, RASTER_SIZE, RASTER_SIZE, cx, cy, DISC_RADIUS);
            }
            let mut outer = [0.0f32; OUTER_COUNT];
            for (i, &(cx, cy)) in sampling::OUTER.iter().enumerate() {
                outer[i] =
                    sampling::disc_mean(&bitmap, RASTER_SIZE, RASTER_SIZE, cx, cy, DISC_RADIUS);
            }

            glyphs.push(GlyphShape { ch, inner, outer });
        }

        if glyphs.is_empty() {
            return Err(AtlasError::EmptyCharacterSet);
        }

        // Normalize every component by the global maximum so the loudest
        // glyph sits near magnitude 1 and distances are comparable across
        // character sets.
        let max = glyphs
            .iter()
            .flat_map(|g| g.inner.iter())
            .fold(0.0f32, |m, &v| m.max(v));
        if max > 0.0 {
            for g in &mut glyphs {
                for v in &mut g.inner {
                    *v /= max;
                }
                for v in &mut g.outer {
                    *v /= max;
                }
            }
        }

        let points: Vec<[f32; INNER_COUNT]> = glyphs.iter().map(|g| g.inner).collect();
        let tree = KdTree::build(&points);

        log::debug!(
            "shape atlas built: {} glyphs, peak coverage {:.3}",
            glyphs.len(),
            max
        );

        Ok(Self {
            glyphs,
            tree,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the character whose coverage vector is nearest to `v`.
    ///
    /// Never fails: the atlas is non-empty by construction. Exact-distance
    /// ties resolve to the earlier charset position.
    pub fn lookup(&self, v: &[f32; INNER_COUNT]) -> char {
        let key = quantize_key(v);
        if let Some(&ch) = self.cache.read().get(&key) {
            return ch;
        }

        let idx = self
            .tree
            .nearest(v)
            .expect("atlas is non-empty by construction");
        let ch = self.glyphs[idx].ch;

        self.cache.write().insert(key, ch);
        ch
    }

    /// The sampled glyph profiles, in charset order.
    pub fn glyphs(&self) -> &[GlyphShape] {
        &self.glyphs
    }

    /// What a fully saturated cell renders as: the glyph nearest to the
    /// all-ones coverage vector.
    pub fn densest(&self) -> char {
        self.lookup(&[1.0; INNER_COUNT])
    }
}

fn quantize_key(v: &[f32; INNER_COUNT]) -> u32 {
    let levels = (1u32 << KEY_BITS) - 1;
    let mut key = 0u32;
    for &c in v {
        let q = (c.clamp(0.0, 1.0) * levels as f32).round() as u32;
        key = (key << KEY_BITS) | q;
    }
    key
}

/// Returns the process-wide shared atlas for a character set, building it
/// from the built-in font on first use.
///
/// Atlases are immutable and cheap to share; rebuilds only happen when a
/// charset is seen for the first time.
pub fn shared_atlas(charset: &str) -> Arc<ShapeAtlas> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Arc<ShapeAtlas>>>> = OnceLock::new();
    let registry = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(atlas) = registry.read().get(charset) {
        return Arc::clone(atlas);
    }

    let font = BuiltinFont::new();
    let atlas = Arc::new(
        ShapeAtlas::build(&font, charset).unwrap_or_else(|_| {
            // A charset of unknown glyphs falls back to a plain ramp
            // rather than poisoning every render call site.
            log::warn!("charset unusable with the built-in font, falling back to ' .:#@'");
            ShapeAtlas::build(&font, " .:#@").expect("fallback charset is rasterizable")
        }),
    );
    registry
        .write()
        .entry(charset.to_string())
        .or_insert_with(|| Arc::clone(&atlas));
    atlas
}
