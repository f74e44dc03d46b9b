//! The braille pattern atlas: 256 compile-time 8-D vectors.
//!
//! Unlike the ASCII shape atlas, braille needs no font: every pattern in
//! U+2800..U+28FF is fully described by its dot bits, so the vectors are
//! generated from the Unicode layout alone. With only 256 candidates a
//! linear scan beats any spatial index at this dimensionality.

use std::sync::OnceLock;

use hashbrown::HashMap;
use parking_lot::RwLock;

/// Number of dots per braille cell (2 columns × 4 rows).
pub const DOT_COUNT: usize = 8;

/// Code-point bit for each dot in row-major order within the 2×4 cell.
///
/// Dot index `i` is at column `i % 2`, row `i / 2`; the bit values follow
/// the Unicode braille encoding, where dots 1-3 and 4-6 fill the first two
/// columns top-to-bottom and dots 7-8 form the bottom row.
pub const DOT_BITS: [u8; DOT_COUNT] = [0x01, 0x08, 0x02, 0x10, 0x04, 0x20, 0x40, 0x80];

/// Quantization width per component for the match cache key: 4 bits each
/// over 8 components packs into 32 bits.
const KEY_BITS: u32 = 4;

const fn build_patterns() -> [[f32; DOT_COUNT]; 256] {
    let mut patterns = [[0.0f32; DOT_COUNT]; 256];
    let mut p = 0;
    while p < 256 {
        let mut i = 0;
        while i < DOT_COUNT {
            if p as u8 & DOT_BITS[i] != 0 {
                patterns[p][i] = 1.0;
            }
            i += 1;
        }
        p += 1;
    }
    patterns
}

/// The 256 pattern vectors, indexed by dot-bit byte. Component `i` is 1.0
/// when dot `i` (row-major) is raised.
pub static PATTERNS: [[f32; DOT_COUNT]; 256] = build_patterns();

/// The braille character for a dot-bit byte.
///
/// # Examples
///
/// ```
/// use glyphcast_atlas::braille::pattern_char;
///
/// assert_eq!(pattern_char(0x00), '\u{2800}');
/// assert_eq!(pattern_char(0xFF), '\u{28FF}');
/// ```
pub const fn pattern_char(bits: u8) -> char {
    // U+2800 + bits is always inside the braille block.
    match char::from_u32(0x2800 + bits as u32) {
        Some(c) => c,
        None => unreachable!(),
    }
}

/// Nearest-pattern matcher with a quantized-key memoization cache.
///
/// The cache is concurrent-insert / concurrent-read with last-write-wins
/// semantics; duplicate inserts are harmless because the mapping is
/// deterministic.
#[derive(Debug, Default)]
pub struct BrailleMatcher {
    cache: RwLock<HashMap<u32, u8>>,
}

impl BrailleMatcher {
    /// Creates a matcher with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide shared matcher.
    pub fn shared() -> &'static BrailleMatcher {
        static SHARED: OnceLock<BrailleMatcher> = OnceLock::new();
        SHARED.get_or_init(BrailleMatcher::new)
    }

    /// Returns the dot-bit byte of the pattern nearest to the 8-D coverage
    /// sample `v` (squared Euclidean distance, ties to the lower byte).
    pub fn best_pattern(&self, v: &[f32; DOT_COUNT]) -> u8 {
        let key = quantize_key(v);
        if let Some(&bits) = self.cache.read().get(&key) {
            return bits;
        }
        let bits = nearest_pattern(v);
        self.cache.write().insert(key, bits);
        bits
    }

    /// Like [`best_pattern`](Self::best_pattern), returning the character.
    pub fn best_char(&self, v: &[f32; DOT_COUNT]) -> char {
        pattern_char(self.best_pattern(v))
    }
}

fn nearest_pattern(v: &[f32; DOT_COUNT]) -> u8 {
    let mut best = 0u8;
    let mut best_dist = f32::INFINITY;
    for (p, pattern) in PATTERNS.iter().enumerate() {
        let mut dist = 0.0f32;
        for i in 0..DOT_COUNT {
            let d = v[i] - pattern[i];
            dist += d * d;
        }
        if dist < best_dist {
            best_dist = dist;
            best = p as u8;
        }
    }
    best
}

fn quantize_key(v: &[f32; DOT_COUNT]) -> u32 {
    let levels = (1u32 << KEY_BITS) - 1;
    let mut key = 0u32;
    for &c in v {
        let q = (c.clamp(0.0, 1.0) * levels as f32).round() as u32;
        key = (key << KEY_BITS) | q;
    }
    key
}
