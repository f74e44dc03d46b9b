//! Color manipulation and conversion for terminal image rendering.
//!
//! # Overview
//!
//! `glyphcast-color` provides the color primitives shared by every glyphcast
//! renderer. It supports:
//!
//! *   **RGBA Colors:** Standard 32-bit color representation.
//! *   **Perceptual Brightness:** Rec. 709 luma for grayscale conversion.
//! *   **HSL Conversion:** Round-trip between RGB and HSL, plus the
//!     saturation/lightness boost used to compensate sparse dot patterns.
//! *   **Palette Quantization:** Median-cut reduction to a fixed color count.
//! *   **Predefined Colors:** A set of standard terminal colors (e.g.
//!     `Color::RED`, `Color::MATRIX_GREEN`).
//!
//! # Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! glyphcast-color = "0.1"
//! ```
//!
//! ## Basic Example
//!
//! ```rust
//! use glyphcast_color::Color;
//!
//! fn main() {
//!     let sky = Color::rgb(90, 160, 255);
//!
//!     // Perceptual brightness in [0, 1]
//!     let brightness = sky.luma();
//!     assert!(brightness > 0.5);
//!
//!     // Punch up a washed-out color
//!     let vivid = sky.boost(1.25, 1.15);
//!     println!("{} -> {}", sky, vivid);
//! }
//! ```

#![deny(missing_docs)]

use std::fmt;

pub mod quantize;

pub mod prelude {
    //! Convenience re-exports.
    pub use crate::quantize::{nearest_in_palette, quantize_palette};
    pub use crate::Color;
}

/// An RGBA color represented as four 8-bit unsigned integers.
///
/// This struct is `Copy`, `Clone`, and generally lightweight (4 bytes).
/// It is intended to be passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGB components with full opacity (alpha = 255).
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// let red = Color::rgb(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a new color from RGBA components.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// let translucent = Color::rgba(255, 0, 0, 128);
    /// assert_eq!(translucent.a, 128);
    /// ```
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a grayscale color (r = g = b, full opacity).
    #[inline]
    pub const fn grayscale(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Returns true when the color is effectively transparent.
    ///
    /// The half-block renderer treats anything below half opacity as
    /// see-through so that GIF transparency keys survive resizing.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a < 128
    }

    /// Perceptual brightness in `[0, 1]` using Rec. 709 luma weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// assert_eq!(Color::BLACK.luma(), 0.0);
    /// assert_eq!(Color::WHITE.luma(), 1.0);
    /// assert!(Color::GREEN.luma() > Color::BLUE.luma());
    /// ```
    #[inline]
    pub fn luma(self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }

    /// Euclidean distance to another color in RGB space.
    ///
    /// Alpha is ignored. The maximum possible distance is `255 * sqrt(3)`,
    /// roughly `441.67` (black to white).
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// assert_eq!(Color::RED.distance(Color::RED), 0.0);
    /// assert!(Color::BLACK.distance(Color::WHITE) > 441.0);
    /// ```
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Linear interpolation between two colors.
    ///
    /// `t = 0.0` returns `self`, `t = 1.0` returns `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Multiplies the color by a scalar, clamping each channel.
    ///
    /// Used for tail fading in the matrix renderer.
    pub fn scale(self, factor: f32) -> Self {
        let mul = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self::rgba(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    /// Converts to HSL color space.
    ///
    /// Returns `(hue, saturation, lightness)` with hue in `[0, 360)` degrees
    /// and saturation/lightness in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// let (h, s, l) = Color::RED.to_hsl();
    /// assert_eq!(h, 0.0);
    /// assert_eq!(s, 1.0);
    /// assert_eq!(l, 0.5);
    /// ```
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;

        if delta == 0.0 {
            return (0.0, 0.0, lightness);
        }

        let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());

        let hue = if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        let hue = if hue < 0.0 { hue + 360.0 } else { hue };

        (hue, saturation, lightness)
    }

    /// Creates a color from HSL components.
    ///
    /// # Arguments
    ///
    /// * `h` - Hue (0.0 - 360.0)
    /// * `s` - Saturation (0.0 - 1.0)
    /// * `l` - Lightness (0.0 - 1.0)
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// let red = Color::from_hsl(0.0, 1.0, 0.5);
    /// assert_eq!(red, Color::RED);
    /// ```
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let h = h.rem_euclid(360.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self::rgb(
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }

    /// Scales saturation and lightness in HSL space, capping both at 1.0.
    ///
    /// Sparse glyphs (a couple of braille dots on an empty cell) read dimmer
    /// than the pixels they summarize; boosting the averaged color restores
    /// the perceived intensity.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_color::Color;
    ///
    /// let dull = Color::rgb(120, 80, 80);
    /// let vivid = dull.boost(1.25, 1.15);
    /// let (_, s0, l0) = dull.to_hsl();
    /// let (_, s1, l1) = vivid.to_hsl();
    /// assert!(s1 >= s0);
    /// assert!(l1 >= l0);
    /// ```
    pub fn boost(self, saturation: f32, lightness: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let mut out = Self::from_hsl(h, (s * saturation).min(1.0), (l * lightness).min(1.0));
        out.a = self.a;
        out
    }

    // Named colors (common terminal colors)

    /// Black color (0, 0, 0)
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White color (255, 255, 255)
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Red color (255, 0, 0)
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Green color (0, 255, 0)
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Blue color (0, 0, 255)
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Yellow color (255, 255, 0)
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Cyan color (0, 255, 255)
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Magenta color (255, 0, 255)
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// Gray color (128, 128, 128)
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    // Digital-rain palette

    /// Phosphor green used by the matrix renderer's default palette.
    pub const MATRIX_GREEN: Self = Self::rgb(0, 220, 70);
    /// Amber CRT tint.
    pub const AMBER: Self = Self::rgb(255, 176, 0);
    /// Deep purple tint.
    pub const PURPLE: Self = Self::rgb(170, 60, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        Self::rgba(v[0], v[1], v[2], v[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_ordering() {
        // Rec. 709: green dominates, blue is the dimmest primary.
        assert!(Color::GREEN.luma() > Color::RED.luma());
        assert!(Color::RED.luma() > Color::BLUE.luma());
    }

    #[test]
    fn hsl_round_trip_primaries() {
        for c in [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::CYAN,
            Color::MAGENTA,
            Color::WHITE,
            Color::BLACK,
        ] {
            let (h, s, l) = c.to_hsl();
            assert_eq!(Color::from_hsl(h, s, l), c, "round trip failed for {c}");
        }
    }

    #[test]
    fn hsl_round_trip_is_close_for_arbitrary_colors() {
        let c = Color::rgb(173, 42, 200);
        let (h, s, l) = c.to_hsl();
        let back = Color::from_hsl(h, s, l);
        assert!(c.distance(back) < 3.0);
    }

    #[test]
    fn boost_caps_at_full_saturation() {
        let c = Color::rgb(255, 0, 0);
        let boosted = c.boost(10.0, 1.0);
        let (_, s, _) = boosted.to_hsl();
        assert!(s <= 1.0);
    }

    #[test]
    fn boost_preserves_alpha() {
        let c = Color::rgba(100, 50, 50, 7);
        assert_eq!(c.boost(1.25, 1.15).a, 7);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Color::rgb(10, 200, 30);
        let b = Color::rgb(90, 14, 220);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn transparency_threshold() {
        assert!(Color::rgba(0, 0, 0, 0).is_transparent());
        assert!(Color::rgba(0, 0, 0, 127).is_transparent());
        assert!(!Color::rgba(0, 0, 0, 128).is_transparent());
    }
}
