//! Render configuration.

use crate::charset::Charset;
use crate::error::{RenderError, Result};
use crate::sizing::Sizing;

/// Configuration shared by every renderer.
///
/// This is a plain struct with public fields — construct a preset, then
/// mutate what you need:
///
/// ```
/// use glyphcast_render::RenderOptions;
///
/// let mut opts = RenderOptions::high_detail();
/// opts.max_width = 100;
/// opts.invert = true;
/// assert!(opts.validate().is_ok());
/// ```
///
/// `invert` flips cell-brightness polarity only: with `invert = false`
/// bright source pixels map to dense glyphs, with `invert = true` dark
/// pixels do. The character set's traversal order is a property of the set
/// itself and is not affected.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Explicit output width in cells. `None` sizes from `max_width`.
    pub width: Option<u32>,
    /// Explicit output height in cells. `None` sizes from `max_height`.
    pub height: Option<u32>,
    /// Width cap in cells when `width` is absent.
    pub max_width: u32,
    /// Height cap in cells when `height` is absent.
    pub max_height: u32,
    /// Terminal cell width ÷ height, typically 0.4–0.55.
    pub char_aspect: f32,
    /// Contrast exponent applied to cell coverage (≥ 1).
    pub contrast_power: f32,
    /// Gamma applied to source brightness (> 0).
    pub gamma: f32,
    /// Flip brightness polarity: dark source pixels become dense glyphs.
    pub invert: bool,
    /// Emit 24-bit color escapes.
    pub use_color: bool,
    /// Quantize cell colors down to this many palette entries.
    pub color_count: Option<u32>,
    /// Cells darker than this (0–1) render as bare spaces on dark terminals.
    pub dark_cutoff: f32,
    /// Cells brighter than this (0–1) render as bare spaces on light terminals.
    pub light_cutoff: f32,
    /// Target a light terminal background: the light cutoff applies instead
    /// of the dark one.
    pub light_background: bool,
    /// Sharpen edges at cell boundaries using outer samples.
    pub edge_detection: bool,
    /// Directional contrast mix-in strength (0–1).
    pub edge_strength: f32,
    /// ASCII supersampling factor: pixels rendered per cell axis.
    pub detail: u32,
    /// Animation speed multiplier (> 0).
    pub speed: f32,
    /// Animation loop count; 0 loops forever.
    pub loop_count: u32,
    /// Snap near-identical cell colors to the previous frame's values.
    pub stabilize: bool,
    /// RGB distance below which a cell color snaps to the previous frame.
    pub stability_threshold: f32,
    /// Character set preset or custom string.
    pub charset: Charset,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            max_width: 120,
            max_height: 40,
            char_aspect: 0.5,
            contrast_power: 2.5,
            gamma: 1.0,
            invert: false,
            use_color: true,
            color_count: None,
            dark_cutoff: 0.06,
            light_cutoff: 0.94,
            light_background: false,
            edge_detection: true,
            edge_strength: 0.3,
            detail: 4,
            speed: 1.0,
            loop_count: 0,
            stabilize: false,
            stability_threshold: 15.0,
            charset: Charset::Extended,
        }
    }
}

impl RenderOptions {
    /// Doubles the supersampling detail and uses the extended charset.
    pub fn high_detail() -> Self {
        Self {
            detail: 8,
            ..Self::default()
        }
    }

    /// Glyphs only: no color escapes at all.
    pub fn monochrome() -> Self {
        Self {
            use_color: false,
            ..Self::default()
        }
    }

    /// Tuned for dark glyphs on a light terminal background.
    pub fn for_light_background() -> Self {
        Self {
            light_background: true,
            invert: true,
            ..Self::default()
        }
    }

    /// Animation defaults: temporal color stabilization on, the given loop
    /// count (0 = forever).
    pub fn for_animation(loops: u32) -> Self {
        Self {
            loop_count: loops,
            stabilize: true,
            ..Self::default()
        }
    }

    /// Checks every numeric knob's range. Renderers call this before any
    /// pixel work; rendering itself never fails on validated options.
    pub fn validate(&self) -> Result<()> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> RenderError {
            RenderError::InvalidOption {
                name,
                reason: reason.into(),
            }
        }

        if self.charset.chars().is_empty() {
            return Err(RenderError::EmptyCharset);
        }
        if !(self.char_aspect.is_finite() && self.char_aspect > 0.0) {
            return Err(invalid("char_aspect", format!("{} is not > 0", self.char_aspect)));
        }
        if !(self.contrast_power.is_finite() && self.contrast_power >= 1.0) {
            return Err(invalid(
                "contrast_power",
                format!("{} is not >= 1", self.contrast_power),
            ));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(invalid("gamma", format!("{} is not > 0", self.gamma)));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(invalid("speed", format!("{} is not > 0", self.speed)));
        }
        if !(0.0..=1.0).contains(&self.edge_strength) {
            return Err(invalid(
                "edge_strength",
                format!("{} is outside 0..=1", self.edge_strength),
            ));
        }
        if !(0.0..=1.0).contains(&self.dark_cutoff) || !(0.0..=1.0).contains(&self.light_cutoff) {
            return Err(invalid("cutoff", "cutoffs must lie in 0..=1"));
        }
        if self.stability_threshold < 0.0 {
            return Err(invalid(
                "stability_threshold",
                format!("{} is negative", self.stability_threshold),
            ));
        }
        if self.color_count == Some(0) {
            return Err(invalid("color_count", "palette of zero colors"));
        }
        Ok(())
    }

    /// The sizing slice of these options.
    pub(crate) fn sizing(&self) -> Sizing {
        Sizing {
            width: self.width,
            height: self.height,
            max_width: self.max_width,
            max_height: self.max_height,
            char_aspect: self.char_aspect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(RenderOptions::default().validate().is_ok());
        assert!(RenderOptions::high_detail().validate().is_ok());
        assert!(RenderOptions::monochrome().validate().is_ok());
        assert!(RenderOptions::for_light_background().validate().is_ok());
        assert!(RenderOptions::for_animation(3).validate().is_ok());
    }

    #[test]
    fn bad_gamma_is_rejected() {
        let mut opts = RenderOptions::default();
        opts.gamma = 0.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn contrast_power_below_one_is_rejected() {
        let mut opts = RenderOptions::default();
        opts.contrast_power = 0.5;
        assert!(matches!(
            opts.validate(),
            Err(RenderError::InvalidOption { name: "contrast_power", .. })
        ));
    }

    #[test]
    fn empty_custom_charset_is_rejected() {
        let mut opts = RenderOptions::default();
        opts.charset = Charset::Custom(String::new());
        assert!(matches!(opts.validate(), Err(RenderError::EmptyCharset)));
    }

    #[test]
    fn zero_color_count_is_rejected() {
        let mut opts = RenderOptions::default();
        opts.color_count = Some(0);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn light_background_preset_inverts() {
        let opts = RenderOptions::for_light_background();
        assert!(opts.invert);
        assert!(opts.light_background);
    }
}
