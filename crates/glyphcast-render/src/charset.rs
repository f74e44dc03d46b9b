//! Character set presets.
//!
//! A character set is an ordered sequence of code points, conventionally
//! light to dark. The ordering only affects deterministic tie-breaking in
//! the shape atlas — the glyph actually chosen for a cell comes from
//! coverage sampling, not from ramp position.

/// The default set: most of printable ASCII ordered by visual density.
const EXTENDED: &str =
    " .'\",:;Il!i><~+=_-?][}{1)(|\\/tfjrxnuvcz7325JTYLCXUsey46PFAKSGHEZO0QDRNmwqpdbkhaog*#MW&8%B@$";

/// A short ramp that renders fast and reads cleanly at small sizes.
const SIMPLE: &str = " .:-=+*#%@";

/// Shaded Unicode block elements.
const BLOCK: &str = " ░▒▓█";

/// The traditional ASCII-art ramp.
const CLASSIC: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// A character set preset, or a caller-supplied ordered string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Charset {
    /// ~91 characters, the default. Highest shape variety.
    #[default]
    Extended,
    /// 10 characters. Fast and low-noise.
    Simple,
    /// Shaded Unicode blocks.
    Block,
    /// The original 71-character ramp.
    Classic,
    /// A custom ordered string.
    Custom(String),
}

impl Charset {
    /// The ordered characters of this set.
    pub fn chars(&self) -> &str {
        match self {
            Charset::Extended => EXTENDED,
            Charset::Simple => SIMPLE,
            Charset::Block => BLOCK,
            Charset::Classic => CLASSIC,
            Charset::Custom(s) => s,
        }
    }

    /// A short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Extended => "extended",
            Charset::Simple => "simple",
            Charset::Block => "block",
            Charset::Classic => "classic",
            Charset::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_sizes() {
        assert_eq!(Charset::Simple.chars().chars().count(), 10);
        assert_eq!(Charset::Block.chars().chars().count(), 5);
        assert_eq!(Charset::Classic.chars().chars().count(), 70);
        let extended = Charset::Extended.chars().chars().count();
        assert!((88..=95).contains(&extended), "extended has {extended} chars");
    }

    #[test]
    fn presets_start_light() {
        for preset in [
            Charset::Extended,
            Charset::Simple,
            Charset::Block,
            Charset::Classic,
        ] {
            assert!(preset.chars().starts_with(' '), "{} must start with space", preset.name());
        }
    }

    #[test]
    fn no_preset_contains_duplicates() {
        for preset in [
            Charset::Extended,
            Charset::Simple,
            Charset::Block,
            Charset::Classic,
        ] {
            let mut seen = std::collections::HashSet::new();
            for ch in preset.chars().chars() {
                assert!(seen.insert(ch), "{} duplicated in {}", ch, preset.name());
            }
        }
    }

    #[test]
    fn custom_passes_through() {
        let set = Charset::Custom("ab".to_string());
        assert_eq!(set.chars(), "ab");
        assert_eq!(set.name(), "custom");
    }
}
