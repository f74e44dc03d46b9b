//! Target cell-grid sizing.

/// The sizing slice of [`RenderOptions`](crate::RenderOptions): explicit
/// dimensions, caps, and the terminal's character aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    /// Explicit width in cells, if any.
    pub width: Option<u32>,
    /// Explicit height in cells, if any.
    pub height: Option<u32>,
    /// Width cap when `width` is absent (0 is treated as 1).
    pub max_width: u32,
    /// Height cap when `height` is absent (0 is treated as 1).
    pub max_height: u32,
    /// Terminal cell width ÷ height.
    pub char_aspect: f32,
}

impl Sizing {
    /// Resolves the output cell grid for a source of `src_w`×`src_h` pixels.
    ///
    /// Explicit dimensions are used verbatim. Otherwise the largest grid is
    /// chosen under the caps such that the displayed aspect — `width ×
    /// char_aspect` units wide by `height` units tall — matches the source
    /// aspect. A cell's pixel density (1×1 for ASCII, 2×4 for braille)
    /// cancels out of the displayed aspect, so the grid shape is the same
    /// for every renderer; only the resize target differs.
    ///
    /// Returns `(0, 0)` only for a zero-dimension source; otherwise both
    /// dimensions are at least 1.
    pub fn resolve(&self, src_w: u32, src_h: u32) -> (u32, u32) {
        if src_w == 0 || src_h == 0 {
            return (0, 0);
        }

        let max_w = self.max_width.max(1);
        let max_h = self.max_height.max(1);
        let aspect = self.char_aspect;

        // Cells per display unit: wc·aspect wide, hc tall.
        let rows_for = |wc: u32| {
            ((wc as f32 * aspect * src_h as f32) / src_w as f32).round() as u32
        };
        let cols_for = |hc: u32| {
            ((hc as f32 * src_w as f32) / (aspect * src_h as f32)).round() as u32
        };

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w.max(1), h.max(1)),
            (Some(w), None) => {
                let w = w.max(1);
                (w, rows_for(w).clamp(1, max_h))
            }
            (None, Some(h)) => {
                let h = h.max(1);
                (cols_for(h).clamp(1, max_w), h)
            }
            (None, None) => {
                let w = max_w;
                let h = rows_for(w);
                if h == 0 {
                    (w, 1)
                } else if h <= max_h {
                    (w, h)
                } else {
                    let h = max_h;
                    (cols_for(h).clamp(1, max_w), h)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizing(max_w: u32, max_h: u32) -> Sizing {
        Sizing {
            width: None,
            height: None,
            max_width: max_w,
            max_height: max_h,
            char_aspect: 0.5,
        }
    }

    #[test]
    fn square_source_fills_both_caps_at_half_aspect() {
        // 20 cols × 0.5 aspect = 10 display units wide = 10 rows tall.
        assert_eq!(sizing(20, 10).resolve(100, 100), (20, 10));
    }

    #[test]
    fn tall_source_is_height_constrained() {
        let (w, h) = sizing(80, 24).resolve(100, 400);
        assert_eq!(h, 24);
        assert!(w <= 80);
        // Displayed aspect ~ source aspect.
        let displayed = w as f32 * 0.5 / h as f32;
        assert!((displayed - 0.25).abs() < 0.1);
    }

    #[test]
    fn wide_source_is_width_constrained() {
        let (w, h) = sizing(80, 24).resolve(1000, 100);
        assert_eq!(w, 80);
        assert!(h <= 24);
    }

    #[test]
    fn explicit_dimensions_win() {
        let s = Sizing {
            width: Some(13),
            height: Some(7),
            ..sizing(80, 24)
        };
        assert_eq!(s.resolve(4000, 3), (13, 7));
    }

    #[test]
    fn zero_source_resolves_to_zero() {
        assert_eq!(sizing(80, 24).resolve(0, 100), (0, 0));
        assert_eq!(sizing(80, 24).resolve(100, 0), (0, 0));
    }

    #[test]
    fn zero_caps_clamp_to_one() {
        let (w, h) = sizing(0, 0).resolve(100, 100);
        assert_eq!((w, h), (1, 1));
    }

    #[test]
    fn one_by_one_source_yields_a_cell() {
        let (w, h) = sizing(80, 24).resolve(1, 1);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn extreme_aspect_never_yields_zero() {
        let (w, h) = sizing(80, 24).resolve(10_000, 1);
        assert!(w >= 1 && h >= 1);
    }
}
