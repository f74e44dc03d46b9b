//! Shared sample geometry for cell coverage vectors.
//!
//! Both sides of the shape match use the exact same geometry: the atlas
//! evaluates these positions against a rasterized glyph, the ASCII renderer
//! evaluates them against the resized source image. Positions are
//! normalized to the cell — `(0, 0)` top-left, `(1, 1)` bottom-right —
//! and outer positions extend past the cell edges.

/// Number of internal samples (the matched feature vector's dimension).
pub const INNER_COUNT: usize = 6;

/// Number of outer samples, taken just outside the cell boundary.
pub const OUTER_COUNT: usize = 10;

/// Internal sample centers: three columns × two rows, with the left column
/// shifted down and the right column shifted up by half the row spacing.
/// The stagger makes adjacent cells' sample grids interleave instead of
/// forming visible horizontal bands.
pub const INNER: [(f32, f32); INNER_COUNT] = [
    (0.1667, 0.50), // left column, shifted down
    (0.1667, 0.92),
    (0.50, 0.25), // middle column
    (0.50, 0.75),
    (0.8333, 0.08), // right column, shifted up
    (0.8333, 0.50),
];

/// Outer sample centers: the four cardinals, the four diagonals, and two
/// edge midpoints aligned with the staggered columns.
pub const OUTER: [(f32, f32); OUTER_COUNT] = [
    (0.50, -0.25),  // N
    (0.50, 1.25),   // S
    (-0.25, 0.50),  // W
    (1.25, 0.50),   // E
    (-0.25, -0.25), // NW
    (1.25, -0.25),  // NE
    (-0.25, 1.25),  // SW
    (1.25, 1.25),   // SE
    (-0.25, 0.92),  // left edge midpoint
    (1.25, 0.08),   // right edge midpoint
];

/// For each internal sample, the index of its matched outer neighbor —
/// the outer sample lying in the direction the inner sample faces. Used by
/// the directional-contrast step of the ASCII renderer.
pub const OUTER_FOR_INNER: [usize; INNER_COUNT] = [2, 8, 0, 1, 9, 3];

/// Sub-sample offsets of a 13-point disc: center, an inner ring of 4 at
/// half radius, and an outer ring of 8 at full radius.
pub fn disc_offsets(radius: f32) -> [(f32, f32); 13] {
    let half = radius * 0.5;
    let diag = radius * std::f32::consts::FRAC_1_SQRT_2;
    [
        (0.0, 0.0),
        // inner ring
        (half, 0.0),
        (-half, 0.0),
        (0.0, half),
        (0.0, -half),
        // outer ring
        (radius, 0.0),
        (-radius, 0.0),
        (0.0, radius),
        (0.0, -radius),
        (diag, diag),
        (diag, -diag),
        (-diag, diag),
        (-diag, -diag),
    ]
}

/// Mean intensity of a disc centered at `(cx, cy)` (normalized cell
/// coordinates) over a `width`×`height` scalar field. Points falling
/// outside the field count as zero, which is exactly what an outer sample
/// past the glyph boundary should read.
pub fn disc_mean(
    field: &[f32],
    width: u32,
    height: u32,
    cx: f32,
    cy: f32,
    radius: f32,
) -> f32 {
    if width == 0 || height == 0 {
        return 0.0;
    }
    let offsets = disc_offsets(radius);
    let mut sum = 0.0;
    for (dx, dy) in offsets {
        let px = ((cx + dx) * width as f32).floor() as i64;
        let py = ((cy + dy) * height as f32).floor() as i64;
        if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
            sum += field[(py as u32 * width + px as u32) as usize];
        }
    }
    sum / offsets.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_samples_stay_inside_the_cell() {
        for (x, y) in INNER {
            assert!((0.0..=1.0).contains(&x));
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn outer_samples_leave_the_cell() {
        for (x, y) in OUTER {
            assert!(!(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn every_inner_sample_has_a_matched_outer() {
        for &idx in &OUTER_FOR_INNER {
            assert!(idx < OUTER_COUNT);
        }
    }

    #[test]
    fn disc_mean_of_uniform_field_is_uniform() {
        let field = vec![0.5f32; 16 * 16];
        let v = disc_mean(&field, 16, 16, 0.5, 0.5, 0.1);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn disc_mean_outside_field_is_zero() {
        let field = vec![1.0f32; 8 * 8];
        assert_eq!(disc_mean(&field, 8, 8, -0.5, -0.5, 0.05), 0.0);
    }
}
