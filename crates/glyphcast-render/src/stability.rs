//! Temporal color stabilization for animations.

use glyphcast_frame::{Cell, Frame};

/// Snaps cell colors of `next` to `prev` wherever they differ by less than
/// `threshold` in RGB distance.
///
/// Palette quantization jitters cell colors by a few units between frames
/// of otherwise-static content, which reads as flicker. Snapping below the
/// threshold removes the jitter without touching genuine motion, and the
/// operation is idempotent: stabilizing an already-stabilized frame changes
/// nothing.
///
/// Frames of different dimensions pass through untouched (a resize
/// boundary is a full redraw anyway).
pub fn stabilize_colors(prev: &Frame, next: &Frame, threshold: f32) -> Frame {
    if prev.width() != next.width() || prev.height() != next.height() || threshold <= 0.0 {
        return next.clone();
    }

    let cells: Vec<Cell> = prev
        .cells()
        .iter()
        .zip(next.cells())
        .map(|(p, n)| {
            let mut cell = *n;
            if let (Some(pf), Some(nf)) = (p.fg, n.fg) {
                if pf.distance(nf) < threshold {
                    cell.fg = Some(pf);
                }
            }
            if let (Some(pb), Some(nb)) = (p.bg, n.bg) {
                if pb.distance(nb) < threshold {
                    cell.bg = Some(pb);
                }
            }
            cell
        })
        .collect();

    Frame::from_cells(next.width(), next.height(), cells, next.delay_ms())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcast_color::Color;

    fn frame_of(colors: &[Color]) -> Frame {
        let cells = colors
            .iter()
            .map(|&c| Cell::new('#').with_fg(c))
            .collect();
        Frame::from_cells(colors.len() as u32, 1, cells, 30)
    }

    #[test]
    fn jitter_below_threshold_snaps() {
        let prev = frame_of(&[Color::rgb(100, 100, 100)]);
        let next = frame_of(&[Color::rgb(104, 98, 101)]);
        let out = stabilize_colors(&prev, &next, 15.0);
        assert_eq!(out.cells()[0].fg, Some(Color::rgb(100, 100, 100)));
    }

    #[test]
    fn genuine_motion_passes_through() {
        let prev = frame_of(&[Color::rgb(100, 100, 100)]);
        let next = frame_of(&[Color::rgb(200, 40, 40)]);
        let out = stabilize_colors(&prev, &next, 15.0);
        assert_eq!(out.cells()[0].fg, Some(Color::rgb(200, 40, 40)));
    }

    #[test]
    fn stabilization_is_idempotent() {
        let prev = frame_of(&[Color::rgb(50, 60, 70), Color::rgb(90, 90, 90)]);
        let next = frame_of(&[Color::rgb(55, 58, 72), Color::rgb(240, 10, 10)]);
        let once = stabilize_colors(&prev, &next, 15.0);
        let twice = stabilize_colors(&prev, &once, 15.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn dimension_mismatch_passes_through() {
        let prev = frame_of(&[Color::RED]);
        let next = frame_of(&[Color::RED, Color::BLUE]);
        let out = stabilize_colors(&prev, &next, 15.0);
        assert_eq!(out, next);
    }

    #[test]
    fn colorless_cells_are_untouched() {
        let prev = frame_of(&[Color::RED]);
        let next = Frame::from_cells(1, 1, vec![Cell::blank()], 30);
        let out = stabilize_colors(&prev, &next, 15.0);
        assert!(out.cells()[0].is_blank());
    }
}
