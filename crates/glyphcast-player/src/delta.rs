//! Delta frame encoding.

use glyphcast_frame::ansi::{self, SgrTracker};
use glyphcast_frame::Frame;

/// Encodes frames against a retained previous-frame buffer, emitting only
/// changed cells.
///
/// The buffer is exclusively owned here — renderers never see it, they
/// produce self-contained frames. The first frame after construction,
/// [`reset`](Self::reset), or a grid shape change is encoded in full.
///
/// The encoder assumes the cursor sits at the home position when its output
/// starts (the player homes the cursor at every frame) and that the
/// terminal is in the reset SGR state (every emitted frame ends with a
/// reset).
#[derive(Debug, Default)]
pub struct DeltaRenderer {
    prev: Option<Frame>,
}

impl DeltaRenderer {
    /// A renderer with no retained frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the retained frame; the next encode is a full redraw.
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Encodes `frame`, retaining it for the next call.
    ///
    /// Encoding a frame identical to the retained one produces only a
    /// trailing reset — no cursor moves, no glyphs.
    pub fn encode(&mut self, frame: &Frame, use_color: bool) -> String {
        let full_redraw = match &self.prev {
            Some(prev) => {
                prev.width() != frame.width() || prev.height() != frame.height()
            }
            None => true,
        };

        let out = if full_redraw {
            frame.to_ansi(use_color)
        } else {
            let prev = self.prev.as_ref().expect("checked above");
            encode_delta(prev, frame, use_color)
        };

        self.prev = Some(frame.clone());
        out
    }
}

fn encode_delta(prev: &Frame, next: &Frame, use_color: bool) -> String {
    let width = next.width();
    let mut out = String::new();
    let mut tracker = SgrTracker::new();
    // The player homes the cursor before our output runs.
    let mut cursor: Option<(u32, u32)> = Some((0, 0));
    let mut changed = 0usize;

    for (idx, (p, n)) in prev.cells().iter().zip(next.cells()).enumerate() {
        if p == n {
            continue;
        }
        changed += 1;
        let x = idx as u32 % width;
        let y = idx as u32 / width;

        if cursor != Some((x, y)) {
            ansi::write_cursor_position(&mut out, y + 1, x + 1);
        }
        if use_color {
            tracker.transition(n.sgr(), &mut out);
        }
        out.push(n.ch);

        // After writing, the cursor advanced one column — unless we hit the
        // right edge, where wrap behavior varies by terminal.
        cursor = if x + 1 < width { Some((x + 1, y)) } else { None };
    }

    tracker.force_reset(&mut out);
    log::trace!(
        "delta frame: {changed}/{} cells changed",
        next.cells().len()
    );
    out
}
