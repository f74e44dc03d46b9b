//! The escape sequences glyphcast emits, bit-exact.
//!
//! Every byte written to the terminal or into a document's frame content
//! goes through this module. Consumers that diff or replay frames rely on
//! the exact forms below, so they are spelled out as constants rather than
//! built through a styling library.

use glyphcast_color::Color;
use std::fmt::{self, Write};

/// Reset all attributes: `ESC[0m`.
pub const RESET: &str = "\x1b[0m";
/// Bold on: `ESC[1m`.
pub const BOLD: &str = "\x1b[1m";
/// Home the cursor: `ESC[1;1H`.
pub const CURSOR_HOME: &str = "\x1b[1;1H";
/// Begin synchronized output (DECSET 2026): `ESC[?2026h`.
pub const SYNC_BEGIN: &str = "\x1b[?2026h";
/// End synchronized output: `ESC[?2026l`.
pub const SYNC_END: &str = "\x1b[?2026l";
/// Enter the alternate screen buffer: `ESC[?1049h`.
pub const ALT_SCREEN_ENTER: &str = "\x1b[?1049h";
/// Leave the alternate screen buffer: `ESC[?1049l`.
pub const ALT_SCREEN_EXIT: &str = "\x1b[?1049l";
/// Hide the cursor: `ESC[?25l`.
pub const CURSOR_HIDE: &str = "\x1b[?25l";
/// Show the cursor: `ESC[?25h`.
pub const CURSOR_SHOW: &str = "\x1b[?25h";
/// Clear the whole screen: `ESC[2J`.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Writes a 24-bit foreground escape: `ESC[38;2;R;G;Bm`.
pub fn write_fg(out: &mut String, color: Color) {
    let _ = write!(out, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

/// Writes a 24-bit background escape: `ESC[48;2;R;G;Bm`.
pub fn write_bg(out: &mut String, color: Color) {
    let _ = write!(out, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

/// Writes a 1-based cursor position escape: `ESC[row;colH`.
pub fn write_cursor_position(out: &mut String, row: u32, col: u32) {
    let _ = write!(out, "\x1b[{};{}H", row, col);
}

/// The SGR attributes of one cell: foreground, background, bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sgr {
    /// 24-bit foreground, if set.
    pub fg: Option<Color>,
    /// 24-bit background, if set.
    pub bg: Option<Color>,
    /// Bold emphasis.
    pub bold: bool,
}

impl Sgr {
    /// True when no attribute is set (the state after a reset).
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Tracks the terminal's current SGR state and emits minimal transitions.
///
/// Escape bytes dominate frame size for colored output; a run of same-color
/// cells must cost one escape, not one per cell. The tracker also knows that
/// ANSI has no "clear just the background" short form, so dropping an
/// attribute goes through a full reset followed by re-application of
/// whatever survives.
#[derive(Debug, Default)]
pub struct SgrTracker {
    current: Sgr,
}

impl SgrTracker {
    /// A tracker in the reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the escapes that take the terminal from the current state to
    /// `target`, and records `target` as current.
    pub fn transition(&mut self, target: Sgr, out: &mut String) {
        if target == self.current {
            return;
        }

        let loses_attr = (self.current.bold && !target.bold)
            || (self.current.fg.is_some() && target.fg.is_none())
            || (self.current.bg.is_some() && target.bg.is_none());

        if loses_attr {
            out.push_str(RESET);
            self.current = Sgr::default();
        }

        if target.bold && !self.current.bold {
            out.push_str(BOLD);
        }
        if let Some(fg) = target.fg {
            if self.current.fg != Some(fg) {
                write_fg(out, fg);
            }
        }
        if let Some(bg) = target.bg {
            if self.current.bg != Some(bg) {
                write_bg(out, bg);
            }
        }

        self.current = target;
    }

    /// Emits a reset unless the terminal is already in the reset state.
    pub fn reset(&mut self, out: &mut String) {
        if !self.current.is_plain() {
            out.push_str(RESET);
            self.current = Sgr::default();
        }
    }

    /// Emits an unconditional reset and records the reset state.
    pub fn force_reset(&mut self, out: &mut String) {
        out.push_str(RESET);
        self.current = Sgr::default();
    }
}

impl fmt::Display for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        let mut tracker = SgrTracker::new();
        tracker.transition(*self, &mut s);
        f.write_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fg(c: Color) -> Sgr {
        Sgr {
            fg: Some(c),
            ..Sgr::default()
        }
    }

    #[test]
    fn escape_forms_are_exact() {
        let mut s = String::new();
        write_fg(&mut s, Color::rgb(1, 2, 3));
        assert_eq!(s, "\x1b[38;2;1;2;3m");

        s.clear();
        write_bg(&mut s, Color::rgb(255, 0, 128));
        assert_eq!(s, "\x1b[48;2;255;0;128m");

        s.clear();
        write_cursor_position(&mut s, 12, 40);
        assert_eq!(s, "\x1b[12;40H");
    }

    #[test]
    fn repeated_style_costs_nothing() {
        let mut tracker = SgrTracker::new();
        let mut out = String::new();
        tracker.transition(fg(Color::RED), &mut out);
        let after_first = out.len();
        tracker.transition(fg(Color::RED), &mut out);
        assert_eq!(out.len(), after_first);
    }

    #[test]
    fn dropping_background_goes_through_reset() {
        let mut tracker = SgrTracker::new();
        let mut out = String::new();
        tracker.transition(
            Sgr {
                fg: Some(Color::RED),
                bg: Some(Color::BLUE),
                bold: false,
            },
            &mut out,
        );
        out.clear();
        tracker.transition(fg(Color::RED), &mut out);
        // Reset, then the surviving foreground is re-applied.
        assert!(out.starts_with(RESET));
        assert!(out.contains("\x1b[38;2;255;0;0m"));
        assert!(!out.contains("\x1b[48;2"));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut tracker = SgrTracker::new();
        let mut out = String::new();
        tracker.reset(&mut out);
        assert!(out.is_empty());

        tracker.transition(fg(Color::GREEN), &mut out);
        out.clear();
        tracker.reset(&mut out);
        assert_eq!(out, RESET);
        out.clear();
        tracker.reset(&mut out);
        assert!(out.is_empty());
    }
}
