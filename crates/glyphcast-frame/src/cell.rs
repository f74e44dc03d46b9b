//! Represents a single cell in a rendered frame.

use crate::ansi::Sgr;
use glyphcast_color::Color;

/// One character position in a rendered frame.
///
/// A cell carries a glyph, an optional 24-bit foreground, an optional 24-bit
/// background, and a bold flag. `None` colors mean "emit no escape" — a bare
/// glyph in whatever style the terminal is already in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Cell {
    /// The character to display.
    pub ch: char,
    /// Foreground (text) color, if any.
    pub fg: Option<Color>,
    /// Background color, if any.
    pub bg: Option<Color>,
    /// Bold emphasis.
    pub bold: bool,
}

impl Cell {
    /// Creates a cell with the given character and no colors.
    ///
    /// # Example
    ///
    /// ```
    /// use glyphcast_frame::Cell;
    /// use glyphcast_color::Color;
    ///
    /// let cell = Cell::new('@').with_fg(Color::YELLOW);
    /// assert_eq!(cell.ch, '@');
    /// assert_eq!(cell.fg, Some(Color::YELLOW));
    /// ```
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: None,
            bg: None,
            bold: false,
        }
    }

    /// A space with no colors — the background-suppression cell.
    pub const fn blank() -> Self {
        Self::new(' ')
    }

    /// Sets the foreground color, returning a new cell.
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Sets the background color, returning a new cell.
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Sets the bold flag, returning a new cell.
    pub const fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Returns true for a bare space — nothing to draw, nothing to color.
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.fg.is_none() && self.bg.is_none() && !self.bold
    }

    /// The SGR attributes of this cell.
    pub fn sgr(&self) -> Sgr {
        Sgr {
            fg: self.fg,
            bg: self.bg,
            bold: self.bold,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
