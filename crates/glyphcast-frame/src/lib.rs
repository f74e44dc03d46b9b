//! Cell-grid frames and ANSI escape encoding.
//!
//! # Overview
//!
//! `glyphcast-frame` holds the data model every glyphcast renderer produces
//! and every consumer (the animation player, the document writer) reads:
//!
//! *   **[`Cell`]:** One character position — glyph, optional 24-bit
//!     foreground/background, emphasis.
//! *   **[`Frame`]:** An immutable reading-order grid of cells with an
//!     optional inter-frame delay.
//! *   **[`ansi`]:** The exact escape sequences glyphcast emits — 24-bit SGR,
//!     cursor addressing, synchronized output, alternate screen — plus a
//!     run-length style tracker so unchanged colors cost zero bytes.
//!
//! # Example
//!
//! ```
//! use glyphcast_frame::{Cell, Frame};
//! use glyphcast_color::Color;
//!
//! let cells = vec![
//!     Cell::new('#').with_fg(Color::RED),
//!     Cell::new('#').with_fg(Color::RED),
//! ];
//! let frame = Frame::from_cells(2, 1, cells, 0);
//!
//! let ansi = frame.to_ansi(true);
//! // One escape covers both cells; the row ends with a reset.
//! assert_eq!(ansi.matches("\x1b[38;2;255;0;0m").count(), 1);
//! assert!(ansi.ends_with("\x1b[0m\r\n"));
//! ```

#![deny(missing_docs)]

pub mod ansi;
mod cell;
mod frame;

pub use cell::Cell;
pub use frame::Frame;

pub mod prelude {
    //! Convenience re-exports.
    pub use crate::ansi::{self, Sgr, SgrTracker};
    pub use crate::{Cell, Frame};
    pub use glyphcast_color::Color;
}
