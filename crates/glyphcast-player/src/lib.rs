//! Flicker-free animation playback for ANSI terminals.
//!
//! # Overview
//!
//! `glyphcast-player` owns the terminal while frames play:
//!
//! *   **[`Player`]:** absolute-deadline frame scheduling (slow frames
//!     don't cascade), loop control, pause and quit keys, cooperative
//!     cancellation.
//! *   **Scoped terminal state:** alternate screen, hidden cursor and raw
//!     input are acquired on entry and released in LIFO order on every exit
//!     path — normal completion, cancellation, error, or panic.
//! *   **Synchronized output:** every frame is bracketed by DECSET 2026 so
//!     the terminal commits it atomically; terminals without support just
//!     ignore the brackets and risk tearing, nothing else.
//! *   **[`DeltaRenderer`]:** emits only the cells that changed since the
//!     previous frame, eliding cursor moves across runs of consecutive
//!     changes.
//!
//! The player is single-threaded cooperative: the only suspension points
//! are the inter-frame sleep and the frame write, and the cancel token is
//! observed at both.
//!
//! # Example
//!
//! ```
//! use glyphcast_frame::{Cell, Frame};
//! use glyphcast_player::{Player, PlayerOptions, SyncMode};
//!
//! let frames = vec![
//!     Frame::from_cells(2, 1, vec![Cell::new('a'), Cell::new('b')], 1),
//!     Frame::from_cells(2, 1, vec![Cell::new('c'), Cell::new('b')], 1),
//! ];
//!
//! let mut opts = PlayerOptions::default();
//! opts.loop_count = 1;
//! opts.alt_screen = false;
//! opts.interactive = false;
//! opts.sync = SyncMode::Always;
//!
//! let mut out = Vec::new();
//! let mut player = Player::new(&mut out, opts);
//! player.play(&frames).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("\x1b[?2026h"));
//! ```

#![deny(missing_docs)]

mod cancel;
mod delta;
mod error;
mod player;
mod terminal;

pub use cancel::CancelToken;
pub use delta::DeltaRenderer;
pub use error::{PlayerError, Result};
pub use player::{Player, PlayerOptions, PlayOutcome, PrerenderedFrame};
pub use terminal::SyncMode;

pub mod prelude {
    //! Convenience re-exports.
    pub use crate::{CancelToken, Player, PlayerOptions, PrerenderedFrame, SyncMode};
}
