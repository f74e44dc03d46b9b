//! Scoped terminal state.

use std::io::Write;

use glyphcast_frame::ansi;

/// Synchronized-output policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Probe the environment: enabled unless the terminal looks incapable.
    #[default]
    Auto,
    /// Always emit DECSET 2026 brackets.
    Always,
    /// Never emit them.
    Never,
}

impl SyncMode {
    /// Resolves the policy to a concrete decision.
    ///
    /// The probe is deliberately conservative: terminals that don't
    /// understand DECSET 2026 ignore it, so the only reason to disable is a
    /// terminal that chokes on private-mode sequences entirely (`TERM=dumb`
    /// or unset). Correctness is identical either way — the fallback only
    /// risks visible tearing.
    pub(crate) fn resolved(self) -> bool {
        match self {
            SyncMode::Always => true,
            SyncMode::Never => false,
            SyncMode::Auto => match std::env::var("TERM") {
                Ok(term) => !term.is_empty() && term != "dumb",
                Err(_) => false,
            },
        }
    }
}

/// Which pieces of terminal state to acquire.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TerminalOptions {
    pub alt_screen: bool,
    pub hide_cursor: bool,
    pub raw_input: bool,
}

/// Scoped acquisition of terminal state.
///
/// The preamble runs on entry; the postamble reverses it in strict LIFO
/// order and runs on every exit path, including panic, via `Drop`. Both
/// are idempotent — `restore` can be called explicitly to observe write
/// errors, and the destructor becomes a no-op afterwards.
pub(crate) struct TerminalGuard<'a, W: Write> {
    out: &'a mut W,
    alt_screen: bool,
    cursor_hidden: bool,
    raw_input: bool,
    restored: bool,
}

impl<'a, W: Write> TerminalGuard<'a, W> {
    pub fn enter(out: &'a mut W, opts: TerminalOptions) -> std::io::Result<Self> {
        // Acquisition order: screen, cursor, input. Release runs reversed.
        if opts.alt_screen {
            out.write_all(ansi::ALT_SCREEN_ENTER.as_bytes())?;
            out.write_all(ansi::CLEAR_SCREEN.as_bytes())?;
        }
        if opts.hide_cursor {
            out.write_all(ansi::CURSOR_HIDE.as_bytes())?;
        }
        out.flush()?;

        let raw_input = if opts.raw_input {
            match crossterm::terminal::enable_raw_mode() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("raw mode unavailable, keys disabled: {e}");
                    false
                }
            }
        } else {
            false
        };

        Ok(Self {
            out,
            alt_screen: opts.alt_screen,
            cursor_hidden: opts.hide_cursor,
            raw_input,
            restored: false,
        })
    }

    /// The wrapped writer.
    pub fn out(&mut self) -> &mut W {
        self.out
    }

    /// Whether raw input was actually acquired.
    pub fn raw_input(&self) -> bool {
        self.raw_input
    }

    /// Runs the postamble now, surfacing write errors. Idempotent.
    pub fn restore(&mut self) -> std::io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        if self.raw_input {
            if let Err(e) = crossterm::terminal::disable_raw_mode() {
                log::warn!("failed to leave raw mode: {e}");
            }
        }
        self.out.write_all(ansi::RESET.as_bytes())?;
        if self.cursor_hidden {
            self.out.write_all(ansi::CURSOR_SHOW.as_bytes())?;
        }
        if self.alt_screen {
            self.out.write_all(ansi::ALT_SCREEN_EXIT.as_bytes())?;
        }
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<'_, W> {
    fn drop(&mut self) {
        // Errors are unreportable here; restore() exists for callers that
        // want them.
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> TerminalOptions {
        TerminalOptions {
            alt_screen: true,
            hide_cursor: true,
            raw_input: false,
        }
    }

    #[test]
    fn preamble_and_postamble_are_lifo() {
        let mut out = Vec::new();
        {
            let mut guard = TerminalGuard::enter(&mut out, opts()).unwrap();
            guard.restore().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let enter_alt = text.find("\x1b[?1049h").unwrap();
        let hide = text.find("\x1b[?25l").unwrap();
        let show = text.find("\x1b[?25h").unwrap();
        let exit_alt = text.find("\x1b[?1049l").unwrap();
        assert!(enter_alt < hide && hide < show && show < exit_alt);
    }

    #[test]
    fn drop_restores_without_explicit_call() {
        let mut out = Vec::new();
        {
            let _guard = TerminalGuard::enter(&mut out, opts()).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?25h"));
        assert!(text.contains("\x1b[?1049l"));
    }

    #[test]
    fn restore_is_idempotent() {
        let mut out = Vec::new();
        let mut guard = TerminalGuard::enter(&mut out, opts()).unwrap();
        guard.restore().unwrap();
        guard.restore().unwrap();
        drop(guard);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1b[?1049l").count(), 1);
    }

    #[test]
    fn disabled_pieces_stay_untouched() {
        let mut out = Vec::new();
        {
            let _guard = TerminalGuard::enter(
                &mut out,
                TerminalOptions {
                    alt_screen: false,
                    hide_cursor: false,
                    raw_input: false,
                },
            )
            .unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("\x1b[?1049"));
        assert!(!text.contains("\x1b[?25"));
    }

    #[test]
    fn sync_mode_resolution() {
        assert!(SyncMode::Always.resolved());
        assert!(!SyncMode::Never.resolved());
    }
}
