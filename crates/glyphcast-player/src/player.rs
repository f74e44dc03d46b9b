//! The animation player.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use glyphcast_frame::{ansi, Frame};

use crate::cancel::CancelToken;
use crate::delta::DeltaRenderer;
use crate::error::Result;
use crate::terminal::{SyncMode, TerminalGuard, TerminalOptions};

/// Longest single sleep between cancel/key checks.
const POLL_SLICE: Duration = Duration::from_millis(50);

/// Fallback delay for frames that carry none.
const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Playback configuration.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Speed multiplier; nominal delays divide by this.
    pub speed: f32,
    /// How many times to run the sequence; 0 loops forever.
    pub loop_count: u32,
    /// Emit color escapes.
    pub use_color: bool,
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Hide the cursor during playback.
    pub hide_cursor: bool,
    /// Emit only changed cells after the first frame.
    pub delta: bool,
    /// Synchronized-output policy.
    pub sync: SyncMode,
    /// Poll the keyboard for pause/quit and react to resizes. Requires a
    /// real terminal; leave off when writing to a buffer or a pipe.
    pub interactive: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            loop_count: 1,
            use_color: true,
            alt_screen: true,
            hide_cursor: true,
            delta: true,
            sync: SyncMode::Auto,
            interactive: true,
        }
    }
}

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The sequence (and all loops) ran to completion.
    Completed,
    /// The user quit (`q`, `Esc`, Ctrl-C) or the cancel token fired.
    Cancelled,
}

/// A frame that is already a byte-exact terminal payload — the document
/// player's input. Content is written verbatim after the cursor is homed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerenderedFrame {
    /// Full ANSI serialization of the frame.
    pub content: String,
    /// Nominal delay before the next frame.
    pub delay_ms: u32,
}

/// Plays frame sequences on a terminal.
///
/// The player owns the writer for its lifetime — nothing else may write to
/// the terminal while playback runs. Frame pacing uses absolute deadlines:
/// each deadline is the previous one plus the nominal delay over speed, so
/// a slow frame eats its own slack instead of delaying every successor.
/// A frame that overruns re-bases the clock at the overrun (catch-up, not
/// pile-up).
pub struct Player<W: Write> {
    out: W,
    opts: PlayerOptions,
    delta: DeltaRenderer,
    cancel: CancelToken,
}

impl<W: Write> Player<W> {
    /// Creates a player writing to `out`.
    pub fn new(out: W, opts: PlayerOptions) -> Self {
        Self {
            out,
            opts,
            delta: DeltaRenderer::new(),
            cancel: CancelToken::new(),
        }
    }

    /// A token that cancels this player from another thread or handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Consumes the player, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Plays a materialized frame sequence, honoring the loop count.
    pub fn play(&mut self, frames: &[Frame]) -> Result<PlayOutcome> {
        self.run(|emit| {
            let mut iteration = 0u32;
            loop {
                for frame in frames {
                    match emit.frame(frame)? {
                        Step::Continue => {}
                        Step::Stop => return Ok(PlayOutcome::Cancelled),
                    }
                }
                iteration += 1;
                if emit.opts.loop_count != 0 && iteration >= emit.opts.loop_count {
                    return Ok(PlayOutcome::Completed);
                }
                if frames.is_empty() {
                    return Ok(PlayOutcome::Completed);
                }
            }
        })
    }

    /// Plays a single pass over a frame producer (a live decoder). The
    /// producer is polled between frames, after the cancel check.
    pub fn play_iter<I>(&mut self, frames: I) -> Result<PlayOutcome>
    where
        I: IntoIterator<Item = Frame>,
    {
        self.run(|emit| {
            for frame in frames {
                match emit.frame(&frame)? {
                    Step::Continue => {}
                    Step::Stop => return Ok(PlayOutcome::Cancelled),
                }
            }
            Ok(PlayOutcome::Completed)
        })
    }

    /// Plays prerendered frame payloads (loaded documents), honoring the
    /// loop count. Content is emitted verbatim; delta diffing does not
    /// apply.
    pub fn play_prerendered(&mut self, frames: &[PrerenderedFrame]) -> Result<PlayOutcome> {
        self.run(|emit| {
            let mut iteration = 0u32;
            loop {
                for frame in frames {
                    match emit.raw(&frame.content, frame.delay_ms)? {
                        Step::Continue => {}
                        Step::Stop => return Ok(PlayOutcome::Cancelled),
                    }
                }
                iteration += 1;
                if emit.opts.loop_count != 0 && iteration >= emit.opts.loop_count {
                    return Ok(PlayOutcome::Completed);
                }
                if frames.is_empty() {
                    return Ok(PlayOutcome::Completed);
                }
            }
        })
    }

    fn run<F>(&mut self, body: F) -> Result<PlayOutcome>
    where
        F: FnOnce(&mut Emitter<'_, W>) -> Result<PlayOutcome>,
    {
        self.delta.reset();
        let sync = self.opts.sync.resolved();
        let guard = TerminalGuard::enter(
            &mut self.out,
            TerminalOptions {
                alt_screen: self.opts.alt_screen,
                hide_cursor: self.opts.hide_cursor,
                raw_input: self.opts.interactive,
            },
        )?;
        let interactive = self.opts.interactive && guard.raw_input();

        let mut emitter = Emitter {
            guard,
            opts: &self.opts,
            delta: &mut self.delta,
            cancel: &self.cancel,
            sync,
            interactive,
            deadline: Instant::now(),
        };

        let outcome = body(&mut emitter);

        // Surface postamble errors on the success path; on error paths the
        // Drop impl restores best-effort.
        let mut guard = emitter.guard;
        match outcome {
            Ok(outcome) => {
                guard.restore()?;
                Ok(outcome)
            }
            Err(e) => {
                let _ = guard.restore();
                Err(e)
            }
        }
    }
}

enum Step {
    Continue,
    Stop,
}

struct Emitter<'a, W: Write> {
    guard: TerminalGuard<'a, W>,
    opts: &'a PlayerOptions,
    delta: &'a mut DeltaRenderer,
    cancel: &'a CancelToken,
    sync: bool,
    interactive: bool,
    deadline: Instant,
}

impl<W: Write> Emitter<'_, W> {
    fn frame(&mut self, frame: &Frame) -> Result<Step> {
        let payload = if self.opts.delta {
            self.delta.encode(frame, self.opts.use_color)
        } else {
            frame.to_ansi(self.opts.use_color)
        };
        self.write_frame(&payload)?;
        self.pace(frame.delay_ms())
    }

    fn raw(&mut self, content: &str, delay_ms: u32) -> Result<Step> {
        self.write_frame(content)?;
        self.pace(delay_ms)
    }

    fn write_frame(&mut self, payload: &str) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Ok(());
        }
        let sync = self.sync;
        let out = self.guard.out();
        if sync {
            out.write_all(ansi::SYNC_BEGIN.as_bytes())?;
        }
        out.write_all(ansi::CURSOR_HOME.as_bytes())?;
        out.write_all(payload.as_bytes())?;
        if sync {
            out.write_all(ansi::SYNC_END.as_bytes())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Sleeps toward the next absolute deadline, servicing keys and the
    /// cancel token.
    fn pace(&mut self, delay_ms: u32) -> Result<Step> {
        let nominal = if delay_ms == 0 {
            DEFAULT_DELAY
        } else {
            Duration::from_millis(delay_ms as u64)
        };
        self.deadline += nominal.div_f32(self.opts.speed.max(f32::MIN_POSITIVE));

        loop {
            if self.cancel.is_cancelled() {
                return Ok(Step::Stop);
            }
            let now = Instant::now();
            let Some(remaining) = self.deadline.checked_duration_since(now) else {
                break;
            };
            if remaining.is_zero() {
                break;
            }
            let slice = remaining.min(POLL_SLICE);

            if self.interactive {
                match self.poll_keys(slice)? {
                    Step::Continue => {}
                    Step::Stop => return Ok(Step::Stop),
                }
            } else {
                std::thread::sleep(slice);
            }
        }

        // Catch-up: an overrun re-bases the clock instead of compounding.
        let now = Instant::now();
        if now > self.deadline {
            self.deadline = now;
        }
        Ok(Step::Continue)
    }

    fn poll_keys(&mut self, timeout: Duration) -> Result<Step> {
        if !event::poll(timeout)? {
            return Ok(Step::Continue);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Ok(Step::Stop),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Ok(Step::Stop)
                }
                KeyCode::Char(' ') => self.pause(),
                _ => Ok(Step::Continue),
            },
            Event::Resize(w, h) => {
                log::debug!("terminal resized to {w}x{h}, scheduling full redraw");
                self.delta.reset();
                Ok(Step::Continue)
            }
            _ => Ok(Step::Continue),
        }
    }

    /// Blocks until space resumes or a quit key fires. Deadlines freeze:
    /// the pause duration shifts the clock.
    fn pause(&mut self) -> Result<Step> {
        let paused_at = Instant::now();
        loop {
            if self.cancel.is_cancelled() {
                return Ok(Step::Stop);
            }
            if event::poll(POLL_SLICE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char(' ') => break,
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(Step::Stop),
                        KeyCode::Char('c')
                            if key.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(Step::Stop)
                        }
                        _ => {}
                    }
                }
            }
        }
        self.deadline += paused_at.elapsed();
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcast_color::Color;
    use glyphcast_frame::Cell;

    fn quiet_opts() -> PlayerOptions {
        PlayerOptions {
            speed: 1.0,
            loop_count: 1,
            use_color: true,
            alt_screen: false,
            hide_cursor: false,
            delta: true,
            sync: SyncMode::Always,
            interactive: false,
        }
    }

    fn tiny_frame(ch: char, delay: u32) -> Frame {
        Frame::from_cells(1, 1, vec![Cell::new(ch)], delay)
    }

    fn play_to_string(frames: &[Frame], opts: PlayerOptions) -> String {
        let mut out = Vec::new();
        {
            let mut player = Player::new(&mut out, opts);
            player.play(frames).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn frames_are_bracketed_by_sync_markers() {
        let text = play_to_string(&[tiny_frame('a', 1), tiny_frame('b', 1)], quiet_opts());
        assert_eq!(text.matches("\x1b[?2026h").count(), 2);
        assert_eq!(text.matches("\x1b[?2026l").count(), 2);
        // Home precedes each payload.
        assert_eq!(text.matches("\x1b[1;1H").count(), 2);
    }

    #[test]
    fn sync_never_emits_no_brackets() {
        let mut opts = quiet_opts();
        opts.sync = SyncMode::Never;
        let text = play_to_string(&[tiny_frame('a', 1)], opts);
        assert!(!text.contains("\x1b[?2026"));
    }

    #[test]
    fn identical_frames_emit_no_glyphs_between_brackets() {
        let frame = tiny_frame('z', 1);
        let text = play_to_string(&[frame.clone(), frame], quiet_opts());
        let second = text.rsplit("\x1b[?2026h").next().unwrap();
        let payload = second
            .split("\x1b[?2026l")
            .next()
            .unwrap()
            .strip_prefix("\x1b[1;1H")
            .unwrap();
        assert_eq!(payload, "\x1b[0m");
    }

    #[test]
    fn loop_count_repeats_the_sequence() {
        let mut opts = quiet_opts();
        opts.loop_count = 3;
        opts.delta = false;
        let text = play_to_string(&[tiny_frame('x', 1)], opts);
        assert_eq!(text.matches('x').count(), 3);
    }

    #[test]
    fn cancelled_player_stops_early() {
        let mut out = Vec::new();
        let mut opts = quiet_opts();
        opts.loop_count = 0; // forever
        let mut player = Player::new(&mut out, opts);
        player.cancel_token().cancel();
        let outcome = player.play(&[tiny_frame('a', 1)]).unwrap();
        assert_eq!(outcome, PlayOutcome::Cancelled);
    }

    #[test]
    fn empty_sequence_completes() {
        let mut out = Vec::new();
        let mut player = Player::new(&mut out, quiet_opts());
        assert_eq!(player.play(&[]).unwrap(), PlayOutcome::Completed);
    }

    #[test]
    fn prerendered_content_is_verbatim() {
        let frames = vec![PrerenderedFrame {
            content: "payload\r\n\x1b[0m".to_string(),
            delay_ms: 1,
        }];
        let mut out = Vec::new();
        {
            let mut player = Player::new(&mut out, quiet_opts());
            player.play_prerendered(&frames).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("payload\r\n\x1b[0m"));
    }

    #[test]
    fn alt_screen_option_changes_only_terminal_state() {
        let frames = vec![tiny_frame('k', 1)];
        let with_alt = {
            let mut opts = quiet_opts();
            opts.alt_screen = true;
            play_to_string(&frames, opts)
        };
        let without_alt = play_to_string(&frames, quiet_opts());
        // Strip the screen-state escapes; the glyph payload must match.
        let stripped: String = with_alt
            .replace("\x1b[?1049h", "")
            .replace("\x1b[?1049l", "")
            .replace("\x1b[2J", "");
        assert_eq!(stripped, without_alt);
    }

    #[test]
    fn pacing_spans_the_nominal_duration() {
        let frames = vec![tiny_frame('a', 30), tiny_frame('b', 30)];
        let start = Instant::now();
        play_to_string(&frames, quiet_opts());
        // Two 30 ms frames at speed 1.
        assert!(start.elapsed() >= Duration::from_millis(55));
    }

    #[test]
    fn speed_divides_delays() {
        let frames = vec![tiny_frame('a', 40), tiny_frame('b', 40)];
        let mut opts = quiet_opts();
        opts.speed = 4.0;
        let start = Instant::now();
        play_to_string(&frames, opts);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(15));
        assert!(elapsed < Duration::from_millis(300));
    }

    #[test]
    fn colored_frames_reset_before_restore() {
        let cells = vec![Cell::new('#').with_fg(Color::RED)];
        let frames = vec![Frame::from_cells(1, 1, cells, 1)];
        let text = play_to_string(&frames, quiet_opts());
        let last_color = text.rfind("\x1b[38;2;255;0;0m").unwrap();
        let last_reset = text.rfind("\x1b[0m").unwrap();
        assert!(last_reset > last_color);
    }
}
