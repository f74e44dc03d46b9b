//! Renders an image file to the terminal in any mode.
//!
//! ```sh
//! cargo run --example render_image -- photo.png braille
//! ```

use anyhow::{bail, Context, Result};
use glyphcast::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: render_image <path> [ascii|blocks|braille|matrix]");
    };
    let mode: RenderMode = args
        .next()
        .unwrap_or_else(|| "ascii".to_string())
        .parse()
        .context("unknown render mode")?;

    let img = image::open(&path)
        .with_context(|| format!("cannot open {path}"))?
        .to_rgba8();

    let mut opts = RenderOptions::default();
    if let Some((w, h)) = terminal_size() {
        opts.max_width = w.saturating_sub(1).max(1) as u32;
        opts.max_height = h.saturating_sub(2).max(1) as u32;
    }

    let frame = render(&img, mode, &opts)?;
    print!("{}", frame.to_ansi(opts.use_color));
    Ok(())
}

fn terminal_size() -> Option<(u16, u16)> {
    crossterm::terminal::size().ok()
}
