//! Plays a synthetic plasma animation — no media files needed.
//!
//! ```sh
//! cargo run --example play_plasma -- braille
//! ```
//!
//! `q` or `Esc` quits, `Space` pauses.

use anyhow::{Context, Result};
use glyphcast::prelude::*;
use image::{Rgba, RgbaImage};

const FRAMES: usize = 120;
const SIZE: u32 = 160;

fn plasma_frame(t: f32) -> RgbaImage {
    let mut img = RgbaImage::new(SIZE, SIZE);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let fx = x as f32 / SIZE as f32 * 8.0;
        let fy = y as f32 / SIZE as f32 * 8.0;
        let v = ((fx + t).sin() + (fy * 0.8 - t * 1.3).cos() + ((fx + fy) * 0.5 + t).sin()) / 3.0;
        let hue = (v * 0.5 + 0.5) * 300.0 + t * 20.0;
        let c = Color::from_hsl(hue % 360.0, 0.9, 0.45 + 0.15 * v);
        *p = Rgba([c.r, c.g, c.b, 255]);
    }
    img
}

fn main() -> Result<()> {
    env_logger::init();

    let mode: RenderMode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "blocks".to_string())
        .parse()
        .context("unknown render mode")?;

    let mut opts = RenderOptions::for_animation(0);
    if let Ok((w, h)) = crossterm::terminal::size() {
        opts.max_width = w.saturating_sub(1).max(2) as u32;
        opts.max_height = h.saturating_sub(1).max(2) as u32;
    }

    let mut frames = Vec::with_capacity(FRAMES);
    let mut prev: Option<Frame> = None;
    for i in 0..FRAMES {
        let t = i as f32 / FRAMES as f32 * std::f32::consts::TAU;
        let mut frame = render(&plasma_frame(t), mode, &opts)?.with_delay(40);
        if let Some(p) = &prev {
            frame = stabilize_colors(p, &frame, opts.stability_threshold);
        }
        prev = Some(frame.clone());
        frames.push(frame);
    }

    let mut player = Player::new(std::io::stdout().lock(), PlayerOptions {
        loop_count: 0,
        ..PlayerOptions::default()
    });
    player.play(&frames)?;
    Ok(())
}
