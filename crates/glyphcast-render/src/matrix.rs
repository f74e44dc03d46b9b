//! The digital-rain matrix renderer.
//!
//! Unlike the other arms this renderer is stateful: each column carries a
//! falling head with a fading tail, and successive [`MatrixRenderer::tick`]
//! calls advance the cascade. The source image gates cell intensity, so the
//! rain traces the picture. A still image becomes a synthetic animation at
//! the configured frame rate; for video, feed each decoded frame through
//! [`MatrixRenderer::update_source`] before ticking.

use glyphcast_color::Color;
use glyphcast_frame::{Cell, Frame};
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::options::RenderOptions;
use crate::sizing::Sizing;
use crate::source::SourceView;

/// Rain color selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixColor {
    /// Classic phosphor green (the default).
    Green,
    /// Red tint.
    Red,
    /// Amber tint.
    Amber,
    /// Blue tint.
    Blue,
    /// Cyan tint.
    Cyan,
    /// Purple tint.
    Purple,
    /// An arbitrary 24-bit tint.
    Hex(Color),
    /// Derive each cell's color from the source image.
    Source,
}

impl MatrixColor {
    /// Parses a palette name or a `#RRGGBB` hex string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "green" => Some(Self::Green),
            "red" => Some(Self::Red),
            "amber" => Some(Self::Amber),
            "blue" => Some(Self::Blue),
            "cyan" => Some(Self::Cyan),
            "purple" => Some(Self::Purple),
            "source" | "full" => Some(Self::Source),
            hex => {
                let hex = hex.strip_prefix('#')?;
                if hex.len() != 6 {
                    return None;
                }
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::Hex(Color::rgb(r, g, b)))
            }
        }
    }

    fn base(&self, source: Color) -> Color {
        match self {
            Self::Green => Color::MATRIX_GREEN,
            Self::Red => Color::RED,
            Self::Amber => Color::AMBER,
            Self::Blue => Color::rgb(60, 120, 255),
            Self::Cyan => Color::CYAN,
            Self::Purple => Color::PURPLE,
            Self::Hex(c) => *c,
            Self::Source => source,
        }
    }
}

/// The options slice the matrix arm consumes.
#[derive(Debug, Clone)]
pub struct MatrixOptions {
    /// Sizing rule for the output grid.
    pub sizing: Sizing,
    /// Gamma applied to source brightness.
    pub gamma: f32,
    /// Rain speed multiplier (cells per tick).
    pub speed: f32,
    /// Per-cell glyph reroll probability per tick.
    pub density: f32,
    /// Nominal tail length in cells.
    pub tail_length: u32,
    /// Rain color.
    pub color: MatrixColor,
    /// Custom glyph alphabet; `None` uses katakana + digits.
    pub alphabet: Option<String>,
    /// Synthetic frame rate for still images.
    pub fps: u32,
    /// RNG seed for reproducible cascades.
    pub seed: Option<u64>,
}

impl From<&RenderOptions> for MatrixOptions {
    fn from(opts: &RenderOptions) -> Self {
        Self {
            sizing: opts.sizing(),
            gamma: opts.gamma,
            speed: opts.speed,
            density: 0.02,
            tail_length: 12,
            color: MatrixColor::Green,
            alphabet: None,
            fps: 20,
            seed: None,
        }
    }
}

/// Intensity below which a cell goes dark instead of carrying a glyph.
const MIN_INTENSITY: f32 = 0.02;

struct Column {
    head: f32,
    tail: u32,
    velocity: f32,
}

/// Per-column digital-rain state machine over a source brightness field.
pub struct MatrixRenderer {
    opts: MatrixOptions,
    cols: u32,
    rows: u32,
    columns: Vec<Column>,
    glyphs: Vec<char>,
    brightness: Vec<f32>,
    source_colors: Vec<Color>,
    alphabet: Vec<char>,
    rng: StdRng,
}

impl MatrixRenderer {
    /// Creates a renderer sized for `img` under the given options.
    pub fn new(img: &RgbaImage, opts: MatrixOptions) -> Self {
        let (cols, rows) = opts.sizing.resolve(img.width(), img.height());
        let mut rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let alphabet: Vec<char> = match &opts.alphabet {
            Some(s) if !s.is_empty() => s.chars().collect(),
            _ => default_alphabet(),
        };

        let columns = (0..cols)
            .map(|_| Column {
                head: -(rng.random_range(0..rows.max(1) * 2) as f32),
                tail: jitter_tail(&mut rng, opts.tail_length),
                velocity: 0.5 + rng.random::<f32>(),
            })
            .collect();

        let glyphs = (0..(cols * rows) as usize)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect();

        let mut renderer = Self {
            opts,
            cols,
            rows,
            columns,
            glyphs,
            brightness: Vec::new(),
            source_colors: Vec::new(),
            alphabet,
            rng,
        };
        renderer.update_source(img);
        renderer
    }

    /// The resolved cell grid.
    pub fn grid(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    /// Replaces the brightness field with a new source frame (video input).
    pub fn update_source(&mut self, img: &RgbaImage) {
        let view = SourceView::from_image(img, self.cols, self.rows, self.opts.gamma);
        self.brightness = view.brightness;
        self.source_colors = view.colors;
    }

    /// Advances the cascade one step and renders it.
    pub fn tick(&mut self) -> Frame {
        if self.cols == 0 || self.rows == 0 {
            return Frame::empty();
        }

        self.advance_columns();
        self.reroll_glyphs();

        let delay = 1000 / self.opts.fps.max(1);
        let mut cells = vec![Cell::blank(); (self.cols * self.rows) as usize];
        for x in 0..self.cols {
            let column = &self.columns[x as usize];
            let head_row = column.head.round() as i64;
            for y in 0..self.rows {
                let dist = head_row - y as i64;
                if dist < 0 || dist > column.tail as i64 {
                    continue;
                }
                let idx = (y * self.cols + x) as usize;
                let fade = if dist == 0 {
                    1.0
                } else {
                    1.0 - dist as f32 / (column.tail + 1) as f32
                };
                let intensity = fade * self.brightness[idx];
                if intensity < MIN_INTENSITY {
                    continue;
                }

                let base = self.opts.color.base(self.source_colors[idx]);
                let cell = if dist == 0 {
                    // Leading glyph burns near-white.
                    Cell::new(self.glyphs[idx])
                        .with_fg(base.lerp(Color::WHITE, 0.75).scale(self.brightness[idx].max(0.3)))
                        .with_bold(true)
                } else {
                    Cell::new(self.glyphs[idx]).with_fg(base.scale(intensity))
                };
                cells[idx] = cell;
            }
        }

        Frame::from_cells(self.cols, self.rows, cells, delay)
    }

    /// Renders the next `count` frames of the cascade.
    pub fn frames(&mut self, count: usize) -> Vec<Frame> {
        (0..count).map(|_| self.tick()).collect()
    }

    fn advance_columns(&mut self) {
        let rows = self.rows as f32;
        for column in &mut self.columns {
            column.head += column.velocity * self.opts.speed;
            if column.head - column.tail as f32 > rows {
                column.head = -(self.rng.random_range(0..self.rows.max(1)) as f32);
                column.tail = jitter_tail(&mut self.rng, self.opts.tail_length);
                column.velocity = 0.5 + self.rng.random::<f32>();
            }
        }
    }

    fn reroll_glyphs(&mut self) {
        if self.opts.density <= 0.0 {
            return;
        }
        for glyph in &mut self.glyphs {
            if self.rng.random::<f32>() < self.opts.density {
                *glyph = self.alphabet[self.rng.random_range(0..self.alphabet.len())];
            }
        }
    }
}

fn jitter_tail(rng: &mut StdRng, nominal: u32) -> u32 {
    let nominal = nominal.max(2);
    rng.random_range(nominal / 2..=nominal + nominal / 2).max(1)
}

/// Half-width katakana plus digits, the classic rain repertoire.
fn default_alphabet() -> Vec<char> {
    let mut chars: Vec<char> = (0xFF66u32..=0xFF9D)
        .filter_map(char::from_u32)
        .collect();
    chars.extend('0'..='9');
    chars
}
