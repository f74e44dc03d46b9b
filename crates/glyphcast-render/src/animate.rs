//! Rendering animated sources frame by frame.

use glyphcast_frame::Frame;
use image::RgbaImage;

use crate::error::Result;
use crate::matrix::{MatrixOptions, MatrixRenderer};
use crate::mode::{render, RenderMode};
use crate::options::RenderOptions;
use crate::stability::stabilize_colors;

/// The contract an external decoder fulfills: pull the next RGBA frame and
/// its nominal delay. The decoder owns timebase conversion and frame
/// dropping; the renderer accepts whatever cadence it gets.
pub trait FrameSource {
    /// The next decoded frame as `(pixels, delay_ms)`, or `None` at the end
    /// of the stream.
    fn next_frame(&mut self) -> Option<(RgbaImage, u32)>;
}

impl<I> FrameSource for I
where
    I: Iterator<Item = (RgbaImage, u32)>,
{
    fn next_frame(&mut self) -> Option<(RgbaImage, u32)> {
        self.next()
    }
}

/// Renders a stream of source images into frames, carrying the state
/// animation needs: the temporal color stabilizer and, in matrix mode, the
/// cascade.
///
/// # Example
///
/// ```
/// use glyphcast_render::{AnimationRenderer, RenderMode, RenderOptions};
/// use image::RgbaImage;
///
/// let mut opts = RenderOptions::for_animation(1);
/// opts.max_width = 10;
/// opts.max_height = 5;
/// let mut renderer = AnimationRenderer::new(RenderMode::Ascii, opts).unwrap();
///
/// let img = RgbaImage::from_pixel(32, 32, image::Rgba([200, 200, 200, 255]));
/// let frame = renderer.render_next(&img, 40);
/// assert_eq!(frame.delay_ms(), 40);
/// ```
pub struct AnimationRenderer {
    mode: RenderMode,
    opts: RenderOptions,
    prev: Option<Frame>,
    cascade: Option<MatrixRenderer>,
}

impl AnimationRenderer {
    /// Validates the options once and creates the renderer.
    pub fn new(mode: RenderMode, opts: RenderOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            mode,
            opts,
            prev: None,
            cascade: None,
        })
    }

    /// Renders one source frame, attaching `delay_ms` and applying temporal
    /// color stabilization when the options enable it.
    pub fn render_next(&mut self, img: &RgbaImage, delay_ms: u32) -> Frame {
        let frame = match self.mode {
            RenderMode::Matrix => {
                let cascade = self.cascade.get_or_insert_with(|| {
                    MatrixRenderer::new(img, MatrixOptions::from(&self.opts))
                });
                cascade.update_source(img);
                cascade.tick()
            }
            _ => render(img, self.mode, &self.opts)
                .expect("options were validated at construction"),
        }
        .with_delay(delay_ms);

        let frame = match (&self.prev, self.opts.stabilize) {
            (Some(prev), true) => {
                stabilize_colors(prev, &frame, self.opts.stability_threshold)
            }
            _ => frame,
        };

        self.prev = Some(frame.clone());
        frame
    }

    /// Drains a decoder into rendered frames.
    pub fn render_all<S: FrameSource>(&mut self, mut source: S) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some((img, delay_ms)) = source.next_frame() {
            frames.push(self.render_next(&img, delay_ms));
        }
        frames
    }
}
