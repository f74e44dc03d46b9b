//! Median-cut palette quantization.
//!
//! Used by the renderers when a color-count cap is configured: the cell
//! colors of a frame are reduced to `n` representative colors, then each
//! cell snaps to its nearest palette entry. Fewer distinct colors means
//! fewer SGR escapes and smaller documents.

use crate::Color;

/// Reduces `colors` to at most `target` representative colors via median cut.
///
/// The box with the widest channel range is split at the median of that
/// channel until `target` boxes exist, then each box is averaged. Duplicate
/// input colors are fine and weight the averages naturally.
///
/// Returns an empty palette for empty input; returns the input unchanged
/// (deduplicated order not guaranteed) when it already has at most `target`
/// distinct colors.
///
/// # Examples
///
/// ```
/// use glyphcast_color::{quantize::quantize_palette, Color};
///
/// let colors = vec![
///     Color::rgb(250, 10, 10),
///     Color::rgb(245, 5, 5),
///     Color::rgb(10, 10, 250),
///     Color::rgb(5, 5, 245),
/// ];
/// let palette = quantize_palette(&colors, 2);
/// assert_eq!(palette.len(), 2);
/// ```
pub fn quantize_palette(colors: &[Color], target: usize) -> Vec<Color> {
    if colors.is_empty() || target == 0 {
        return Vec::new();
    }

    let mut distinct: Vec<Color> = colors.to_vec();
    distinct.sort_by_key(|c| (c.r, c.g, c.b));
    distinct.dedup_by_key(|c| (c.r, c.g, c.b));
    if distinct.len() <= target {
        return distinct;
    }

    let mut boxes: Vec<Vec<Color>> = vec![colors.to_vec()];
    while boxes.len() < target {
        // Split the box with the widest channel range.
        let (idx, channel) = match boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .map(|(i, b)| {
                let (ch, range) = widest_channel(b);
                (i, ch, range)
            })
            .max_by_key(|&(_, _, range)| range)
        {
            Some((i, ch, range)) if range > 0 => (i, ch),
            _ => break,
        };

        let mut bucket = boxes.swap_remove(idx);
        bucket.sort_by_key(|c| channel_value(*c, channel));
        let mid = bucket.len() / 2;
        let hi = bucket.split_off(mid);
        boxes.push(bucket);
        boxes.push(hi);
    }

    boxes.iter().map(|b| average(b)).collect()
}

/// Returns the palette entry nearest to `color` in RGB distance.
///
/// Ties resolve to the earlier palette entry. Panics on an empty palette —
/// callers guarantee a non-empty palette by construction.
pub fn nearest_in_palette(palette: &[Color], color: Color) -> Color {
    debug_assert!(!palette.is_empty());
    let mut best = palette[0];
    let mut best_dist = f32::INFINITY;
    for &entry in palette {
        let d = entry.distance(color);
        if d < best_dist {
            best_dist = d;
            best = entry;
        }
    }
    best
}

fn widest_channel(colors: &[Color]) -> (u8, u32) {
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for c in colors {
        for (i, v) in [c.r, c.g, c.b].into_iter().enumerate() {
            min[i] = min[i].min(v);
            max[i] = max[i].max(v);
        }
    }
    let ranges = [
        max[0] as u32 - min[0] as u32,
        max[1] as u32 - min[1] as u32,
        max[2] as u32 - min[2] as u32,
    ];
    let channel = ranges
        .iter()
        .enumerate()
        .max_by_key(|&(_, r)| *r)
        .map(|(i, _)| i as u8)
        .unwrap_or(0);
    (channel, ranges[channel as usize])
}

fn channel_value(c: Color, channel: u8) -> u8 {
    match channel {
        0 => c.r,
        1 => c.g,
        _ => c.b,
    }
}

fn average(colors: &[Color]) -> Color {
    if colors.is_empty() {
        return Color::BLACK;
    }
    let n = colors.len() as u32;
    let sum = colors.iter().fold([0u32; 3], |acc, c| {
        [acc[0] + c.r as u32, acc[1] + c.g as u32, acc[2] + c.b as u32]
    });
    Color::rgb(
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    )
}
