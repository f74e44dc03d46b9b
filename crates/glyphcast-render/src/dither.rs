//! Binarization for the braille renderer: Otsu thresholding and Atkinson
//! error diffusion.

/// Computes a global threshold by Otsu's method.
///
/// Builds a 256-bin histogram and picks the split maximizing between-class
/// variance `ω₀·ω₁·(μ₀−μ₁)²`. Degenerate inputs (empty, or a single gray
/// level) fall back to 128.
///
/// # Examples
///
/// ```
/// use glyphcast_render::otsu_threshold;
///
/// // Two well-separated populations split between them.
/// let mut values = vec![10u8; 100];
/// values.extend(vec![200u8; 100]);
/// let t = otsu_threshold(&values);
/// assert!(t > 10 && t <= 200);
/// ```
pub fn otsu_threshold(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 128;
    }

    let mut histogram = [0u64; 256];
    for &v in values {
        histogram[v as usize] += 1;
    }

    let total = values.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * n as f64)
        .sum();

    let mut best_t = 128u8;
    let mut best_variance = -1.0f64;
    let mut weight_bg = 0.0f64;
    let mut sum_bg = 0.0f64;

    for t in 0..256usize {
        weight_bg += histogram[t] as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += t as f64 * histogram[t] as f64;

        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (total_sum - sum_bg) / weight_fg;
        let diff = mean_bg - mean_fg;
        let variance = weight_bg * weight_fg * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_t = t as u8;
        }
    }

    if best_variance < 0.0 {
        128
    } else {
        // The scan found the last background bin; threshold sits above it.
        best_t.saturating_add(1)
    }
}

/// Applies Atkinson error diffusion in place, binarizing to {0, 255}.
///
/// The quantization error of each pixel diffuses by e/8 to six unvisited
/// neighbors: `(+1,0) (+2,0) (−1,+1) (0,+1) (+1,+1) (0,+2)`. Only 6/8 of
/// the error propagates; the deliberate loss keeps edges crisp at this bit
/// depth where Floyd–Steinberg would smear.
pub fn atkinson_dither(values: &mut [u8], width: u32, height: u32, threshold: u8) {
    debug_assert_eq!(values.len(), (width * height) as usize);
    if width == 0 || height == 0 {
        return;
    }

    const NEIGHBORS: [(i64, i64); 6] = [(1, 0), (2, 0), (-1, 1), (0, 1), (1, 1), (0, 2)];

    // Errors accumulate beyond u8 range mid-scan, so diffuse in i16.
    let mut field: Vec<i16> = values.iter().map(|&v| v as i16).collect();

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let idx = (y * width as i64 + x) as usize;
            let old = field[idx];
            let new = if old >= threshold as i16 { 255 } else { 0 };
            field[idx] = new;
            values[idx] = new as u8;

            let err = (old - new) / 8;
            if err == 0 {
                continue;
            }
            for (dx, dy) in NEIGHBORS {
                let nx = x + dx;
                let ny = y + dy;
                if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                    field[(ny * width as i64 + nx) as usize] += err;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otsu_separates_bimodal_histogram() {
        let mut values = vec![30u8; 500];
        values.extend(vec![220u8; 500]);
        let t = otsu_threshold(&values);
        assert!(t > 30 && t <= 220, "threshold {t} outside the gap");
    }

    #[test]
    fn otsu_handles_uniform_input() {
        let values = vec![77u8; 64];
        // No variance anywhere; any answer is fine as long as it's stable.
        let a = otsu_threshold(&values);
        let b = otsu_threshold(&values);
        assert_eq!(a, b);
    }

    #[test]
    fn otsu_handles_empty_input() {
        assert_eq!(otsu_threshold(&[]), 128);
    }

    #[test]
    fn dither_output_is_binary() {
        let mut values: Vec<u8> = (0..64 * 64).map(|i| (i % 251) as u8).collect();
        atkinson_dither(&mut values, 64, 64, 128);
        assert!(values.iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn dither_preserves_mean_roughly() {
        // A mid-gray field should come out about half lit.
        let mut values = vec![128u8; 32 * 32];
        atkinson_dither(&mut values, 32, 32, 128);
        let lit = values.iter().filter(|&&v| v == 255).count();
        let ratio = lit as f32 / values.len() as f32;
        // Atkinson deliberately leaks some error, so the tolerance is loose.
        assert!((0.3..=0.8).contains(&ratio), "lit ratio {ratio}");
    }

    #[test]
    fn extremes_stay_extreme() {
        let mut values = vec![0u8; 16 * 16];
        atkinson_dither(&mut values, 16, 16, 128);
        assert!(values.iter().all(|&v| v == 0));

        let mut values = vec![255u8; 16 * 16];
        atkinson_dither(&mut values, 16, 16, 128);
        assert!(values.iter().all(|&v| v == 255));
    }

    #[test]
    fn zero_sized_input_is_a_no_op() {
        let mut values: Vec<u8> = Vec::new();
        atkinson_dither(&mut values, 0, 0, 128);
    }
}
