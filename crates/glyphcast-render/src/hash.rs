//! Perceptual frame hashing.

use image::{imageops, imageops::FilterType, RgbaImage};

/// A 64-bit perceptual hash of a frame image.
///
/// The image reduces to an 8×8 grayscale thumbnail; bit `i` is set when
/// pixel `i` is at least as bright as the thumbnail mean. Hamming distance
/// between hashes approximates visual dissimilarity, which is how the
/// animation pipeline detects duplicate and near-duplicate frames without
/// comparing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHash(
    /// The raw 64-bit pattern.
    pub u64,
);

impl FrameHash {
    /// Hashes an image.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_render::FrameHash;
    /// use image::RgbaImage;
    ///
    /// let black = RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 0, 255]));
    /// let white = RgbaImage::from_pixel(32, 32, image::Rgba([255, 255, 255, 255]));
    /// assert_eq!(FrameHash::of(&black).hamming(FrameHash::of(&black)), 0);
    /// ```
    pub fn of(img: &RgbaImage) -> Self {
        if img.width() == 0 || img.height() == 0 {
            return Self(0);
        }

        let thumb = imageops::resize(img, 8, 8, FilterType::Triangle);
        let mut gray = [0.0f32; 64];
        for (i, p) in thumb.pixels().enumerate() {
            gray[i] = 0.2126 * p.0[0] as f32 + 0.7152 * p.0[1] as f32 + 0.0722 * p.0[2] as f32;
        }
        let mean = gray.iter().sum::<f32>() / 64.0;

        let mut bits = 0u64;
        for (i, &v) in gray.iter().enumerate() {
            if v >= mean {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    /// Number of differing bits — 0 for identical hashes, up to 64.
    pub fn hamming(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(w: u32, h: u32, horizontal: bool) -> RgbaImage {
        let mut img = RgbaImage::new(w, h);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let t = if horizontal { x * 255 / w.max(1) } else { y * 255 / h.max(1) };
            *p = Rgba([t as u8, t as u8, t as u8, 255]);
        }
        img
    }

    #[test]
    fn identical_images_hash_identically() {
        let a = gradient(64, 64, true);
        let b = gradient(64, 64, true);
        assert_eq!(FrameHash::of(&a), FrameHash::of(&b));
    }

    #[test]
    fn hash_survives_rescaling() {
        let small = gradient(32, 32, true);
        let large = gradient(256, 256, true);
        let d = FrameHash::of(&small).hamming(FrameHash::of(&large));
        assert!(d <= 6, "rescale moved {d} bits");
    }

    #[test]
    fn different_structure_is_far_apart() {
        let horizontal = gradient(64, 64, true);
        let vertical = gradient(64, 64, false);
        let d = FrameHash::of(&horizontal).hamming(FrameHash::of(&vertical));
        assert!(d > 16, "distinct images only {d} bits apart");
    }

    #[test]
    fn empty_image_hashes_to_zero() {
        assert_eq!(FrameHash::of(&RgbaImage::new(0, 0)), FrameHash(0));
    }
}
