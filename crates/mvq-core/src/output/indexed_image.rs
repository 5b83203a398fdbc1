//! IndexedImage: palette indices plus the palette they point into.
//!
//! [`IndexedImage`] is the index-producing counterpart of in-place
//! quantization. Instead of overwriting pixels with colors it keeps one `u8`
//! per pixel, which is what indexed formats store.

use crate::palette::Palette;

/// A quantized image stored as palette indices.
///
/// Indices are row-major, one per pixel, and always address an entry of
/// [`palette()`](IndexedImage::palette) unless the image is empty.
///
/// # Example
///
/// ```
/// use mvq_core::{IndexedImage, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.indices(), &[0, 1, 1, 0]);
/// assert_eq!(image.to_packed(), vec![0x000000, 0xffffff, 0xffffff, 0x000000]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Create a new `IndexedImage`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Split into indices and palette.
    pub fn into_parts(self) -> (Vec<u8>, Palette) {
        (self.indices, self.palette)
    }

    /// Expand to packed `0x00RRGGBB` pixels.
    pub fn to_packed(&self) -> Vec<u32> {
        self.indices
            .iter()
            .map(|&idx| self.palette.color(idx as usize).to_packed())
            .collect()
    }

    /// Expand to RGB bytes in `[R, G, B, R, G, B, ...]` layout.
    ///
    /// The returned buffer has length `width * height * 3`.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&self.palette.color(idx as usize).to_bytes());
        }
        rgb
    }

    /// The PLTE-style palette bytes, three per entry.
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette
            .colors()
            .iter()
            .flat_map(|c| c.to_bytes())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn two_color() -> Palette {
        Palette::new(&[Rgb::from_u8(10, 20, 30), Rgb::from_u8(200, 100, 50)]).unwrap()
    }

    #[test]
    fn test_accessors() {
        let image = IndexedImage::new(vec![1, 0, 1], 3, 1, two_color());
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 1);
        assert_eq!(image.palette().len(), 2);
    }

    #[test]
    fn test_to_rgb_layout() {
        let image = IndexedImage::new(vec![1, 0], 2, 1, two_color());
        assert_eq!(image.to_rgb(), vec![200, 100, 50, 10, 20, 30]);
    }

    #[test]
    fn test_palette_bytes() {
        let image = IndexedImage::new(vec![0], 1, 1, two_color());
        assert_eq!(image.palette_bytes(), vec![10, 20, 30, 200, 100, 50]);
    }

    #[test]
    fn test_into_parts() {
        let image = IndexedImage::new(vec![0, 1], 1, 2, two_color());
        let (indices, palette) = image.into_parts();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(palette, two_color());
    }
}
