//! Palette struct with redmean nearest-color matching.
//!
//! A [`Palette`] is the ordered list of bucket averages that survived
//! pruning. Pixels are matched against it with a weighted RGB distance
//! (the "redmean" low-cost approximation) and replaced by the color of the
//! closest entry.

use std::str::FromStr;

use super::error::PaletteError;
use crate::bucket::BucketTable;
use crate::color::Rgb;

/// Largest palette an 8-bit index can address.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Weighted RGB distance between two colors.
///
/// With `rbar` the mean of the two red channels, the distance is
/// `(2 + rbar/256)·dr² + 4·dg² + (2 + (255 - rbar)/256)·db²`.
/// The value is only meaningful for ordering; no square root is taken.
///
/// # Example
///
/// ```
/// use mvq_core::{redmean_distance, Rgb};
///
/// let black = Rgb::BLACK;
/// assert_eq!(redmean_distance(black, black), 0.0);
///
/// // Green differences weigh more than blue ones at low red.
/// let green = Rgb::from_u8(0, 10, 0);
/// let blue = Rgb::from_u8(0, 0, 10);
/// assert!(redmean_distance(black, green) > redmean_distance(black, blue));
/// ```
#[inline]
pub fn redmean_distance(a: Rgb, b: Rgb) -> f32 {
    let rbar = (a.r() as f32 + b.r() as f32) / 2.0;
    let dr = a.r() as i32 - b.r() as i32;
    let dg = a.g() as i32 - b.g() as i32;
    let db = a.b() as i32 - b.b() as i32;
    (2.0 + rbar / 256.0) * (dr * dr) as f32
        + ((dg * dg) << 2) as f32
        + (2.0 + (255.0 - rbar) / 256.0) * (db * db) as f32
}

/// An ordered palette of at most [`MAX_PALETTE_SIZE`] colors.
///
/// Palettes produced by quantization list one entry per surviving bucket in
/// ascending bucket-key order. Entries may also be supplied directly, which
/// is handy for matching against a fixed color set.
///
/// # Example
///
/// ```
/// use mvq_core::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest(Rgb::from_u8(200, 200, 200)), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from explicit colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::TooManyColors`] if more than
    /// [`MAX_PALETTE_SIZE`] colors are supplied.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Build the palette from a pruned bucket table: the rounded average of
    /// every non-empty bucket, in key order.
    ///
    /// The table must already hold no more than [`MAX_PALETTE_SIZE`]
    /// non-empty buckets.
    pub fn from_table(table: &BucketTable) -> Self {
        let colors: Vec<Rgb> = table.averages().collect();
        debug_assert!(
            colors.len() <= MAX_PALETTE_SIZE,
            "palette built from {} buckets",
            colors.len()
        );
        Self { colors }
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"#F00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any hex string is invalid, or
    /// [`PaletteError::TooManyColors`] for more than 256 entries.
    ///
    /// # Example
    ///
    /// ```
    /// use mvq_core::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#F00"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let colors: Vec<Rgb> = colors
            .iter()
            .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(&colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette has no colors.
    ///
    /// Only the palette of an empty image is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All entries in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Find the index of the entry closest to `color` under
    /// [`redmean_distance`].
    ///
    /// Entries are scanned in order and only a strictly smaller distance
    /// replaces the current best, so ties resolve to the lowest index.
    /// Returns `None` for an empty palette.
    pub fn find_nearest(&self, color: Rgb) -> Option<usize> {
        let (first, rest) = self.colors.split_first()?;
        let mut best_idx = 0;
        let mut best_dist = redmean_distance(color, *first);

        for (i, &entry) in rest.iter().enumerate() {
            let dist = redmean_distance(color, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i + 1;
            }
        }

        Some(best_idx)
    }

    /// The nearest entry's color for a packed pixel, as a packed pixel.
    ///
    /// Returns the pixel's own 24-bit color when the palette is empty.
    #[inline]
    pub fn nearest_color(&self, pixel: u32) -> u32 {
        let color = Rgb::from_packed(pixel);
        match self.find_nearest(color) {
            Some(idx) => self.colors[idx].to_packed(),
            None => color.to_packed(),
        }
    }

    /// Overwrite every pixel with the color of its nearest entry.
    ///
    /// With the `threads` feature the pixels are remapped in parallel; the
    /// palette is read-only here so the result is identical.
    pub fn remap(&self, pixels: &mut [u32]) {
        if self.is_empty() {
            return;
        }
        self.remap_pixels(pixels);
    }

    /// Map every pixel to the index of its nearest entry.
    ///
    /// Returns all zeros for an empty palette.
    pub fn indices(&self, pixels: &[u32]) -> Vec<u8> {
        if self.is_empty() {
            return vec![0; pixels.len()];
        }
        self.index_pixels(pixels)
    }

    #[inline]
    fn nearest_index(&self, pixel: u32) -> u8 {
        self.find_nearest(Rgb::from_packed(pixel))
            .map_or(0, |idx| idx as u8)
    }

    #[cfg(not(feature = "threads"))]
    fn remap_pixels(&self, pixels: &mut [u32]) {
        for pixel in pixels.iter_mut() {
            *pixel = self.nearest_color(*pixel);
        }
    }

    #[cfg(feature = "threads")]
    fn remap_pixels(&self, pixels: &mut [u32]) {
        use rayon::prelude::*;
        pixels
            .par_iter_mut()
            .for_each(|pixel| *pixel = self.nearest_color(*pixel));
    }

    #[cfg(not(feature = "threads"))]
    fn index_pixels(&self, pixels: &[u32]) -> Vec<u8> {
        pixels.iter().map(|&p| self.nearest_index(p)).collect()
    }

    #[cfg(feature = "threads")]
    fn index_pixels(&self, pixels: &[u32]) -> Vec<u8> {
        use rayon::prelude::*;
        pixels.par_iter().map(|&p| self.nearest_index(p)).collect()
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_basic_construction() {
        let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE, Rgb::from_u8(255, 0, 0)]).unwrap();
        assert_eq!(palette.len(), 3);
        assert!(!palette.is_empty());
        assert_eq!(palette.color(2), Rgb::from_u8(255, 0, 0));
    }

    #[test]
    fn test_palette_too_many_colors() {
        let colors: Vec<Rgb> = (0..257u32).map(Rgb::from_packed).collect();
        let result = Palette::new(&colors);
        assert!(matches!(
            result,
            Err(PaletteError::TooManyColors { count: 257 })
        ));
        assert!(Palette::new(&colors[..256]).is_ok());
    }

    #[test]
    fn test_palette_from_hex_error() {
        let result = Palette::from_hex(&["#000000", "#12"]);
        assert!(matches!(result, Err(PaletteError::ParseColor(_))));
    }

    #[test]
    fn test_distance_formula() {
        // dr = 10, rbar = 5: (2 + 5/256) * 100
        let d = redmean_distance(Rgb::from_u8(0, 0, 0), Rgb::from_u8(10, 0, 0));
        assert!((d - (2.0 + 5.0 / 256.0) * 100.0).abs() < 1e-3);

        // dg = 3: 4 * 9
        let d = redmean_distance(Rgb::from_u8(0, 0, 0), Rgb::from_u8(0, 3, 0));
        assert_eq!(d, 36.0);

        // db = 2 with rbar = 255: (2 + 0/256) * 4
        let d = redmean_distance(Rgb::from_u8(255, 0, 0), Rgb::from_u8(255, 0, 2));
        assert_eq!(d, 8.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Rgb::from_u8(12, 200, 77);
        let b = Rgb::from_u8(240, 3, 150);
        assert_eq!(redmean_distance(a, b), redmean_distance(b, a));
    }

    #[test]
    fn test_find_nearest_exact_match() {
        let palette = Palette::from_hex(&["#000000", "#808080", "#ffffff"]).unwrap();
        assert_eq!(palette.find_nearest(Rgb::from_u8(128, 128, 128)), Some(1));
        assert_eq!(palette.find_nearest(Rgb::from_u8(250, 250, 250)), Some(2));
    }

    #[test]
    fn test_find_nearest_tie_keeps_lowest_index() {
        // Green-only offsets give exact, equal distances on both sides.
        let palette = Palette::new(&[Rgb::from_u8(0, 10, 0), Rgb::from_u8(0, 30, 0)]).unwrap();
        assert_eq!(palette.find_nearest(Rgb::from_u8(0, 20, 0)), Some(0));

        let reversed = Palette::new(&[Rgb::from_u8(0, 30, 0), Rgb::from_u8(0, 10, 0)]).unwrap();
        assert_eq!(reversed.find_nearest(Rgb::from_u8(0, 20, 0)), Some(0));
    }

    #[test]
    fn test_find_nearest_duplicate_entries() {
        let palette = Palette::new(&[Rgb::WHITE, Rgb::BLACK, Rgb::BLACK]).unwrap();
        assert_eq!(palette.find_nearest(Rgb::BLACK), Some(1));
    }

    #[test]
    fn test_find_nearest_empty_palette() {
        assert_eq!(Palette::default().find_nearest(Rgb::BLACK), None);
    }

    #[test]
    fn test_remap_replaces_with_colors() {
        let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
        let mut pixels = vec![0x101010, 0xf0f0f0, 0xff00_0000, 0x7f7f7f];
        palette.remap(&mut pixels);
        assert_eq!(pixels, vec![0x000000, 0xffffff, 0x000000, 0x000000]);
    }

    #[test]
    fn test_remap_empty_palette_is_noop() {
        let mut pixels = vec![0x123456];
        Palette::default().remap(&mut pixels);
        assert_eq!(pixels, vec![0x123456]);
    }

    #[test]
    fn test_indices() {
        let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
        assert_eq!(palette.indices(&[0xffffff, 0x000001, 0xeeeeee]), vec![1, 0, 1]);
    }
}
