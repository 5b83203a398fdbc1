//! Quantizer -- the engine value that owns the bucket table.
//!
//! [`Quantizer`] runs the full pipeline: bucketize, prune, build the
//! palette, remap. Each value owns its own [`BucketTable`], so independent
//! quantizers can run on different threads, and one quantizer can be reused
//! across images without any state leaking between runs.

use crate::api::QuantizeError;
use crate::bucket::{prune, BucketTable};
use crate::output::IndexedImage;
use crate::palette::{Palette, MAX_PALETTE_SIZE};

/// Diagnostics from one quantization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizeReport {
    /// Pixels read from the input.
    pub pixels: usize,
    /// Non-empty buckets after downsampling, before any pruning.
    pub initial_buckets: usize,
    /// Pruning passes needed to fit the color budget.
    pub prune_passes: usize,
    /// Non-empty buckets left after pruning; equal to the palette size.
    pub colors: usize,
}

/// Result of in-place quantization: the palette every pixel now uses, plus
/// the run's [`QuantizeReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Quantization {
    palette: Palette,
    report: QuantizeReport,
}

impl Quantization {
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn report(&self) -> QuantizeReport {
        self.report
    }

    /// Number of colors the image was reduced to.
    #[inline]
    pub fn colors(&self) -> usize {
        self.report.colors
    }

    pub fn into_palette(self) -> Palette {
        self.palette
    }
}

/// Reusable 256-color quantization engine.
///
/// # Design
///
/// - The bucket table is owned by the value and reset at the start of every
///   run, so results never depend on earlier calls
/// - Configuration methods consume and return `self` (builder pattern)
/// - Pruning is sequential; only the final remap may run in parallel
///   (`threads` feature)
///
/// # Example
///
/// ```
/// use mvq_core::Quantizer;
///
/// let mut quantizer = Quantizer::new();
/// let mut pixels = vec![0x000000, 0xffffff, 0x000000, 0xffffff];
///
/// let result = quantizer.quantize(&mut pixels);
///
/// assert_eq!(result.colors(), 2);
/// assert_eq!(pixels, vec![0x000000, 0xffffff, 0x000000, 0xffffff]);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    table: BucketTable,
    max_colors: usize,
}

impl Quantizer {
    /// Create a quantizer with a budget of 256 colors.
    pub fn new() -> Self {
        Self {
            table: BucketTable::new(),
            max_colors: MAX_PALETTE_SIZE,
        }
    }

    /// Set the color budget, clamped to `1..=256`.
    #[inline]
    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors.clamp(1, MAX_PALETTE_SIZE);
        self
    }

    /// Set the color budget, rejecting values outside `1..=256`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::InvalidMaxColors`] for 0 or anything above 256.
    pub fn try_max_colors(mut self, max_colors: usize) -> Result<Self, QuantizeError> {
        if !(1..=MAX_PALETTE_SIZE).contains(&max_colors) {
            return Err(QuantizeError::InvalidMaxColors(max_colors));
        }
        self.max_colors = max_colors;
        Ok(self)
    }

    /// The configured color budget.
    #[inline]
    pub fn color_budget(&self) -> usize {
        self.max_colors
    }

    /// The bucket table as left by the last run.
    #[inline]
    pub fn table(&self) -> &BucketTable {
        &self.table
    }

    /// Bucketize `pixels`, prune to the color budget and build the palette.
    ///
    /// The pixels are not modified.
    pub fn build_palette(&mut self, pixels: &[u32]) -> (Palette, QuantizeReport) {
        self.table.bucketize(pixels);
        let stats = prune(&mut self.table, self.max_colors);
        let palette = Palette::from_table(&self.table);

        let report = QuantizeReport {
            pixels: pixels.len(),
            initial_buckets: stats.initial,
            prune_passes: stats.passes,
            colors: stats.remaining,
        };
        debug_assert_eq!(report.colors, palette.len());
        (palette, report)
    }

    /// Quantize `pixels` in place.
    ///
    /// On return every pixel holds the packed color of its nearest palette
    /// entry (top byte cleared). Any input is accepted, including an empty
    /// slice, which yields an empty palette.
    pub fn quantize(&mut self, pixels: &mut [u32]) -> Quantization {
        let (palette, report) = self.build_palette(pixels);
        palette.remap(pixels);
        Quantization { palette, report }
    }

    /// Quantize `pixels` into palette indices, leaving the input untouched.
    ///
    /// Returns the indexed image together with the run's [`QuantizeReport`].
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::DimensionMismatch`] if `pixels.len()` is not
    /// `width * height`.
    ///
    /// # Example
    ///
    /// ```
    /// use mvq_core::Quantizer;
    ///
    /// let pixels = [0xffffff, 0x000000];
    /// let (image, report) = Quantizer::new().quantize_indexed(&pixels, 2, 1).unwrap();
    ///
    /// // Palette entries are ordered by bucket key, so black comes first.
    /// assert_eq!(image.indices(), &[1, 0]);
    /// assert_eq!(report.colors, 2);
    /// ```
    pub fn quantize_indexed(
        &mut self,
        pixels: &[u32],
        width: usize,
        height: usize,
    ) -> Result<(IndexedImage, QuantizeReport), QuantizeError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(QuantizeError::DimensionMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }
        let (palette, report) = self.build_palette(pixels);
        let indices = palette.indices(pixels);
        Ok((IndexedImage::new(indices, width, height, palette), report))
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Quantize `pixels` in place to at most 256 colors and return the palette.
///
/// Convenience wrapper around a fresh [`Quantizer`].
///
/// # Example
///
/// ```
/// let mut pixels = vec![0x336699; 16];
/// let palette = mvq_core::quantize(&mut pixels);
///
/// assert_eq!(palette.len(), 1);
/// assert_eq!(palette.color(0).to_packed(), 0x336699);
/// ```
pub fn quantize(pixels: &mut [u32]) -> Palette {
    Quantizer::new().quantize(pixels).into_palette()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_empty_image() {
        let mut pixels: Vec<u32> = Vec::new();
        let result = Quantizer::new().quantize(&mut pixels);
        assert!(result.palette().is_empty());
        assert_eq!(result.report(), QuantizeReport::default());
    }

    #[test]
    fn test_single_pixel() {
        let mut pixels = vec![0xabcdef];
        let palette = quantize(&mut pixels);
        assert_eq!(palette.colors(), &[Rgb::from_packed(0xabcdef)]);
        assert_eq!(pixels, vec![0xabcdef]);
    }

    #[test]
    fn test_top_byte_is_cleared() {
        let mut pixels = vec![0xff12_3456, 0x8012_3456];
        let palette = quantize(&mut pixels);
        assert_eq!(palette.len(), 1);
        assert_eq!(pixels, vec![0x123456, 0x123456]);
    }

    #[test]
    fn test_same_bucket_colors_average() {
        let mut pixels = vec![0x000000, 0x020202];
        let palette = quantize(&mut pixels);
        assert_eq!(palette.colors(), &[Rgb::from_packed(0x010101)]);
        assert_eq!(pixels, vec![0x010101, 0x010101]);
    }

    #[test]
    fn test_report_counts() {
        let mut pixels = vec![0x000000, 0x000000, 0xffffff, 0x808080];
        let result = Quantizer::new().quantize(&mut pixels);
        let report = result.report();
        assert_eq!(report.pixels, 4);
        assert_eq!(report.initial_buckets, 3);
        assert_eq!(report.prune_passes, 0);
        assert_eq!(report.colors, 3);
        assert_eq!(result.colors(), result.palette().len());
    }

    #[test]
    fn test_quantizer_reuse_does_not_leak_state() {
        let mut quantizer = Quantizer::new();
        let mut first = vec![0xff0000; 8];
        quantizer.quantize(&mut first);

        let mut second = vec![0x0000ff; 3];
        let result = quantizer.quantize(&mut second);
        assert_eq!(result.palette().colors(), &[Rgb::from_packed(0x0000ff)]);
        assert_eq!(result.report().pixels, 3);
    }

    #[test]
    fn test_max_colors_clamped() {
        assert_eq!(Quantizer::new().max_colors(0).color_budget(), 1);
        assert_eq!(Quantizer::new().max_colors(1000).color_budget(), 256);
        assert_eq!(Quantizer::new().max_colors(16).color_budget(), 16);
    }

    #[test]
    fn test_try_max_colors_validation() {
        assert!(matches!(
            Quantizer::new().try_max_colors(0),
            Err(QuantizeError::InvalidMaxColors(0))
        ));
        assert!(matches!(
            Quantizer::new().try_max_colors(257),
            Err(QuantizeError::InvalidMaxColors(257))
        ));
        assert_eq!(
            Quantizer::new().try_max_colors(256).unwrap().color_budget(),
            256
        );
    }

    #[test]
    fn test_small_budget_limits_palette() {
        // Keys 0..64 with sizes shrinking towards the higher keys.
        let mut pixels: Vec<u32> = Vec::new();
        for key in 0..64u32 {
            let pixel = (key >> 4 & 0xf) << 12 | (key & 0xf) << 4;
            pixels.extend(std::iter::repeat(pixel).take(64 - key as usize));
        }

        let result = Quantizer::new().max_colors(4).quantize(&mut pixels);

        assert!(result.colors() <= 4);
        assert!(result.colors() >= 1);
        for &p in &pixels {
            assert!(result.palette().colors().contains(&Rgb::from_packed(p)));
        }
    }

    #[test]
    fn test_quantize_indexed_matches_in_place() {
        let pixels: Vec<u32> = (0..64u32).map(|i| i * 0x040404).collect();
        let mut quantizer = Quantizer::new();
        let (indexed, _) = quantizer.quantize_indexed(&pixels, 8, 8).unwrap();

        let mut in_place = pixels.clone();
        quantizer.quantize(&mut in_place);

        assert_eq!(indexed.to_packed(), in_place);
        // Input untouched by the indexed path.
        assert_eq!(pixels[1], 0x040404);
    }

    #[test]
    fn test_quantize_indexed_report_matches_in_place() {
        // Keys 0..64 with shrinking sizes force pruning under a budget of 8.
        let mut pixels: Vec<u32> = Vec::new();
        for key in 0..64u32 {
            let pixel = (key >> 4 & 0xf) << 12 | (key & 0xf) << 4;
            pixels.extend(std::iter::repeat(pixel).take(64 - key as usize));
        }
        let len = pixels.len();

        let mut quantizer = Quantizer::new().max_colors(8);
        let (indexed, indexed_report) = quantizer.quantize_indexed(&pixels, len, 1).unwrap();
        let in_place = quantizer.quantize(&mut pixels);

        assert_eq!(indexed_report, in_place.report());
        assert_eq!(indexed_report.colors, indexed.palette().len());
        assert!(indexed_report.prune_passes > 0);
        assert_eq!(indexed_report.pixels, len);
    }

    #[test]
    fn test_quantize_indexed_dimension_mismatch() {
        let result = Quantizer::new().quantize_indexed(&[0; 5], 2, 2);
        assert!(matches!(
            result,
            Err(QuantizeError::DimensionMismatch {
                len: 5,
                width: 2,
                height: 2
            })
        ));
    }
}
