use crate::error::{AppError, ImageError};
use crate::models::{MvqConfig, OutputMode};
use crate::rendering::{decode_png, encode_indexed_png, encode_rgb_png, optimize_png};
use mvq_core::{Palette, QuantizeReport};
use serde::Serialize;
use std::path::Path;

/// Result of quantizing one PNG
#[derive(Debug, Clone)]
pub struct QuantizeOutcome {
    /// Encoded output PNG
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub report: QuantizeReport,
}

/// Palette of an image plus how it was reached, printable as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteSummary {
    pub width: u32,
    pub height: u32,
    pub pixels: usize,
    pub initial_buckets: usize,
    pub prune_passes: usize,
    /// Palette entries as `#rrggbb`, in palette index order
    pub colors: Vec<String>,
}

impl PaletteSummary {
    fn new(width: u32, height: u32, palette: &Palette, report: QuantizeReport) -> Self {
        Self {
            width,
            height,
            pixels: report.pixels,
            initial_buckets: report.initial_buckets,
            prune_passes: report.prune_passes,
            colors: palette.colors().iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Decodes PNGs, reduces them to the configured color budget and encodes
/// the result
pub struct QuantizeService {
    config: MvqConfig,
}

impl QuantizeService {
    pub fn new(config: MvqConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MvqConfig {
        &self.config
    }

    /// Quantize PNG bytes and encode the result according to the config
    pub fn quantize_png(&self, input: &[u8]) -> Result<QuantizeOutcome, AppError> {
        let image = decode_png(input)?;
        let mut quantizer = self.config.quantizer()?;

        tracing::debug!(
            width = image.width,
            height = image.height,
            max_colors = quantizer.color_budget(),
            output = ?self.config.output,
            "Quantizing image"
        );

        let (png, report) = match self.config.output {
            OutputMode::Rgb => {
                let mut pixels = image.pixels;
                let result = quantizer.quantize(&mut pixels);
                let png = encode_rgb_png(&pixels, image.width, image.height)?;
                (png, result.report())
            }
            OutputMode::Indexed => {
                let (indexed, report) = quantizer.quantize_indexed(
                    &image.pixels,
                    image.width as usize,
                    image.height as usize,
                )?;
                (encode_indexed_png(&indexed)?, report)
            }
        };

        tracing::info!(
            colors = report.colors,
            initial_buckets = report.initial_buckets,
            prune_passes = report.prune_passes,
            "Reduced to {} colors",
            report.colors
        );

        let png = if self.config.optimize {
            optimize_png(png)
        } else {
            png
        };

        Ok(QuantizeOutcome {
            png,
            width: image.width,
            height: image.height,
            report,
        })
    }

    /// Quantize the PNG at `input` and write the result to `output`
    pub fn quantize_file(&self, input: &Path, output: &Path) -> Result<QuantizeOutcome, AppError> {
        let bytes = std::fs::read(input).map_err(ImageError::from)?;
        let outcome = self.quantize_png(&bytes)?;
        std::fs::write(output, &outcome.png).map_err(ImageError::from)?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            bytes = outcome.png.len(),
            "Wrote quantized image"
        );
        Ok(outcome)
    }

    /// Compute the palette of PNG bytes without producing an image
    pub fn palette_png(&self, input: &[u8]) -> Result<PaletteSummary, AppError> {
        let image = decode_png(input)?;
        let mut quantizer = self.config.quantizer()?;
        let (palette, report) = quantizer.build_palette(&image.pixels);
        Ok(PaletteSummary::new(
            image.width,
            image.height,
            &palette,
            report,
        ))
    }

    /// Compute the palette of the PNG at `input`
    pub fn palette_file(&self, input: &Path) -> Result<PaletteSummary, AppError> {
        let bytes = std::fs::read(input).map_err(ImageError::from)?;
        self.palette_png(&bytes)
    }
}
