//! Unified error type for the mvq-core public API.
//!
//! Quantizing pixels never fails. [`QuantizeError`] covers the fallible
//! edges around it: option validation, buffer dimensions and palettes built
//! from explicit colors.

use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the mvq-core public API.
///
/// # Example
///
/// ```
/// use mvq_core::{QuantizeError, Quantizer};
///
/// fn sixteen_colors() -> Result<Quantizer, QuantizeError> {
///     Quantizer::new().try_max_colors(16)
/// }
/// assert!(sixteen_colors().is_ok());
/// ```
#[derive(Debug)]
pub enum QuantizeError {
    /// Color budget outside `1..=256`
    InvalidMaxColors(usize),
    /// Pixel buffer length does not match the stated dimensions
    DimensionMismatch {
        /// Number of pixels supplied
        len: usize,
        /// Stated width
        width: usize,
        /// Stated height
        height: usize,
    },
    /// Palette validation error
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::InvalidMaxColors(n) => {
                write!(f, "max_colors must be between 1 and 256, got {}", n)
            }
            QuantizeError::DimensionMismatch { len, width, height } => write!(
                f,
                "pixel buffer length {} does not match dimensions {}x{}",
                len, width, height
            ),
            QuantizeError::Palette(err) => write!(f, "palette error: {}", err),
            QuantizeError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for QuantizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantizeError::Palette(err) => Some(err),
            QuantizeError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for QuantizeError {
    fn from(err: PaletteError) -> Self {
        QuantizeError::Palette(err)
    }
}

impl From<ParseColorError> for QuantizeError {
    fn from(err: ParseColorError) -> Self {
        QuantizeError::ParseColor(err)
    }
}
