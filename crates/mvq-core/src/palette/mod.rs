//! Palette types and utilities
//!
//! This module provides the [`Palette`] produced by quantization, the
//! redmean distance used to match pixels against it, and error types for
//! parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{redmean_distance, Palette, MAX_PALETTE_SIZE};
