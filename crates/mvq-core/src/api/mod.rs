//! Public API for the mvq-core crate.
//!
//! This module provides the high-level API: the reusable [`Quantizer`]
//! engine, the one-shot [`quantize`] function and the [`QuantizeError`]
//! unified error type.

mod error;
mod quantizer;

pub use error::QuantizeError;
pub use quantizer::{quantize, Quantization, QuantizeReport, Quantizer};
