#![allow(clippy::module_inception, clippy::precedence)]

//! mvq-core: bucket-merging 256-color quantization
//!
//! This library reduces a 24-bit image to at most 256 colors and remaps
//! every pixel to its nearest palette entry, in place.
//!
//! # Quick Start
//!
//! ```
//! let mut pixels: Vec<u32> = vec![0x000000, 0xffffff, 0x808080, 0x000000];
//! let palette = mvq_core::quantize(&mut pixels);
//!
//! assert_eq!(palette.len(), 3);
//! assert!(pixels
//!     .iter()
//!     .all(|&p| palette.colors().iter().any(|c| c.to_packed() == p)));
//! ```
//!
//! # Reusable Engine
//!
//! [`Quantizer`] owns the bucket table and can be reused across images.
//! It also reports how the run went:
//!
//! ```
//! use mvq_core::Quantizer;
//!
//! let mut quantizer = Quantizer::new();
//! let mut pixels = vec![0x102030; 10];
//! let result = quantizer.quantize(&mut pixels);
//!
//! assert_eq!(result.report().colors, 1);
//! assert_eq!(result.report().prune_passes, 0);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! packed pixels (0x??RRGGBB)
//!     |
//!     v
//! downsample         top nibble of each channel -> 12-bit key
//!     |
//!     v
//! BucketTable        4096 buckets of channel sums + counts
//!     |
//!     v
//! prune              fold small buckets into key - 1 until <= 256 remain
//!     |
//!     v
//! Palette            rounded average of each surviving bucket, key order
//!     |
//!     v
//! remap              nearest entry by redmean distance, written in place
//! ```
//!
//! ## Pruning
//!
//! A pass folds every bucket at or below the threshold into the bucket one
//! key lower. Once the running bucket count drops under the budget the pass
//! stops folding but keeps scanning, and the smallest size it saw becomes
//! the next threshold. Bucket 0 has no lower neighbor; pruning it discards
//! its colors.
//!
//! ## Distance
//!
//! Matching uses the "redmean" weighted RGB distance
//! `(2 + r̄/256)·ΔR² + 4·ΔG² + (2 + (255 - r̄)/256)·ΔB²`, where `r̄` is the
//! mean red of the two colors. Ties keep the lowest palette index.
//!
//! # Concurrency
//!
//! Every [`Quantizer`] owns its table, so separate quantizers can run on
//! separate threads. With the `threads` feature the final remap of a single
//! image is split across a rayon pool.

pub mod api;
pub mod bucket;
pub mod color;
pub mod output;
pub mod palette;


pub use api::{quantize, Quantization, QuantizeError, QuantizeReport, Quantizer};
pub use bucket::{BucketTable, PruneStats};
pub use color::Rgb;
pub use output::IndexedImage;
pub use palette::{redmean_distance, Palette, PaletteError, ParseColorError};
