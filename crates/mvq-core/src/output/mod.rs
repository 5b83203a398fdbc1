//! Output types for indexed quantization.
//!
//! In-place quantization writes colors back into the caller's buffer.
//! [`IndexedImage`] is the alternative output: palette indices with
//! dimension metadata and an owned [`Palette`](crate::palette::Palette).

mod indexed_image;

pub use indexed_image::IndexedImage;
