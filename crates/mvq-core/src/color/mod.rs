//! Color type shared by every stage of the engine
//!
//! Pixels enter the engine as packed `u32` values. [`Rgb`] is the typed view
//! of the same 24 bits, used for palette entries and distance math.
//!
//! # Example
//!
//! ```
//! use mvq_core::Rgb;
//!
//! let pixel: u32 = 0xff20_4060;
//! let color = Rgb::from_packed(pixel);
//! assert_eq!(color.to_bytes(), [0x20, 0x40, 0x60]);
//! ```

mod rgb;

pub use rgb::{Rgb, RGB_MASK};
