//! Packed 24-bit RGB color type
//!
//! Pixels travel through the engine as `u32` values laid out as
//! `0x??RRGGBB`. The top byte is never read and is always zero in colors
//! produced by the engine.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Mask selecting the 24 color bits of a packed pixel.
pub const RGB_MASK: u32 = 0x00ff_ffff;

/// A 24-bit color with 8 bits per channel.
///
/// The value is stored packed (`0x00RRGGBB`), the same layout the engine
/// reads from and writes back to pixel buffers.
///
/// # Example
/// ```
/// use mvq_core::Rgb;
///
/// let orange = Rgb::from_u8(255, 128, 0);
/// assert_eq!(orange.to_packed(), 0xff8000);
/// assert_eq!(orange.g(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Rgb(u32);

impl Rgb {
    /// Pure black (`#000000`).
    pub const BLACK: Rgb = Rgb(0x000000);
    /// Pure white (`#ffffff`).
    pub const WHITE: Rgb = Rgb(0xffffff);

    /// Create a color from its three channels.
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Create a color from a packed pixel, ignoring the top byte.
    ///
    /// # Example
    /// ```
    /// use mvq_core::Rgb;
    /// assert_eq!(Rgb::from_packed(0xff12_3456), Rgb::from_u8(0x12, 0x34, 0x56));
    /// ```
    #[inline]
    pub const fn from_packed(pixel: u32) -> Self {
        Self(pixel & RGB_MASK)
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// The packed `0x00RRGGBB` value.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        self.0
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16 & 0xff) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8 & 0xff) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl From<u32> for Rgb {
    fn from(pixel: u32) -> Self {
        Self::from_packed(pixel)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> Self {
        color.to_packed()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvq_core::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::WHITE);
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red.to_bytes(), [255, 0, 0]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.len() {
            3 => {
                // 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
