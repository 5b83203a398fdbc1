//! Assertion helpers for tests.

use mvq::rendering::{decode_png, DecodedImage};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Assert bytes are a decodable PNG and return the decoded image
pub fn assert_png(bytes: &[u8]) -> DecodedImage {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(bytes).unwrap_or_else(|e| panic!("PNG failed to decode: {e}"))
}

/// Assert a decoded image uses at most `max` distinct colors
pub fn assert_max_colors(image: &DecodedImage, max: usize) -> HashSet<u32> {
    let colors: HashSet<u32> = image.pixels.iter().copied().collect();
    assert!(
        colors.len() <= max,
        "Expected at most {} colors, found {}",
        max,
        colors.len()
    );
    colors
}

/// Assert the PNG header declares the given color type
pub fn assert_color_type(bytes: &[u8], expected: png::ColorType) {
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    assert_eq!(reader.info().color_type, expected);
}

/// Assert every pixel equals one of the listed `#rrggbb` palette entries
pub fn assert_pixels_in_palette(image: &DecodedImage, palette: &[String]) {
    let entries: HashSet<String> = palette.iter().cloned().collect();
    for (i, p) in image.pixels.iter().enumerate() {
        let hex = format!("#{p:06x}");
        assert!(
            entries.contains(&hex),
            "Pixel {i} = {hex} is not in the palette"
        );
    }
}
