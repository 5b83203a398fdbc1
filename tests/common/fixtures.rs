//! Test fixtures: small synthetic images written as PNG.

use mvq::rendering::encode_rgb_png;
use std::path::{Path, PathBuf};

/// Image dimensions used by the gradient fixture
pub const GRADIENT_WIDTH: u32 = 64;
pub const GRADIENT_HEIGHT: u32 = 48;

/// Smooth RGB gradient covering far more than 256 buckets
pub fn gradient_pixels() -> Vec<u32> {
    let mut pixels = Vec::with_capacity((GRADIENT_WIDTH * GRADIENT_HEIGHT) as usize);
    for y in 0..GRADIENT_HEIGHT {
        for x in 0..GRADIENT_WIDTH {
            let r = x * 255 / (GRADIENT_WIDTH - 1);
            let g = y * 255 / (GRADIENT_HEIGHT - 1);
            let b = (x + y) * 255 / (GRADIENT_WIDTH + GRADIENT_HEIGHT - 2);
            pixels.push(r << 16 | g << 8 | b);
        }
    }
    pixels
}

/// Gradient fixture encoded as an RGB PNG
pub fn gradient_png() -> Vec<u8> {
    encode_rgb_png(&gradient_pixels(), GRADIENT_WIDTH, GRADIENT_HEIGHT).unwrap()
}

/// 4x2 image with four flat colors, two pixels each
pub fn four_color_png() -> Vec<u8> {
    let pixels = [
        0xff0000, 0x00ff00, 0x0000ff, 0xffffff, //
        0xff0000, 0x00ff00, 0x0000ff, 0xffffff,
    ];
    encode_rgb_png(&pixels, 4, 2).unwrap()
}

/// Write `bytes` to `name` inside `dir` and return the path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
