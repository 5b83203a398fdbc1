//! PNG decoding into packed pixels and encoding of quantized images.

use crate::error::ImageError;
use mvq_core::IndexedImage;
use std::io::Cursor;

/// A decoded image as packed `0x00RRGGBB` pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

/// Decode a PNG into packed RGB pixels.
///
/// Palette and sub-byte grayscale images are expanded to 8 bits per
/// channel. Alpha is dropped. 16-bit images are rejected.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info()?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedFormat {
            color_type: color_type_name(color_type),
            bit_depth: bit_depth as u8,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let pixels: Vec<u32> = match color_type {
        png::ColorType::Rgb => data.chunks_exact(3).map(pack).collect(),
        png::ColorType::Rgba => data.chunks_exact(4).map(pack).collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| pack(&[v, v, v])).collect(),
        png::ColorType::GrayscaleAlpha => {
            data.chunks_exact(2).map(|c| pack(&[c[0], c[0], c[0]])).collect()
        }
        png::ColorType::Indexed => {
            return Err(ImageError::UnsupportedFormat {
                color_type: color_type_name(color_type),
                bit_depth: bit_depth as u8,
            })
        }
    };

    let expected = info.width as usize * info.height as usize;
    if pixels.len() != expected {
        return Err(ImageError::DimensionMismatch {
            len: pixels.len(),
            width: info.width,
            height: info.height,
        });
    }

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// Encode packed pixels as an 8-bit RGB PNG
pub fn encode_rgb_png(pixels: &[u32], width: u32, height: u32) -> Result<Vec<u8>, ImageError> {
    if width as usize * height as usize != pixels.len() {
        return Err(ImageError::DimensionMismatch {
            len: pixels.len(),
            width,
            height,
        });
    }

    let data: Vec<u8> = pixels
        .iter()
        .flat_map(|&p| [(p >> 16) as u8, (p >> 8) as u8, p as u8])
        .collect();

    encode_png(
        width,
        height,
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        &data,
    )
}

/// Encode an indexed image as a palette PNG.
///
/// The bit depth is the smallest of 1, 2, 4 or 8 that addresses every
/// palette entry.
pub fn encode_indexed_png(image: &IndexedImage) -> Result<Vec<u8>, ImageError> {
    let width = u32::try_from(image.width())
        .map_err(|_| ImageError::Encode(format!("width {} too large", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| ImageError::Encode(format!("height {} too large", image.height())))?;

    let bits = index_bits(image.palette().len());
    let (bit_depth, packed) = match bits {
        1 => (png::BitDepth::One, pack_nbits(image.indices(), width, 1)),
        2 => (png::BitDepth::Two, pack_nbits(image.indices(), width, 2)),
        4 => (png::BitDepth::Four, pack_nbits(image.indices(), width, 4)),
        _ => (png::BitDepth::Eight, image.indices().to_vec()),
    };

    let plte = image.palette_bytes();
    encode_png(
        width,
        height,
        png::ColorType::Indexed,
        bit_depth,
        Some(&plte),
        &packed,
    )
}

/// Re-compress a PNG with oxipng, returning the input if optimization fails
pub fn optimize_png(bytes: Vec<u8>) -> Vec<u8> {
    let before = bytes.len();
    match oxipng::optimize_from_memory(
        &bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(before, after = optimized.len(), "Optimized PNG");
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original");
            bytes
        }
    }
}

/// Bits per index needed for a palette of `len` entries
fn index_bits(len: usize) -> u8 {
    match len {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

fn pack(c: &[u8]) -> u32 {
    (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32
}

fn color_type_name(color_type: png::ColorType) -> &'static str {
    match color_type {
        png::ColorType::Grayscale => "Grayscale",
        png::ColorType::Rgb => "RGB",
        png::ColorType::Indexed => "Indexed",
        png::ColorType::GrayscaleAlpha => "GrayscaleAlpha",
        png::ColorType::Rgba => "RGBA",
    }
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}

/// Pack indices into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
