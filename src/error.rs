use mvq_core::QuantizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Unsupported PNG format: {color_type} at {bit_depth} bits")]
    UnsupportedFormat {
        color_type: &'static str,
        bit_depth: u8,
    },

    #[error("Pixel data does not match dimensions: {len} pixels for {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for ImageError {
    fn from(e: png::DecodingError) -> Self {
        ImageError::Decode(e.to_string())
    }
}

impl From<png::EncodingError> for ImageError {
    fn from(e: png::EncodingError) -> Self {
        ImageError::Encode(e.to_string())
    }
}
