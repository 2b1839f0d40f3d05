use thiserror::Error;

#[derive(Error, Debug)]
pub enum MipmapError {
    /// Input could not be read or is not a 3-channel RGB image
    #[error("Failed to decode RGB image: {0}")]
    DecodeError(String),

    /// A level file could not be created, encoded or written
    #[error("Failed to encode pyramid level: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, MipmapError>;
