use thiserror::Error;

/// Pixel buffer geometry that cannot be encoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Image must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("Image dimension {0} exceeds the PNG limit of 2147483647")]
    TooLarge(u32),

    #[error("Scanline {row} has {actual} bytes, expected {expected}")]
    ScanlineLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Expected {expected} scanlines, got {actual}")]
    ScanlineCount { expected: usize, actual: usize },

    #[error("Pixel data has {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },
}

/// Errors that can occur while encoding or writing a PNG
#[derive(Error, Debug)]
pub enum PngError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    #[error("Chunk data of {0} bytes exceeds the PNG chunk size limit")]
    ChunkTooLarge(usize),

    #[error("Malformed PNG: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PngError>;
