//! Minimal PNG encoder for exitrank
//!
//! Produces 8-bit, truecolor, non-interlaced PNG files from an RGB pixel
//! buffer: the signature followed by an `IHDR`, a single zlib-compressed
//! `IDAT` and an empty `IEND` chunk. Every scanline is stored with filter
//! type 0.
//!
//! # Examples
//!
//! ```
//! use exitrank_png::{encode, read_chunks, PixelBuffer, IHDR};
//!
//! let mut buffer = PixelBuffer::filled(4, 2, [255, 255, 255]).unwrap();
//! buffer.put_pixel(1, 1, [255, 0, 0]);
//!
//! let png = buffer.to_png().unwrap();
//! let chunks = read_chunks(&png).unwrap();
//! assert_eq!(chunks[0].tag, IHDR);
//!
//! // Scanlines can also be passed directly
//! let same = encode(4, 2, &[buffer.scanline(0).unwrap(), buffer.scanline(1).unwrap()]).unwrap();
//! assert_eq!(png, same);
//! ```

mod chunk;
mod encoder;
mod error;
mod pixels;

/// Re-export chunk framing.
pub use chunk::{
    chunk_crc, read_chunks, write_chunk, Chunk, ChunkTag, IDAT, IEND, IHDR, MAX_CHUNK_LEN,
    SIGNATURE,
};
/// Re-export the encoder entry points.
pub use encoder::{encode, encode_into, write_png, EncodeOptions};
/// Re-export encoder error types.
pub use error::{GeometryError, PngError, Result};
/// Re-export pixel buffer types.
pub use pixels::{PixelBuffer, Rgb, BYTES_PER_PIXEL, MAX_DIMENSION};
