use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use crate::chunk::{write_chunk, IDAT, IEND, IHDR, MAX_CHUNK_LEN, SIGNATURE};
use crate::error::{PngError, Result};
use crate::pixels::{check_scanlines, PixelBuffer};

/// Bits per sample.
const BIT_DEPTH: u8 = 8;
/// Color type 2: RGB triples, no palette, no alpha.
const COLOR_TYPE_TRUECOLOR: u8 = 2;
/// Filter type 0 (None), written in front of every scanline.
const FILTER_NONE: u8 = 0;

/// PNG encoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// zlib compression level, 0 (store) to 9 (best)
    pub compression: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { compression: 9 }
    }
}

impl EncodeOptions {
    /// Set the compression level (clamped to 0..=9)
    #[must_use]
    pub fn with_compression(mut self, level: u32) -> Self {
        self.compression = level.min(9);
        self
    }
}

/// Encode scanlines as a PNG file.
///
/// `scanlines` must hold exactly `height` rows of `width * 3` RGB bytes.
/// Geometry is checked before anything is produced.
pub fn encode<S: AsRef<[u8]>>(width: u32, height: u32, scanlines: &[S]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, width, height, scanlines, EncodeOptions::default())?;
    Ok(out)
}

/// Encode scanlines as a PNG file into `writer`.
///
/// Nothing is written to `writer` when the geometry is invalid or the
/// compressed data does not fit in one chunk.
pub fn encode_into<W: Write, S: AsRef<[u8]>>(
    writer: W,
    width: u32,
    height: u32,
    scanlines: &[S],
    options: EncodeOptions,
) -> Result<()> {
    let stride = check_scanlines(width, height, scanlines)?;
    emit(
        writer,
        width,
        height,
        stride,
        scanlines.iter().map(|line| line.as_ref()),
        options,
        MAX_CHUNK_LEN,
    )
}

impl PixelBuffer {
    /// Encode the buffer as a PNG file with default options
    pub fn to_png(&self) -> Result<Vec<u8>> {
        self.to_png_with_options(EncodeOptions::default())
    }

    /// Encode the buffer as a PNG file
    pub fn to_png_with_options(&self, options: EncodeOptions) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        emit(
            &mut out,
            self.width(),
            self.height(),
            self.stride(),
            self.scanlines(),
            options,
            MAX_CHUNK_LEN,
        )?;
        Ok(out)
    }
}

/// Encode `buffer` and write it to `path`, creating parent directories.
///
/// The whole file is encoded in memory first, so a failed encode leaves no
/// file behind.
pub fn write_png<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<()> {
    let bytes = buffer.to_png()?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &bytes)?;

    debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        bytes = bytes.len(),
        "wrote png"
    );
    Ok(())
}

/// IHDR payload: width, height, depth 8, truecolor, deflate, adaptive filtering, no interlace.
fn header_data(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = BIT_DEPTH;
    data[9] = COLOR_TYPE_TRUECOLOR;
    // compression, filter and interlace methods all 0
    data
}

fn emit<'a, W: Write>(
    mut writer: W,
    width: u32,
    height: u32,
    stride: usize,
    scanlines: impl Iterator<Item = &'a [u8]>,
    options: EncodeOptions,
    max_chunk_len: usize,
) -> Result<()> {
    let mut raw = Vec::with_capacity((stride + 1) * height as usize);
    for line in scanlines {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(line);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(options.compression));
    encoder.write_all(&raw)?;
    let compressed = encoder.finish()?;
    if compressed.len() > max_chunk_len {
        return Err(PngError::ChunkTooLarge(compressed.len()));
    }

    writer.write_all(&SIGNATURE)?;
    write_chunk(&mut writer, &IHDR, &header_data(width, height))?;
    write_chunk(&mut writer, &IDAT, &compressed)?;
    write_chunk(&mut writer, &IEND, &[])?;
    writer.flush()?;
    Ok(())
}
