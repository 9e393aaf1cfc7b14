use crate::error::{GeometryError, Result};

/// An 8-bit R, G, B sample triple.
pub type Rgb = [u8; 3];

/// Bytes per pixel of a truecolor scanline.
pub const BYTES_PER_PIXEL: usize = 3;

/// Largest width or height a PNG header can carry (2^31 - 1).
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Check image dimensions and return the scanline length in bytes.
pub(crate) fn check_dimensions(width: u32, height: u32) -> std::result::Result<usize, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::Empty { width, height });
    }
    if width > MAX_DIMENSION {
        return Err(GeometryError::TooLarge(width));
    }
    if height > MAX_DIMENSION {
        return Err(GeometryError::TooLarge(height));
    }

    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(GeometryError::TooLarge(width))
}

/// Check that `scanlines` is exactly `height` rows of `width * 3` bytes.
pub(crate) fn check_scanlines<S: AsRef<[u8]>>(
    width: u32,
    height: u32,
    scanlines: &[S],
) -> std::result::Result<usize, GeometryError> {
    let stride = check_dimensions(width, height)?;

    if scanlines.len() != height as usize {
        return Err(GeometryError::ScanlineCount {
            expected: height as usize,
            actual: scanlines.len(),
        });
    }
    for (row, line) in scanlines.iter().enumerate() {
        let actual = line.as_ref().len();
        if actual != stride {
            return Err(GeometryError::ScanlineLength {
                row,
                expected: stride,
                actual,
            });
        }
    }

    Ok(stride)
}

/// A row-major RGB image with validated geometry.
///
/// Every scanline is `width * 3` bytes and there are exactly `height` of
/// them, stored back to back in one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        let stride = check_dimensions(width, height)?;
        let len = stride
            .checked_mul(height as usize)
            .ok_or(GeometryError::TooLarge(height))?;

        let data = color.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer from separate scanlines.
    pub fn from_scanlines<S: AsRef<[u8]>>(width: u32, scanlines: &[S]) -> Result<Self> {
        let height = u32::try_from(scanlines.len()).map_err(|_| GeometryError::TooLarge(u32::MAX))?;
        let stride = check_scanlines(width, height, scanlines)?;

        let mut data = Vec::with_capacity(stride * scanlines.len());
        for line in scanlines {
            data.extend_from_slice(line.as_ref());
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer from contiguous row-major RGB bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let stride = check_dimensions(width, height)?;
        let expected = stride
            .checked_mul(height as usize)
            .ok_or(GeometryError::TooLarge(height))?;
        if data.len() != expected {
            return Err(GeometryError::DataLength {
                expected,
                actual: data.len(),
            }
            .into());
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per scanline.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// The raw row-major RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// One scanline, or `None` past the last row.
    pub fn scanline(&self, y: u32) -> Option<&[u8]> {
        let stride = self.stride();
        let start = (y as usize).checked_mul(stride)?;
        self.data.get(start..start + stride)
    }

    /// Scanlines from top to bottom.
    pub fn scanlines(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.stride())
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Set one pixel. Coordinates outside the image are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = self.offset(x, y);
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            let start = self.offset(x0, y);
            let end = self.offset(x1 - 1, y) + BYTES_PER_PIXEL;
            for pixel in self.data[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * BYTES_PER_PIXEL
    }
}
