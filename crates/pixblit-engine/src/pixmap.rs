//! Software pixel buffer.

use crate::device::InitError;

/// Fixed-size RGBA8 pixel buffer, row-major, top row first.
///
/// The size is fixed at creation. Writes are only seen by the GPU after the
/// owning display is flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Pixmap {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Allocates a zeroed (transparent black) pixmap.
    pub fn new(width: u32, height: u32) -> Result<Self, InitError> {
        let len = Self::byte_len(width, height)?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| InitError::Allocation { bytes: len })?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// `width * height * 4`, rejecting zero sizes and overflow.
    pub fn byte_len(width: u32, height: u32) -> Result<usize, InitError> {
        let invalid = InitError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(Self::BYTES_PER_PIXEL))
            .ok_or(invalid)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the pixmap.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + Self::BYTES_PER_PIXEL]);
        Some(px)
    }

    /// Writes one pixel. Returns `false` (and writes nothing) outside the pixmap.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        let Some(i) = self.offset(x, y) else {
            return false;
        };
        self.pixels[i..i + Self::BYTES_PER_PIXEL].copy_from_slice(&rgba);
        true
    }

    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(Self::BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }
}
