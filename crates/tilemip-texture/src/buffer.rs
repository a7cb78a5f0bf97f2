//! RGBA8 pixel buffers with crop, paste, and nearest-neighbour resize.

use std::fmt;

use crate::color::Rgba8;
use crate::error::AtlasError;

/// A pixel rectangle given as `(left, top, right, bottom)`, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// The pixel box of tile `(tx, ty)` in a grid of `tile_size` tiles.
    pub fn tile(tx: u32, ty: u32, tile_size: u32) -> Self {
        let left = tx.saturating_mul(tile_size);
        let top = ty.saturating_mul(tile_size);
        Self::from_origin(left, top, tile_size, tile_size)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when the rectangle is non-empty and lies inside a `width × height` buffer.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty() && self.right <= width && self.bottom <= height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// A 2D RGBA8 raster with straight (non-premultiplied) alpha.
///
/// `data.len()` is always `width * height`. Every operation that derives a new
/// buffer returns an independent copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Texel data (row-major).
    pub data: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with a texel.
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create a new fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, [0, 0, 0, 0])
    }

    /// Create a buffer from tightly packed 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, AtlasError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(AtlasError::DataLength {
                expected,
                actual: bytes.len(),
            });
        }

        let data = bytes
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert to tightly packed 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for texel in &self.data {
            bytes.extend_from_slice(texel);
        }
        bytes
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a texel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        self.data[self.index(x, y)]
    }

    /// Set a texel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, texel: Rgba8) {
        let idx = self.index(x, y);
        self.data[idx] = texel;
    }

    /// Copy the texels inside `rect` into a new buffer.
    pub fn crop(&self, rect: Rect) -> Result<PixelBuffer, AtlasError> {
        if !rect.fits_within(self.width, self.height) {
            return Err(AtlasError::OutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            });
        }

        let mut data = Vec::with_capacity(rect.width() as usize * rect.height() as usize);
        for y in rect.top..rect.bottom {
            let start = self.index(rect.left, y);
            let end = start + rect.width() as usize;
            data.extend_from_slice(&self.data[start..end]);
        }

        Ok(PixelBuffer {
            width: rect.width(),
            height: rect.height(),
            data,
        })
    }

    /// Copy every texel of `src` into this buffer with its top-left at `(x, y)`.
    ///
    /// Destination texels are overwritten, not blended.
    pub fn paste(&mut self, src: &PixelBuffer, x: u32, y: u32) -> Result<(), AtlasError> {
        let rect = Rect::from_origin(x, y, src.width, src.height);
        if src.pixel_count() == 0 {
            return Ok(());
        }
        if !rect.fits_within(self.width, self.height) {
            return Err(AtlasError::OutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            });
        }

        let row_len = src.width as usize;
        for (row, src_row) in src.data.chunks_exact(row_len).enumerate() {
            let start = self.index(x, y + row as u32);
            self.data[start..start + row_len].copy_from_slice(src_row);
        }

        Ok(())
    }

    /// Resize by sampling the nearest source texel.
    ///
    /// Destination `(x, y)` reads source `(x * W / w, y * H / h)`, rounded down.
    pub fn resize_nearest(&self, width: u32, height: u32) -> Result<PixelBuffer, AtlasError> {
        if width == 0 || height == 0 {
            return Err(AtlasError::InvalidSize { width, height });
        }
        if self.pixel_count() == 0 {
            return Err(AtlasError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        let src_x: Vec<u32> = (0..width)
            .map(|x| (x as u64 * self.width as u64 / width as u64) as u32)
            .collect();

        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            data.extend(src_x.iter().map(|&sx| self.get(sx, sy)));
        }

        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }
}
