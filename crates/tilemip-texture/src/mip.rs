//! Mip chain generation for single tiles.

use crate::buffer::PixelBuffer;
use crate::error::AtlasError;
use crate::resample::resize_box;

/// Edge length of mip `level` for a `tile_size` tile: `max(1, tile_size >> level)`.
pub fn mip_edge(tile_size: u32, level: u32) -> u32 {
    tile_size.checked_shr(level).unwrap_or(0).max(1)
}

/// Edge lengths of the first `levels` mip levels, largest first.
pub fn mip_sizes(tile_size: u32, levels: u32) -> Vec<u32> {
    (0..levels).map(|level| mip_edge(tile_size, level)).collect()
}

/// Builds mip chains for tiles of a fixed canonical size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipBuilder {
    tile_size: u32,
    levels: u32,
}

impl MipBuilder {
    pub fn new(tile_size: u32, levels: u32) -> Self {
        Self { tile_size, levels }
    }

    /// Generate the mip chain of `tile`.
    ///
    /// Level 0 is `tile` itself, nearest-resized to the canonical size only if
    /// it arrives at a different size. Each later level is a box downsample of
    /// the level before it, not of the original tile.
    ///
    /// # Returns
    /// `levels` buffers: `[tile_size, tile_size / 2, ..., 1]`, clamped at 1.
    pub fn build_chain(&self, tile: &PixelBuffer) -> Result<Vec<PixelBuffer>, AtlasError> {
        let mut chain = Vec::with_capacity(self.levels as usize);
        if self.levels == 0 {
            return Ok(chain);
        }

        let mut current = if tile.size() == (self.tile_size, self.tile_size) {
            tile.clone()
        } else {
            tile.resize_nearest(self.tile_size, self.tile_size)?
        };

        for level in 1..self.levels {
            let edge = mip_edge(self.tile_size, level);
            let next = resize_box(&current, edge, edge)?;
            chain.push(std::mem::replace(&mut current, next));
        }
        chain.push(current);

        Ok(chain)
    }
}
