//! Layout metadata for composite atlas images.
//!
//! Written as a JSON sidecar next to the composite PNG so consumers can locate
//! every level or scale cell without re-deriving the packing arithmetic.

use serde::{Deserialize, Serialize};

use crate::config::LayoutKind;

/// One full atlas placed inside a composite image.
///
/// For the stacked layout `row` is the mip level and `column` is always 0.
/// For the grid layout `row` indexes the vertical scale and `column` the
/// horizontal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    /// Row index of this cell.
    pub row: u32,
    /// Column index of this cell.
    pub column: u32,
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
    /// Width of one tile inside this cell.
    pub tile_width: u32,
    /// Height of one tile inside this cell.
    pub tile_height: u32,
}

impl LayoutCell {
    /// Pixel offset of tile `(tx, ty)` inside the composite.
    pub fn tile_origin(&self, tx: u32, ty: u32) -> (u32, u32) {
        (self.x + tx * self.tile_width, self.y + ty * self.tile_height)
    }
}

/// Description of a composite image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    /// Layout used to pack the composite.
    pub layout: LayoutKind,
    /// Source tile edge length in pixels.
    pub tile_size: u32,
    /// Tile grid `[columns, rows]`.
    pub grid: [u32; 2],
    /// Mip levels derived per tile.
    pub levels: u32,
    /// Composite width in pixels.
    pub width: u32,
    /// Composite height in pixels.
    pub height: u32,
    /// Every atlas cell, row-major.
    pub cells: Vec<LayoutCell>,
}

impl LayoutMetadata {
    /// Looks up the cell at `(row, column)`.
    pub fn cell(&self, row: u32, column: u32) -> Option<&LayoutCell> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_origin_offsets_by_cell_base() {
        let cell = LayoutCell {
            row: 1,
            column: 2,
            x: 96,
            y: 32,
            width: 32,
            height: 16,
            tile_width: 8,
            tile_height: 4,
        };
        assert_eq!(cell.tile_origin(0, 0), (96, 32));
        assert_eq!(cell.tile_origin(3, 2), (120, 40));
    }

    #[test]
    fn metadata_serializes_layout_name() {
        let metadata = LayoutMetadata {
            layout: LayoutKind::Stacked,
            tile_size: 16,
            grid: [1, 1],
            levels: 1,
            width: 16,
            height: 16,
            cells: vec![],
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"layout\":\"stacked\""));
        let parsed: LayoutMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
        assert!(parsed.cell(0, 0).is_none());
    }
}
