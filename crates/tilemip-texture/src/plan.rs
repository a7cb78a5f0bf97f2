//! Composite layout planning.
//!
//! Pure offset arithmetic: given a config and a layout kind, compute where
//! every full-atlas cell lands in the composite. The composer packs by this
//! plan and the same plan is written out as [`LayoutMetadata`].

use tilemip_spec::{AtlasConfig, LayoutCell, LayoutKind, LayoutMetadata};

use crate::mip::mip_sizes;

/// Exclusive prefix sums: `offsets[i] == sizes[..i].sum()`.
pub fn prefix_offsets(sizes: &[u32]) -> Vec<u32> {
    sizes
        .iter()
        .scan(0u32, |acc, &size| {
            let offset = *acc;
            *acc += size;
            Some(offset)
        })
        .collect()
}

/// Plan the composite for `config` using `kind`.
pub fn plan_layout(config: &AtlasConfig, kind: LayoutKind) -> LayoutMetadata {
    let cells = match kind {
        LayoutKind::Flat => plan_flat(config),
        LayoutKind::Grid => plan_grid(config),
        LayoutKind::Stacked => plan_stacked(config),
    };

    let width = cells.iter().map(|c| c.x + c.width).max().unwrap_or(0);
    let height = cells.iter().map(|c| c.y + c.height).max().unwrap_or(0);

    LayoutMetadata {
        layout: kind,
        tile_size: config.tile_size,
        grid: config.grid,
        levels: config.levels,
        width,
        height,
        cells,
    }
}

fn plan_flat(config: &AtlasConfig) -> Vec<LayoutCell> {
    let (width, height) = config.atlas_size();
    vec![LayoutCell {
        row: 0,
        column: 0,
        x: 0,
        y: 0,
        width,
        height,
        tile_width: config.tile_size,
        tile_height: config.tile_size,
    }]
}

/// One row per level, each a full atlas of `edge`-sized tiles, left-aligned.
fn plan_stacked(config: &AtlasConfig) -> Vec<LayoutCell> {
    let edges = mip_sizes(config.tile_size, config.levels);
    let heights: Vec<u32> = edges.iter().map(|e| config.grid_height() * e).collect();
    let offsets = prefix_offsets(&heights);

    edges
        .iter()
        .zip(offsets)
        .enumerate()
        .map(|(level, (&edge, y))| LayoutCell {
            row: level as u32,
            column: 0,
            x: 0,
            y,
            width: config.grid_width() * edge,
            height: config.grid_height() * edge,
            tile_width: edge,
            tile_height: edge,
        })
        .collect()
}

/// Row `i` uses vertical scale `sizes[i]`, column `j` horizontal scale `sizes[j]`.
fn plan_grid(config: &AtlasConfig) -> Vec<LayoutCell> {
    let scales = mip_sizes(config.tile_size, config.levels);
    let widths: Vec<u32> = scales.iter().map(|s| config.grid_width() * s).collect();
    let heights: Vec<u32> = scales.iter().map(|s| config.grid_height() * s).collect();
    let xs = prefix_offsets(&widths);
    let ys = prefix_offsets(&heights);

    let mut cells = Vec::with_capacity(scales.len() * scales.len());
    for (row, &scale_y) in scales.iter().enumerate() {
        for (column, &scale_x) in scales.iter().enumerate() {
            cells.push(LayoutCell {
                row: row as u32,
                column: column as u32,
                x: xs[column],
                y: ys[row],
                width: widths[column],
                height: heights[row],
                tile_width: scale_x,
                tile_height: scale_y,
            });
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_offsets_are_exclusive() {
        assert_eq!(prefix_offsets(&[]), Vec::<u32>::new());
        assert_eq!(prefix_offsets(&[5]), vec![0]);
        assert_eq!(prefix_offsets(&[16, 8, 4, 2, 1]), vec![0, 16, 24, 28, 30]);
    }

    #[test]
    fn flat_plan_is_source_size() {
        let plan = plan_layout(&AtlasConfig::default(), LayoutKind::Flat);
        assert_eq!((plan.width, plan.height), (1024, 512));
        assert_eq!(plan.cells.len(), 1);
    }

    #[test]
    fn stacked_plan_production_size() {
        let plan = plan_layout(&AtlasConfig::default(), LayoutKind::Stacked);
        // 32 rows * (16 + 8 + 4 + 2 + 1)
        assert_eq!((plan.width, plan.height), (1024, 992));

        let heights: u32 = plan.cells.iter().map(|c| c.height).sum();
        assert_eq!(heights, plan.height);

        let level4 = plan.cell(4, 0).unwrap();
        assert_eq!((level4.x, level4.y), (0, 960));
        assert_eq!((level4.width, level4.height), (64, 32));
        assert_eq!(level4.tile_width, 1);
    }

    #[test]
    fn stacked_levels_clamp_at_one() {
        let config = AtlasConfig::new(4, 2, 3).with_levels(5);
        let plan = plan_layout(&config, LayoutKind::Stacked);
        let edges: Vec<u32> = plan.cells.iter().map(|c| c.tile_width).collect();
        assert_eq!(edges, vec![4, 2, 1, 1, 1]);
        assert_eq!(plan.height, 3 * (4 + 2 + 1 + 1 + 1));
    }

    #[test]
    fn grid_plan_production_size() {
        let plan = plan_layout(&AtlasConfig::default(), LayoutKind::Grid);
        // 64 * 31 by 32 * 31
        assert_eq!((plan.width, plan.height), (1984, 992));
        assert_eq!(plan.cells.len(), 25);

        let cell = plan.cell(1, 3).unwrap();
        assert_eq!((cell.x, cell.y), (64 * 28, 32 * 16));
        assert_eq!((cell.width, cell.height), (128, 256));
        assert_eq!((cell.tile_width, cell.tile_height), (2, 8));
    }

    #[test]
    fn grid_columns_are_contiguous() {
        let plan = plan_layout(&AtlasConfig::new(16, 3, 2), LayoutKind::Grid);
        let row0: Vec<&LayoutCell> = plan.cells.iter().filter(|c| c.row == 0).collect();
        for pair in row0.windows(2) {
            assert_eq!(pair[1].x, pair[0].x + pair[0].width);
        }
        let col0: Vec<&LayoutCell> = plan.cells.iter().filter(|c| c.column == 0).collect();
        for pair in col0.windows(2) {
            assert_eq!(pair[1].y, pair[0].y + pair[0].height);
        }
        let last = plan.cells.last().unwrap();
        assert_eq!(plan.width, last.x + last.width);
        assert_eq!(plan.height, last.y + last.height);
    }
}
