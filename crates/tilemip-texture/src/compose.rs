//! Atlas composition.
//!
//! A single linear pass over one source atlas:
//!
//! 1. validate the source size against the config;
//! 2. apply the ordered fixups;
//! 3. expand every tile (box resizes for the grid layout, a mip chain for the
//!    stacked layout);
//! 4. paste each expanded tile at its cell base plus `tile index × tile size`
//!    in the composite.
//!
//! Any error aborts the pass; there is no partial output.

use log::{debug, info};
use tilemip_spec::{validate_config, AtlasConfig, LayoutKind, LayoutMetadata};

use crate::buffer::{PixelBuffer, Rect};
use crate::color_ops::apply_fixups;
use crate::error::AtlasError;
use crate::mip::MipBuilder;
use crate::plan::plan_layout;
use crate::png::{decode_rgba, write_rgba_to_vec_with_hash, PngConfig, PngError};
use crate::resample::resize_box;

/// Result of composing an atlas.
#[derive(Debug, Clone)]
pub struct ComposeResult {
    /// The composite image.
    pub image: PixelBuffer,
    /// Where every cell lives inside `image`.
    pub metadata: LayoutMetadata,
}

impl ComposeResult {
    /// Encode the composite as PNG, returning the bytes and their BLAKE3 hash.
    pub fn encode_png(&self, config: &PngConfig) -> Result<(Vec<u8>, String), PngError> {
        write_rgba_to_vec_with_hash(&self.image, config)
    }
}

/// Turns a source atlas into a composite according to an [`AtlasConfig`].
#[derive(Debug, Clone)]
pub struct AtlasComposer {
    config: AtlasConfig,
}

impl AtlasComposer {
    /// Create a composer, validating `config` first.
    pub fn new(config: AtlasConfig) -> Result<Self, AtlasError> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// The layout plan for the configured layout.
    pub fn plan(&self) -> LayoutMetadata {
        plan_layout(&self.config, self.config.layout)
    }

    /// Decode PNG bytes and check the result against the configured atlas size.
    pub fn load_png(&self, png_data: &[u8]) -> Result<PixelBuffer, AtlasError> {
        let atlas = decode_rgba(png_data)?;
        self.validate_source(&atlas)?;
        Ok(atlas)
    }

    /// Fail with [`AtlasError::AtlasSizeMismatch`] unless `atlas` is exactly
    /// `grid × tile_size` pixels.
    pub fn validate_source(&self, atlas: &PixelBuffer) -> Result<(), AtlasError> {
        let (expected_width, expected_height) = self.config.atlas_size();
        if atlas.size() != (expected_width, expected_height) {
            return Err(AtlasError::AtlasSizeMismatch {
                expected_width,
                expected_height,
                width: atlas.width,
                height: atlas.height,
            });
        }
        Ok(())
    }

    /// Apply the configured fixups in order.
    pub fn apply_fixups(&self, atlas: &mut PixelBuffer) -> Result<(), AtlasError> {
        apply_fixups(atlas, self.config.tile_size, &self.config.fixups)
    }

    /// Copy tile `(tx, ty)` out of `atlas` at the canonical tile size.
    ///
    /// The crop is clipped to the atlas, so a tile hanging off the edge comes
    /// out short and is stretched back with nearest-neighbour sampling.
    pub fn extract_tile(
        &self,
        atlas: &PixelBuffer,
        tx: u32,
        ty: u32,
    ) -> Result<PixelBuffer, AtlasError> {
        let size = self.config.tile_size;
        let rect = Rect::tile(tx, ty, size);
        let clipped = Rect::new(
            rect.left,
            rect.top,
            rect.right.min(atlas.width),
            rect.bottom.min(atlas.height),
        );

        let tile = atlas.crop(clipped)?;
        if tile.size() == (size, size) {
            Ok(tile)
        } else {
            tile.resize_nearest(size, size)
        }
    }

    /// Run the full pass with the configured layout.
    pub fn compose(&self, atlas: PixelBuffer) -> Result<ComposeResult, AtlasError> {
        self.compose_with(atlas, self.config.layout)
    }

    /// Run the full pass with an explicit layout.
    pub fn compose_with(
        &self,
        mut atlas: PixelBuffer,
        layout: LayoutKind,
    ) -> Result<ComposeResult, AtlasError> {
        self.validate_source(&atlas)?;

        debug!("applying {} fixups", self.config.fixups.len());
        self.apply_fixups(&mut atlas)?;

        let metadata = plan_layout(&self.config, layout);
        debug!(
            "packing {} layout: {} cells into {}x{}",
            layout,
            metadata.cells.len(),
            metadata.width,
            metadata.height
        );

        let image = match layout {
            LayoutKind::Flat => atlas,
            LayoutKind::Grid => self.pack_grid(&atlas, &metadata)?,
            LayoutKind::Stacked => self.pack_stacked(&atlas, &metadata)?,
        };

        info!("composed {} atlas: {}x{}", layout, image.width, image.height);

        Ok(ComposeResult { image, metadata })
    }

    /// Calls `f(tx, ty, tile)` for every tile, row by row.
    fn for_each_tile<F>(&self, atlas: &PixelBuffer, mut f: F) -> Result<(), AtlasError>
    where
        F: FnMut(u32, u32, &PixelBuffer) -> Result<(), AtlasError>,
    {
        for ty in 0..self.config.grid_height() {
            for tx in 0..self.config.grid_width() {
                let tile = self.extract_tile(atlas, tx, ty)?;
                f(tx, ty, &tile)?;
            }
        }
        Ok(())
    }

    /// Every tile is box-resized straight from the source to each cell's
    /// (column scale, row scale).
    fn pack_grid(
        &self,
        atlas: &PixelBuffer,
        plan: &LayoutMetadata,
    ) -> Result<PixelBuffer, AtlasError> {
        let mut composite = PixelBuffer::transparent(plan.width, plan.height);

        self.for_each_tile(atlas, |tx, ty, tile| {
            for cell in &plan.cells {
                let resized = resize_box(tile, cell.tile_width, cell.tile_height)?;
                let (x, y) = cell.tile_origin(tx, ty);
                composite.paste(&resized, x, y)?;
            }
            Ok(())
        })?;

        Ok(composite)
    }

    /// Level `L` of every tile's mip chain goes into row `L` of the plan.
    fn pack_stacked(
        &self,
        atlas: &PixelBuffer,
        plan: &LayoutMetadata,
    ) -> Result<PixelBuffer, AtlasError> {
        let builder = MipBuilder::new(self.config.tile_size, self.config.levels);
        let mut composite = PixelBuffer::transparent(plan.width, plan.height);

        self.for_each_tile(atlas, |tx, ty, tile| {
            let chain = builder.build_chain(tile)?;
            for (mip, cell) in chain.iter().zip(&plan.cells) {
                let (x, y) = cell.tile_origin(tx, ty);
                composite.paste(mip, x, y)?;
            }
            Ok(())
        })?;

        Ok(composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemip_spec::Fixup;

    fn composer(config: AtlasConfig) -> AtlasComposer {
        AtlasComposer::new(config).unwrap()
    }

    /// Atlas where every texel of tile (tx, ty) is [tx * 40, ty * 40, 7, 255].
    fn tiled_atlas(config: &AtlasConfig) -> PixelBuffer {
        let (w, h) = config.atlas_size();
        let mut atlas = PixelBuffer::transparent(w, h);
        for y in 0..h {
            for x in 0..w {
                let tx = x / config.tile_size;
                let ty = y / config.tile_size;
                atlas.set(x, y, [(tx * 40) as u8, (ty * 40) as u8, 7, 255]);
            }
        }
        atlas
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = AtlasComposer::new(AtlasConfig::new(0, 1, 1)).unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }

    #[test]
    fn new_rejects_config_whose_composite_overflows() {
        for config in [
            AtlasConfig::new(1 << 20, 4095, 1)
                .with_levels(2)
                .with_layout(LayoutKind::Grid),
            AtlasConfig::new(1 << 20, 1, 4095).with_levels(2),
        ] {
            let err = AtlasComposer::new(config).unwrap_err();
            assert!(matches!(err, AtlasError::Config(_)));
        }
    }

    #[test]
    fn size_mismatch_is_reported_before_fixups() {
        let composer = composer(AtlasConfig::new(4, 2, 2));
        let err = composer.compose(PixelBuffer::transparent(8, 7)).unwrap_err();
        match err {
            AtlasError::AtlasSizeMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => {
                assert_eq!((expected_width, expected_height), (8, 8));
                assert_eq!((width, height), (8, 7));
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn extract_tile_returns_canonical_copy() {
        let config = AtlasConfig::new(4, 3, 2);
        let atlas = tiled_atlas(&config);
        let tile = composer(config).extract_tile(&atlas, 2, 1).unwrap();
        assert_eq!(tile.size(), (4, 4));
        assert!(tile.data.iter().all(|&t| t == [80, 40, 7, 255]));
    }

    #[test]
    fn extract_tile_stretches_clipped_edge_tile() {
        let config = AtlasConfig::new(4, 2, 1);
        let composer = composer(config);
        // 7 px wide: tile (1, 0) only has 3 columns left
        let mut atlas = PixelBuffer::new(7, 4, [0, 0, 0, 255]);
        atlas.set(6, 0, [255, 255, 255, 255]);

        let tile = composer.extract_tile(&atlas, 1, 0).unwrap();
        assert_eq!(tile.size(), (4, 4));
        assert_eq!(tile.get(3, 0), [255, 255, 255, 255]);
        assert_eq!(tile.get(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn flat_layout_returns_fixed_atlas() {
        let config = AtlasConfig::new(2, 2, 1)
            .with_layout(LayoutKind::Flat)
            .with_fixup(Fixup::multiply([1, 0], [0.5, 0.5, 0.5]));
        let atlas = tiled_atlas(&config);
        let result = composer(config).compose(atlas).unwrap();

        assert_eq!(result.image.size(), (4, 2));
        assert_eq!(result.image.get(0, 0), [0, 0, 7, 255]);
        assert_eq!(result.image.get(3, 1), [20, 0, 4, 255]);
    }

    #[test]
    fn stacked_layout_places_each_level() {
        let config = AtlasConfig::new(4, 3, 2).with_levels(3);
        let atlas = tiled_atlas(&config);
        let result = composer(config).compose_with(atlas, LayoutKind::Stacked).unwrap();

        // widths: 12; heights: 8 + 4 + 2
        assert_eq!(result.image.size(), (12, 14));
        // level 1 starts at y = 8 with 2px tiles
        assert_eq!(result.image.get(2 * 2, 8 + 2), [80, 40, 7, 255]);
        // level 2 starts at y = 12 with 1px tiles
        assert_eq!(result.image.get(1, 12 + 1), [40, 40, 7, 255]);
        // right of level 2 is empty
        assert_eq!(result.image.get(5, 12), [0, 0, 0, 0]);
    }

    #[test]
    fn grid_layout_resizes_each_axis() {
        let config = AtlasConfig::new(4, 2, 1).with_levels(2);
        let atlas = tiled_atlas(&config);
        let result = composer(config).compose_with(atlas, LayoutKind::Grid).unwrap();

        // columns 8 + 4, rows 4 + 2
        assert_eq!(result.image.size(), (12, 6));
        let cell = result.metadata.cell(1, 0).unwrap();
        assert_eq!((cell.x, cell.y, cell.tile_width, cell.tile_height), (0, 4, 4, 2));
        // tile (1, 0) in row 1 column 0 spans x 4..8, y 4..6
        assert_eq!(result.image.get(4, 4), [40, 0, 7, 255]);
        assert_eq!(result.image.get(7, 5), [40, 0, 7, 255]);
        // tile (1, 0) in row 0 column 1 spans x 10..12, y 0..4
        assert_eq!(result.image.get(10, 3), [40, 0, 7, 255]);
    }
}
