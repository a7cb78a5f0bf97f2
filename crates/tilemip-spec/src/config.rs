//! Atlas configuration types.
//!
//! An [`AtlasConfig`] fully describes one preprocessing run: the tile grid of
//! the source atlas, how many mip levels to derive, which composite layout to
//! emit, and the ordered list of color [`Fixup`]s applied before expansion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::validate_config;

/// Edge length of one atlas tile in the production atlas.
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Tile grid `[columns, rows]` of the production atlas.
pub const DEFAULT_GRID: [u32; 2] = [64, 32];

/// Mip levels derived per tile (16, 8, 4, 2, 1).
pub const DEFAULT_LEVELS: u32 = 5;

/// Upper bound on mip levels; edges clamp at 1 long before this.
pub const MAX_LEVELS: u32 = 16;

/// RGB multiplier used to tint the grass tiles of the production atlas.
pub const GRASS_TINT: [f64; 3] = [0.6, 0.9, 0.2];

fn default_levels() -> u32 {
    DEFAULT_LEVELS
}

/// Composite image layout produced by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// The fixed-up atlas at its original size.
    Flat,
    /// `levels × levels` full atlases, one per (row scale, column scale) pair.
    Grid,
    /// One full atlas per mip level, stacked vertically.
    #[default]
    Stacked,
}

impl LayoutKind {
    /// All layout kinds, in declaration order.
    pub const ALL: [LayoutKind; 3] = [LayoutKind::Flat, LayoutKind::Grid, LayoutKind::Stacked];

    /// Returns the config/CLI name of this layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Flat => "flat",
            LayoutKind::Grid => "grid",
            LayoutKind::Stacked => "stacked",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ConfigError::invalid(format!(
                    "unknown layout '{}' (expected flat, grid, or stacked)",
                    s
                ))
            })
    }
}

/// A per-tile color correction applied to the source atlas.
///
/// Tile coordinates are `[tx, ty]` grid indices, not pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Fixup {
    /// Multiply the RGB channels of one tile; alpha is left as-is.
    Multiply {
        /// Tile to tint.
        tile: [u32; 2],
        /// RGB multipliers.
        mul: [f64; 3],
    },
    /// Stamp the tinted `src` tile onto `dst` wherever `src` has coverage.
    ReplaceMasked {
        /// Tile providing the decal and its mask.
        src: [u32; 2],
        /// Tile receiving the decal.
        dst: [u32; 2],
        /// RGB multipliers applied to the source texels.
        mul: [f64; 3],
        /// Source texels with alpha above this value are copied.
        #[serde(default)]
        alpha_threshold: u8,
    },
}

impl Fixup {
    /// Creates a multiply fixup.
    pub fn multiply(tile: [u32; 2], mul: [f64; 3]) -> Self {
        Fixup::Multiply { tile, mul }
    }

    /// Creates a masked replace fixup with an alpha threshold of 0.
    pub fn replace_masked(src: [u32; 2], dst: [u32; 2], mul: [f64; 3]) -> Self {
        Fixup::ReplaceMasked {
            src,
            dst,
            mul,
            alpha_threshold: 0,
        }
    }

    /// Returns the RGB multipliers of this fixup.
    pub fn mul(&self) -> [f64; 3] {
        match self {
            Fixup::Multiply { mul, .. } | Fixup::ReplaceMasked { mul, .. } => *mul,
        }
    }

    /// Returns every tile this fixup reads or writes.
    pub fn tiles(&self) -> Vec<[u32; 2]> {
        match self {
            Fixup::Multiply { tile, .. } => vec![*tile],
            Fixup::ReplaceMasked { src, dst, .. } => vec![*src, *dst],
        }
    }
}

/// Configuration for one atlas preprocessing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtlasConfig {
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Tile grid `[columns, rows]`.
    pub grid: [u32; 2],
    /// Number of mip levels derived per tile.
    #[serde(default = "default_levels")]
    pub levels: u32,
    /// Composite layout to emit.
    #[serde(default)]
    pub layout: LayoutKind,
    /// Color corrections, applied in order.
    #[serde(default)]
    pub fixups: Vec<Fixup>,
}

impl Default for AtlasConfig {
    /// The production atlas: 64×32 tiles of 16 px, with the grass top tinted
    /// and the tinted grass overlay stamped onto the grass side tile.
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            grid: DEFAULT_GRID,
            levels: DEFAULT_LEVELS,
            layout: LayoutKind::default(),
            fixups: vec![
                Fixup::multiply([31, 2], GRASS_TINT),
                Fixup::replace_masked([31, 0], [30, 15], GRASS_TINT),
            ],
        }
    }
}

impl AtlasConfig {
    /// Creates a config for a `grid_w × grid_h` grid with no fixups.
    pub fn new(tile_size: u32, grid_w: u32, grid_h: u32) -> Self {
        Self {
            tile_size,
            grid: [grid_w, grid_h],
            levels: DEFAULT_LEVELS,
            layout: LayoutKind::default(),
            fixups: Vec::new(),
        }
    }

    /// Sets the number of mip levels.
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the composite layout.
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    /// Appends a fixup.
    pub fn with_fixup(mut self, fixup: Fixup) -> Self {
        self.fixups.push(fixup);
        self
    }

    /// Number of tile columns.
    pub fn grid_width(&self) -> u32 {
        self.grid[0]
    }

    /// Number of tile rows.
    pub fn grid_height(&self) -> u32 {
        self.grid[1]
    }

    /// Expected source atlas size in pixels.
    pub fn atlas_size(&self) -> (u32, u32) {
        (
            self.grid_width() * self.tile_size,
            self.grid_height() * self.tile_size,
        )
    }

    /// Parses and validates a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AtlasConfig = serde_json::from_str(json)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Serializes the config as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_matches_production_atlas() {
        let config = AtlasConfig::default();
        assert_eq!(config.atlas_size(), (1024, 512));
        assert_eq!(config.levels, 5);
        assert_eq!(config.layout, LayoutKind::Stacked);
        assert_eq!(
            config.fixups,
            vec![
                Fixup::multiply([31, 2], GRASS_TINT),
                Fixup::replace_masked([31, 0], [30, 15], GRASS_TINT),
            ]
        );
    }

    #[test]
    fn config_from_json_with_defaults() {
        let json = r#"
        {
          "tile_size": 8,
          "grid": [4, 2]
        }
        "#;

        let config = AtlasConfig::from_json(json).unwrap();
        assert_eq!(config, AtlasConfig::new(8, 4, 2));
        assert_eq!(config.levels, DEFAULT_LEVELS);
        assert!(config.fixups.is_empty());
    }

    #[test]
    fn config_from_json_with_fixups() {
        let json = r#"
        {
          "tile_size": 16,
          "grid": [64, 32],
          "levels": 3,
          "layout": "grid",
          "fixups": [
            { "op": "multiply", "tile": [31, 2], "mul": [0.6, 0.9, 0.2] },
            { "op": "replace_masked", "src": [31, 0], "dst": [30, 15],
              "mul": [0.6, 0.9, 0.2], "alpha_threshold": 10 }
          ]
        }
        "#;

        let config = AtlasConfig::from_json(json).unwrap();
        assert_eq!(config.levels, 3);
        assert_eq!(config.layout, LayoutKind::Grid);
        assert_eq!(config.fixups.len(), 2);
        assert_eq!(
            config.fixups[1],
            Fixup::ReplaceMasked {
                src: [31, 0],
                dst: [30, 15],
                mul: [0.6, 0.9, 0.2],
                alpha_threshold: 10,
            }
        );
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let json = r#"{ "tile_size": 16, "grid": [1, 1], "padding": 2 }"#;
        let err = AtlasConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn config_json_roundtrip() {
        let config = AtlasConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"replace_masked\""));
        let parsed = AtlasConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn layout_kind_parses_case_insensitively() {
        assert_eq!("Grid".parse::<LayoutKind>().unwrap(), LayoutKind::Grid);
        assert_eq!("stacked".parse::<LayoutKind>().unwrap(), LayoutKind::Stacked);
        assert_eq!("FLAT".parse::<LayoutKind>().unwrap(), LayoutKind::Flat);
        assert!("mosaic".parse::<LayoutKind>().is_err());
    }

    #[test]
    fn layout_kind_display_matches_serde_name() {
        for kind in LayoutKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn fixup_tiles_lists_every_touched_tile() {
        assert_eq!(Fixup::multiply([1, 2], [1.0; 3]).tiles(), vec![[1, 2]]);
        assert_eq!(
            Fixup::replace_masked([3, 4], [5, 6], [1.0; 3]).tiles(),
            vec![[3, 4], [5, 6]]
        );
    }
}
