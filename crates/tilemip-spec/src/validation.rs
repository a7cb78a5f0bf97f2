//! Config validation logic.

use crate::config::{AtlasConfig, Fixup, MAX_LEVELS};
use crate::error::ConfigError;

/// Validates an atlas config.
///
/// Checks that the grid and tile size describe a non-empty atlas, that the
/// level count is in `1..=MAX_LEVELS`, and that every fixup has finite
/// non-negative multipliers and addresses tiles inside the grid.
///
/// The atlas and every composite it can be packed into must fit in `u32`
/// pixels per axis. The grid layout is the largest on both axes, so its
/// extent is checked whatever layout is configured.
///
/// # Example
/// ```
/// use tilemip_spec::{AtlasConfig, Fixup};
/// use tilemip_spec::validation::validate_config;
///
/// let config = AtlasConfig::new(16, 2, 2).with_fixup(Fixup::multiply([5, 0], [1.0; 3]));
/// assert!(validate_config(&config).is_err());
/// ```
pub fn validate_config(config: &AtlasConfig) -> Result<(), ConfigError> {
    if config.tile_size == 0 {
        return Err(ConfigError::invalid("tile_size must be non-zero"));
    }

    let [grid_w, grid_h] = config.grid;
    if grid_w == 0 || grid_h == 0 {
        return Err(ConfigError::invalid(format!(
            "grid must be non-zero, got {}x{}",
            grid_w, grid_h
        )));
    }

    if grid_w.checked_mul(config.tile_size).is_none()
        || grid_h.checked_mul(config.tile_size).is_none()
    {
        return Err(ConfigError::invalid(format!(
            "atlas size {}x{} tiles of {} px overflows",
            grid_w, grid_h, config.tile_size
        )));
    }

    if config.levels == 0 || config.levels > MAX_LEVELS {
        return Err(ConfigError::invalid(format!(
            "levels must be in 1..={}, got {}",
            MAX_LEVELS, config.levels
        )));
    }

    validate_composite_extent(config)?;

    for (index, fixup) in config.fixups.iter().enumerate() {
        validate_fixup(config, index, fixup)?;
    }

    Ok(())
}

/// Grid composite extent: `grid × Σ max(1, tile_size >> level)` on each axis.
fn validate_composite_extent(config: &AtlasConfig) -> Result<(), ConfigError> {
    let overflow = || {
        ConfigError::invalid(format!(
            "composite for {}x{} tiles of {} px with {} levels overflows",
            config.grid_width(),
            config.grid_height(),
            config.tile_size,
            config.levels
        ))
    };

    let scale_sum = (0..config.levels).try_fold(0u32, |sum, level| {
        let edge = config.tile_size.checked_shr(level).unwrap_or(0).max(1);
        sum.checked_add(edge)
    });
    let scale_sum = scale_sum.ok_or_else(overflow)?;

    config
        .grid_width()
        .checked_mul(scale_sum)
        .and(config.grid_height().checked_mul(scale_sum))
        .ok_or_else(overflow)?;

    Ok(())
}

fn validate_fixup(config: &AtlasConfig, index: usize, fixup: &Fixup) -> Result<(), ConfigError> {
    if let Some(m) = fixup.mul().iter().find(|m| !m.is_finite() || **m < 0.0) {
        return Err(ConfigError::invalid(format!(
            "fixup #{}: multiplier {} must be finite and non-negative",
            index, m
        )));
    }

    for [tx, ty] in fixup.tiles() {
        if tx >= config.grid_width() || ty >= config.grid_height() {
            return Err(ConfigError::invalid(format!(
                "fixup #{}: tile ({}, {}) is outside the {}x{} grid",
                index,
                tx,
                ty,
                config.grid_width(),
                config.grid_height()
            )));
        }
    }

    Ok(())
}
