//! CLI command implementations

pub mod build;
pub mod config;
pub mod plan;

use anyhow::{Context, Result};
use std::fs;
use tilemip_spec::{AtlasConfig, LayoutKind};

/// Load the atlas config from `path` (or the built-in default) and apply a
/// `--layout` override.
pub fn load_config(path: Option<&str>, layout: Option<&str>) -> Result<AtlasConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            AtlasConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => AtlasConfig::default(),
    };

    if let Some(layout) = layout {
        config.layout = layout.parse::<LayoutKind>()?;
    }

    Ok(config)
}
