//! Plan command implementation
//!
//! Prints where every cell of the composite would land, without reading or
//! writing any image.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use tilemip_texture::AtlasComposer;

use super::load_config;

/// Run the plan command
///
/// # Arguments
/// * `config` - Optional path to a config JSON file
/// * `layout` - Optional layout override
/// * `json` - Print the plan as JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(config: Option<&str>, layout: Option<&str>, json: bool) -> Result<ExitCode> {
    let config = load_config(config, layout)?;
    let composer = AtlasComposer::new(config).context("Invalid atlas configuration")?;
    let plan = composer.plan();

    if json {
        let out = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    let (source_w, source_h) = composer.config().atlas_size();
    println!(
        "{} {} layout, {}x{} source -> {}x{} composite",
        "Plan:".cyan().bold(),
        plan.layout,
        source_w,
        source_h,
        plan.width,
        plan.height
    );
    for cell in &plan.cells {
        println!(
            "  {} at ({}, {}) {}x{}, tiles {}x{}",
            format!("[{}, {}]", cell.row, cell.column).dimmed(),
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            cell.tile_width,
            cell.tile_height
        );
    }

    Ok(ExitCode::SUCCESS)
}
