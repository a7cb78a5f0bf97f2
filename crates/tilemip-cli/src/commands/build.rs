//! Build command implementation
//!
//! Reads the source atlas, runs the composer, and writes the composite PNG
//! (plus an optional layout sidecar).

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tilemip_texture::{AtlasComposer, PngConfig};

use super::load_config;

/// Default source atlas path.
pub const DEFAULT_INPUT: &str = "assets/atlas_original.png";

/// Default composite output path.
pub const DEFAULT_OUTPUT: &str = "assets/atlas_generated.png";

/// Options for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions<'a> {
    pub input: &'a str,
    pub output: &'a str,
    pub config: Option<&'a str>,
    pub layout: Option<&'a str>,
    pub metadata: Option<&'a str>,
}

/// What a successful build wrote.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub input: String,
    pub output: String,
    pub layout: String,
    pub width: u32,
    pub height: u32,
    pub cells: usize,
    /// BLAKE3 hash of the written PNG.
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Run the build command
///
/// # Arguments
/// * `options` - Input, output, and config paths
/// * `json` - Print a machine-readable summary instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(options: &BuildOptions<'_>, json: bool) -> Result<ExitCode> {
    if !json {
        println!("{} {}", "Building:".cyan().bold(), options.input);
    }

    let summary = execute(options)?;

    if json {
        let out = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize build summary")?;
        println!("{}", out);
    } else {
        println!(
            "{} Wrote {} ({}x{}, {} layout)",
            "SUCCESS".green().bold(),
            summary.output,
            summary.width,
            summary.height,
            summary.layout
        );
        if let Some(metadata) = &summary.metadata {
            println!("  {} {}", "metadata:".dimmed(), metadata);
        }
        println!("  {} {}", "blake3:".dimmed(), summary.hash);
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the composite and write it to disk.
///
/// The PNG and the metadata sidecar are both encoded before any file is
/// created. If the sidecar cannot be written the composite is removed again,
/// so a failed run leaves no output behind.
pub fn execute(options: &BuildOptions<'_>) -> Result<BuildSummary> {
    let config = load_config(options.config, options.layout)?;
    let composer = AtlasComposer::new(config).context("Invalid atlas configuration")?;

    let source = fs::read(options.input)
        .with_context(|| format!("Failed to read input atlas: {}", options.input))?;
    let atlas = composer.load_png(&source)?;

    let result = composer.compose(atlas)?;
    let (png, hash) = result
        .encode_png(&PngConfig::default())
        .context("Failed to encode composite PNG")?;

    let sidecar = match options.metadata {
        Some(path) => {
            let json = serde_json::to_string_pretty(&result.metadata)
                .context("Failed to serialize layout metadata")?;
            Some((path, json))
        }
        None => None,
    };

    write_creating_parent(options.output, &png)?;

    if let Some((path, json)) = sidecar {
        if let Err(e) = write_creating_parent(path, json.as_bytes()) {
            if let Err(remove_err) = fs::remove_file(options.output) {
                log::warn!("failed to remove {}: {}", options.output, remove_err);
            }
            return Err(e);
        }
    }

    Ok(BuildSummary {
        input: options.input.to_string(),
        output: options.output.to_string(),
        layout: result.metadata.layout.to_string(),
        width: result.image.width,
        height: result.image.height,
        cells: result.metadata.cells.len(),
        hash,
        metadata: options.metadata.map(str::to_string),
    })
}

fn write_creating_parent(path: &str, contents: &[u8]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("Failed to write: {}", path))
}
