//! Config command implementation
//!
//! Prints the built-in configuration as JSON, ready to be edited and passed
//! back with `--config`.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tilemip_spec::AtlasConfig;

/// Run the config command
pub fn run() -> Result<ExitCode> {
    let json = AtlasConfig::default()
        .to_json_pretty()
        .context("Failed to serialize default config")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
