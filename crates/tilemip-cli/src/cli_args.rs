//! CLI argument definitions for the tilemip command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use tilemip_cli::commands::build::{DEFAULT_INPUT, DEFAULT_OUTPUT};

/// tilemip - Tile Atlas Mip Composite Builder
#[derive(Parser)]
#[command(name = "tilemip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build the composite atlas from a source atlas PNG
    Build {
        /// Path to the source atlas PNG
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: String,

        /// Path to the composite PNG to write
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: String,

        /// Path to an atlas config file (JSON); defaults to the built-in config
        #[arg(short, long)]
        config: Option<String>,

        /// Composite layout (overrides the config)
        #[arg(short, long, value_parser = ["flat", "grid", "stacked"])]
        layout: Option<String>,

        /// Also write the layout metadata (JSON) to this path
        #[arg(short, long)]
        metadata: Option<String>,

        /// Output a machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the composite layout plan without processing an image
    Plan {
        /// Path to an atlas config file (JSON); defaults to the built-in config
        #[arg(short, long)]
        config: Option<String>,

        /// Composite layout (overrides the config)
        #[arg(short, long, value_parser = ["flat", "grid", "stacked"])]
        layout: Option<String>,

        /// Output the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in atlas config as JSON
    Config,
}
