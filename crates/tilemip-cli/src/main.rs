//! tilemip CLI - Command-line interface for tile atlas mip composites
//!
//! This binary reads a fixed-grid sprite atlas, applies color fixups, and
//! writes a composite of downscaled variants of every tile.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use tilemip_cli::commands;
use tilemip_cli::commands::build::BuildOptions;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            config,
            layout,
            metadata,
            json,
        } => {
            let options = BuildOptions {
                input: &input,
                output: &output,
                config: config.as_deref(),
                layout: layout.as_deref(),
                metadata: metadata.as_deref(),
            };
            commands::build::run(&options, json)
        }
        Commands::Plan {
            config,
            layout,
            json,
        } => commands::plan::run(config.as_deref(), layout.as_deref(), json),
        Commands::Config => commands::config::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build_defaults() {
        let cli = Cli::try_parse_from(["tilemip", "build"]).unwrap();
        match cli.command {
            Commands::Build {
                input,
                output,
                config,
                layout,
                metadata,
                json,
            } => {
                assert_eq!(input, "assets/atlas_original.png");
                assert_eq!(output, "assets/atlas_generated.png");
                assert!(config.is_none());
                assert!(layout.is_none());
                assert!(metadata.is_none());
                assert!(!json);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_build_with_all_flags() {
        let cli = Cli::try_parse_from([
            "tilemip",
            "build",
            "--input",
            "in.png",
            "--output",
            "out/atlas.png",
            "--config",
            "atlas.json",
            "--layout",
            "grid",
            "--metadata",
            "out/atlas.json",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Build {
                input,
                output,
                config,
                layout,
                metadata,
                json,
            } => {
                assert_eq!(input, "in.png");
                assert_eq!(output, "out/atlas.png");
                assert_eq!(config.as_deref(), Some("atlas.json"));
                assert_eq!(layout.as_deref(), Some("grid"));
                assert_eq!(metadata.as_deref(), Some("out/atlas.json"));
                assert!(json);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_layout() {
        let err = Cli::try_parse_from(["tilemip", "build", "--layout", "diagonal"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_parses_plan() {
        let cli = Cli::try_parse_from(["tilemip", "plan", "-l", "stacked", "--json"]).unwrap();
        match cli.command {
            Commands::Plan {
                config,
                layout,
                json,
            } => {
                assert!(config.is_none());
                assert_eq!(layout.as_deref(), Some("stacked"));
                assert!(json);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_cli_parses_config() {
        let cli = Cli::try_parse_from(["tilemip", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config));
    }
}
