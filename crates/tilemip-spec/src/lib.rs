//! tilemip Atlas Configuration Library
//!
//! This crate provides the configuration types, validation, and layout
//! metadata for the tilemip atlas preprocessor. Configurations are JSON
//! documents describing a fixed-grid sprite atlas, the ordered list of color
//! fixups to apply to it, and the composite layout to produce.
//!
//! # Example
//!
//! ```
//! use tilemip_spec::{AtlasConfig, Fixup, LayoutKind};
//! use tilemip_spec::validation::validate_config;
//!
//! let config = AtlasConfig::new(16, 4, 2)
//!     .with_levels(5)
//!     .with_layout(LayoutKind::Grid)
//!     .with_fixup(Fixup::multiply([1, 0], [0.6, 0.9, 0.2]));
//!
//! assert!(validate_config(&config).is_ok());
//! assert_eq!(config.atlas_size(), (64, 32));
//! ```
//!
//! # Modules
//!
//! - [`config`]: Atlas configuration, fixups, and layout selection
//! - [`error`]: Configuration error type
//! - [`layout`]: Layout metadata written alongside composite images
//! - [`validation`]: Configuration validation

pub mod config;
pub mod error;
pub mod layout;
pub mod validation;

pub use config::{
    AtlasConfig, Fixup, LayoutKind, DEFAULT_GRID, DEFAULT_LEVELS, DEFAULT_TILE_SIZE, GRASS_TINT,
    MAX_LEVELS,
};
pub use error::ConfigError;
pub use layout::{LayoutCell, LayoutMetadata};
pub use validation::validate_config;
