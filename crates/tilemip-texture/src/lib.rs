//! tilemip Atlas Processing Backend
//!
//! This crate turns a fixed-grid sprite atlas into a composite of downscaled
//! variants of every tile. All output is byte-identical for the same source
//! image and configuration.
//!
//! # Features
//!
//! - **Pixel buffers**: RGBA8 rasters with crop, paste, and nearest resize
//! - **Color fixups**: per-tile RGB multiply and alpha-masked decal stamping
//! - **Box resampling**: area-weighted filtering in premultiplied alpha space
//! - **Mip chains**: each level downsampled from the one before it
//! - **Composite layouts**: flat, anisotropic scale grid, or stacked mip levels
//! - **Deterministic PNG**: fixed compression settings for byte-identical output
//!
//! # Example
//!
//! ```no_run
//! use tilemip_spec::{AtlasConfig, LayoutKind};
//! use tilemip_texture::{AtlasComposer, PngConfig};
//!
//! let composer = AtlasComposer::new(AtlasConfig::default().with_layout(LayoutKind::Stacked))?;
//! let source = std::fs::read("assets/atlas_original.png")?;
//! let atlas = composer.load_png(&source)?;
//! let result = composer.compose(atlas)?;
//! let (png, hash) = result.encode_png(&PngConfig::default())?;
//! std::fs::write("assets/atlas_generated.png", png)?;
//! println!("{}x{} {}", result.image.width, result.image.height, hash);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod buffer;
pub mod color;
pub mod color_ops;
pub mod compose;
pub mod error;
pub mod mip;
pub mod plan;
pub mod png;
pub mod resample;

// Re-export main types for convenience
pub use buffer::{PixelBuffer, Rect};
pub use color::{Color, Rgba8, ALPHA_EPSILON};
pub use color_ops::{apply_fixups, multiply_tile, replace_masked};
pub use compose::{AtlasComposer, ComposeResult};
pub use error::AtlasError;
pub use mip::{mip_edge, mip_sizes, MipBuilder};
pub use plan::{plan_layout, prefix_offsets};
pub use png::{PngConfig, PngError};
pub use resample::resize_box;
