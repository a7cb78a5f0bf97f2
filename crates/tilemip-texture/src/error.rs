//! Error type shared by every atlas processing stage.

use thiserror::Error;
use tilemip_spec::ConfigError;

use crate::buffer::Rect;
use crate::png::PngError;

/// Errors that can occur while processing an atlas.
///
/// None of these are recoverable: each aborts the run.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The decoded source does not have the configured pixel size.
    #[error(
        "Atlas size {width}x{height} does not match expected {expected_width}x{expected_height}"
    )]
    AtlasSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// A crop, paste, or tile address falls outside a buffer.
    #[error("Region {rect} is out of bounds for a {width}x{height} buffer")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    /// A requested buffer size has a zero dimension.
    #[error("Invalid size {width}x{height}: dimensions must be non-zero")]
    InvalidSize { width: u32, height: u32 },

    /// Raw texel data does not match the declared dimensions.
    #[error("Expected {expected} bytes of RGBA data, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// The atlas configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// PNG decoding or encoding failed.
    #[error("PNG error: {0}")]
    Png(#[from] PngError),
}
