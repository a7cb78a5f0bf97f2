//! Per-tile color corrections.
//!
//! Both operations work on a cropped copy of the addressed tile and paste the
//! result back, so a failed address never leaves a half-written tile.

use log::debug;
use tilemip_spec::Fixup;

use crate::buffer::{PixelBuffer, Rect};
use crate::color::Rgba8;
use crate::error::AtlasError;

/// Multiply one 8-bit channel, clamping to [0, 255] and rounding half away from zero.
#[inline]
pub fn scale_channel(value: u8, mul: f64) -> u8 {
    (value as f64 * mul).clamp(0.0, 255.0).round() as u8
}

/// Multiply the RGB of a texel, keeping its alpha.
#[inline]
fn tint(texel: Rgba8, mul: [f64; 3]) -> Rgba8 {
    [
        scale_channel(texel[0], mul[0]),
        scale_channel(texel[1], mul[1]),
        scale_channel(texel[2], mul[2]),
        texel[3],
    ]
}

/// Multiply the RGB of every texel in tile `(tx, ty)`. Alpha is untouched.
pub fn multiply_tile(
    buffer: &mut PixelBuffer,
    tile_size: u32,
    tile: [u32; 2],
    mul: [f64; 3],
) -> Result<(), AtlasError> {
    let rect = Rect::tile(tile[0], tile[1], tile_size);
    let mut region = buffer.crop(rect)?;

    for texel in region.data.iter_mut() {
        *texel = tint(*texel, mul);
    }

    buffer.paste(&region, rect.left, rect.top)
}

/// Stamp the tinted `src` tile onto the `dst` tile wherever `src` alpha exceeds
/// `alpha_threshold`.
///
/// Stamped texels take the source alpha; all other destination texels are left
/// byte-for-byte unchanged.
pub fn replace_masked(
    buffer: &mut PixelBuffer,
    tile_size: u32,
    src: [u32; 2],
    dst: [u32; 2],
    mul: [f64; 3],
    alpha_threshold: u8,
) -> Result<(), AtlasError> {
    let src_rect = Rect::tile(src[0], src[1], tile_size);
    let dst_rect = Rect::tile(dst[0], dst[1], tile_size);

    let decal = buffer.crop(src_rect)?;
    let mut target = buffer.crop(dst_rect)?;

    for (out, &texel) in target.data.iter_mut().zip(decal.data.iter()) {
        if texel[3] > alpha_threshold {
            *out = tint(texel, mul);
        }
    }

    buffer.paste(&target, dst_rect.left, dst_rect.top)
}

/// Apply fixups in order.
///
/// Later fixups see the output of earlier ones.
pub fn apply_fixups(
    buffer: &mut PixelBuffer,
    tile_size: u32,
    fixups: &[Fixup],
) -> Result<(), AtlasError> {
    for fixup in fixups {
        debug!("applying fixup {:?}", fixup);
        match fixup {
            Fixup::Multiply { tile, mul } => multiply_tile(buffer, tile_size, *tile, *mul)?,
            Fixup::ReplaceMasked {
                src,
                dst,
                mul,
                alpha_threshold,
            } => replace_masked(buffer, tile_size, *src, *dst, *mul, *alpha_threshold)?,
        }
    }
    Ok(())
}
