//! Premultiplied-alpha box-filter resampling.
//!
//! Filtering straight-alpha RGB lets the (usually black) color of fully
//! transparent texels bleed into partially covered results, which shows up as
//! dark fringes around sprite edges. Every channel is therefore filtered in
//! premultiplied space and un-premultiplied afterwards.
//!
//! The filter is separable: rows are resampled to the target width first, then
//! columns to the target height. Each destination sample `i` covers the source
//! interval `[i * S / D, (i + 1) * S / D)` and averages the source samples it
//! overlaps, weighted by the overlap length.

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::AtlasError;

/// Source samples contributing to one destination sample.
#[derive(Debug, Clone, PartialEq)]
struct Footprint {
    /// Index of the first contributing source sample.
    start: usize,
    /// Normalized weights, one per source sample from `start`.
    weights: Vec<f64>,
}

/// Compute the box-filter footprint of every destination sample.
fn footprints(src_len: u32, dst_len: u32) -> Vec<Footprint> {
    let src = src_len as f64;
    let dst = dst_len as f64;

    (0..dst_len)
        .map(|i| {
            let lo = i as f64 * src / dst;
            let hi = (i + 1) as f64 * src / dst;

            let first = lo.floor() as usize;
            let last = (hi.ceil() as usize).min(src_len as usize);

            let mut weights: Vec<f64> = (first..last)
                .map(|s| {
                    let left = lo.max(s as f64);
                    let right = hi.min((s + 1) as f64);
                    (right - left).max(0.0)
                })
                .collect();

            let total: f64 = weights.iter().sum();
            if total > 0.0 {
                for w in weights.iter_mut() {
                    *w /= total;
                }
            }

            Footprint {
                start: first,
                weights,
            }
        })
        .collect()
}

/// Weighted sum over `footprint`, reading samples `stride` apart from `base`.
#[inline]
fn filter(samples: &[Color], base: usize, stride: usize, footprint: &Footprint) -> Color {
    let mut acc = Color::transparent();
    for (k, &w) in footprint.weights.iter().enumerate() {
        let c = samples[base + (footprint.start + k) * stride];
        acc.r += c.r * w;
        acc.g += c.g * w;
        acc.b += c.b * w;
        acc.a += c.a * w;
    }
    acc
}

/// Resize `src` to `width × height` with a premultiplied-alpha box filter.
///
/// Same-size resizes reproduce every texel with non-zero alpha exactly (up to
/// rounding); fully transparent texels come out as `[0, 0, 0, 0]`.
///
/// # Errors
/// [`AtlasError::InvalidSize`] if either target dimension is zero or `src` is
/// empty.
pub fn resize_box(src: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer, AtlasError> {
    if width == 0 || height == 0 {
        return Err(AtlasError::InvalidSize { width, height });
    }
    if src.pixel_count() == 0 {
        return Err(AtlasError::InvalidSize {
            width: src.width,
            height: src.height,
        });
    }

    let src_w = src.width as usize;
    let src_h = src.height as usize;
    let dst_w = width as usize;
    let dst_h = height as usize;

    let premultiplied: Vec<Color> = src
        .data
        .iter()
        .map(|&t| Color::from_rgba8(t).premultiply())
        .collect();

    // Horizontal pass: src_w × src_h -> dst_w × src_h
    let columns = footprints(src.width, width);
    let mut horizontal = Vec::with_capacity(dst_w * src_h);
    for y in 0..src_h {
        let row = y * src_w;
        horizontal.extend(columns.iter().map(|fp| filter(&premultiplied, row, 1, fp)));
    }

    // Vertical pass: dst_w × src_h -> dst_w × dst_h
    let rows = footprints(src.height, height);
    let mut data = Vec::with_capacity(dst_w * dst_h);
    for fp in &rows {
        for x in 0..dst_w {
            let c = filter(&horizontal, x, dst_w, fp);
            data.push(c.unpremultiply().to_rgba8());
        }
    }

    Ok(PixelBuffer {
        width,
        height,
        data,
    })
}
