//! Fant's resampling for ARGB scanlines.
//!
//! Fant's algorithm walks input and output pixels in lockstep, splitting
//! input pixels across output boundaries and area-averaging what lands in
//! each output pixel. It handles both magnification and minification along a
//! single scanline, so a 2D resize is two passes (rows, then columns via
//! `stride`).
//!
//! `out[i]` is the output position of the left edge of input pixel `i`; the
//! array needs `length + 1` entries.

use crate::{MathError, MathResult};
use tilt_core::pixel::unpack_argb;

#[inline]
fn channels(argb: u32) -> [f32; 4] {
    unpack_argb(argb).map(|c| c as f32)
}

#[inline]
fn pack_sum(sum: [f32; 4], size: f32) -> u32 {
    let ch = |c: usize| (sum[c] / size).min(255.0) as u8 as u32;
    ch(0) << 24 | ch(1) << 16 | ch(2) << 8 | ch(3)
}

fn check(buffer: &'static str, needed: usize, len: usize) -> MathResult<()> {
    if len < needed {
        return Err(MathError::ScanlineTooShort {
            buffer,
            needed,
            len,
        });
    }
    Ok(())
}

fn check_edges(out: &[f32]) -> MathResult<()> {
    let bad = out
        .iter()
        .enumerate()
        .find(|&(k, &v)| !v.is_finite() || (k > 0 && v <= out[k - 1]));
    match bad {
        Some((index, _)) => Err(MathError::NonMonotonicMap { index }),
        None => Ok(()),
    }
}

/// Resamples one scanline of `length` pixels from `source` into `dest`.
///
/// Pixels are read and written at `offset + k * stride`, so a column of a
/// row-major image is resampled by passing `stride = width`.
///
/// # Errors
///
/// Returns [`MathError::ScanlineTooShort`] if `length < 2` or any buffer
/// cannot hold the addressed pixels, and [`MathError::NonMonotonicMap`] if
/// the first `length + 1` entries of `out` are not finite and strictly
/// increasing.
///
/// ```rust
/// use tilt_math::resample;
///
/// // Identity mapping copies the scanline.
/// let src = [0xFF000000, 0xFF101010, 0xFF202020, 0xFF303030];
/// let mut dst = [0u32; 4];
/// let out = [0.0, 1.0, 2.0, 3.0, 4.0];
/// resample(&src, &mut dst, 4, 0, 1, &out).unwrap();
/// assert_eq!(&dst[..3], &src[..3]);
/// ```
pub fn resample(
    source: &[u32],
    dest: &mut [u32],
    length: usize,
    offset: usize,
    stride: usize,
    out: &[f32],
) -> MathResult<()> {
    check("length", 2, length)?;
    check("out", length + 1, out.len())?;
    check("source", offset + stride + 1, source.len())?;
    check("dest", offset + (length - 2) * stride + 1, dest.len())?;
    check_edges(&out[..=length])?;

    // Input position of every output pixel edge.
    let mut inp = vec![0.0f32; length + 1];
    let mut i = 0usize;
    for (j, slot) in inp.iter_mut().take(length).enumerate() {
        let jf = j as f32;
        while i + 2 < out.len() && out[i + 1] < jf {
            i += 1;
        }
        *slot = i as f32 + (jf - out[i]) / (out[i + 1] - out[i]);
    }
    inp[length] = length as f32;

    let mut in_segment = 1.0f32;
    let mut out_segment = inp[1];
    let mut size = out_segment;
    let mut sum = [0.0f32; 4];

    let mut src = offset;
    let mut current = channels(source[src]);
    src += stride;
    let mut argb = source[src];
    let mut next = channels(argb);
    src += stride;

    let mut dst = offset;
    let mut i = 1;
    while i < length {
        let intensity: [f32; 4] =
            std::array::from_fn(|c| in_segment * current[c] + (1.0 - in_segment) * next[c]);

        if in_segment < out_segment {
            for c in 0..4 {
                sum[c] += intensity[c] * in_segment;
            }
            out_segment -= in_segment;
            in_segment = 1.0;
            current = next;
            if src < source.len() {
                argb = source[src];
            }
            next = channels(argb);
            src += stride;
        } else {
            for c in 0..4 {
                sum[c] += intensity[c] * out_segment;
            }
            dest[dst] = pack_sum(sum, size);
            dst += stride;
            sum = [0.0; 4];
            in_segment -= out_segment;
            out_segment = inp[i + 1] - inp[i];
            size = out_segment;
            i += 1;
        }
    }
    Ok(())
}
