//! Portable tier on aarch64: NEON kernels, 4 lanes of `f32` per register.

use std::arch::aarch64::*;

use super::{fold_lanes, PORTABLE_LANES as LANES};

/// Reduce the bulk of `data` in chunks of `dimensions * 4` elements.
///
/// Returns the number of leading elements consumed.
///
/// # Safety
/// Requires NEON (always available on aarch64). `dimensions` must be
/// non-zero and `min` / `max` must have `dimensions` entries.
#[target_feature(enable = "neon")]
pub unsafe fn min_max(data: &[f32], dimensions: usize, min: &mut [f32], max: &mut [f32]) -> usize {
    let chunk = dimensions * LANES;
    let bulk = data.len() - data.len() % chunk;
    let ptr = data.as_ptr();

    let mut lo = vec![vdupq_n_f32(f32::INFINITY); dimensions];
    let mut hi = vec![vdupq_n_f32(f32::NEG_INFINITY); dimensions];

    let mut i = 0;
    while i < bulk {
        let base = ptr.add(i);
        for (k, (l, h)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
            let v = vld1q_f32(base.add(k * LANES));
            *l = min_f32x4(*l, v);
            *h = max_f32x4(*h, v);
        }
        i += chunk;
    }

    let mut lo_lanes = [0f32; LANES];
    let mut hi_lanes = [0f32; LANES];
    for (k, (l, h)) in lo.iter().zip(hi.iter()).enumerate() {
        vst1q_f32(lo_lanes.as_mut_ptr(), *l);
        vst1q_f32(hi_lanes.as_mut_ptr(), *h);
        fold_lanes(&lo_lanes, &hi_lanes, k * LANES, dimensions, min, max);
    }

    bulk
}

/// 3-component variant of [`min_max`].
///
/// # Safety
/// Requires NEON. `min` / `max` must have 3 entries.
#[target_feature(enable = "neon")]
pub unsafe fn min_max_3d(data: &[f32], min: &mut [f32], max: &mut [f32]) -> usize {
    const CHUNK: usize = 3 * LANES;
    let bulk = data.len() - data.len() % CHUNK;
    let ptr = data.as_ptr();

    let mut lo0 = vdupq_n_f32(f32::INFINITY);
    let mut lo1 = lo0;
    let mut lo2 = lo0;
    let mut hi0 = vdupq_n_f32(f32::NEG_INFINITY);
    let mut hi1 = hi0;
    let mut hi2 = hi0;

    let mut i = 0;
    while i < bulk {
        let a = vld1q_f32(ptr.add(i));
        let b = vld1q_f32(ptr.add(i + LANES));
        let c = vld1q_f32(ptr.add(i + 2 * LANES));
        lo0 = min_f32x4(lo0, a);
        hi0 = max_f32x4(hi0, a);
        lo1 = min_f32x4(lo1, b);
        hi1 = max_f32x4(hi1, b);
        lo2 = min_f32x4(lo2, c);
        hi2 = max_f32x4(hi2, c);
        i += CHUNK;
    }

    let mut lo_lanes = [0f32; LANES];
    let mut hi_lanes = [0f32; LANES];
    for (k, (l, h)) in [(lo0, hi0), (lo1, hi1), (lo2, hi2)].into_iter().enumerate() {
        vst1q_f32(lo_lanes.as_mut_ptr(), l);
        vst1q_f32(hi_lanes.as_mut_ptr(), h);
        fold_lanes(&lo_lanes, &hi_lanes, k * LANES, 3, min, max);
    }

    bulk
}

/// Lanewise minimum that returns `-0.0` when the operands are `-0.0` and
/// `0.0`, in either order.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn min_f32x4(a: float32x4_t, b: float32x4_t) -> float32x4_t {
    vreinterpretq_f32_u32(vorrq_u32(
        vreinterpretq_u32_f32(vminq_f32(a, b)),
        vreinterpretq_u32_f32(vminq_f32(b, a)),
    ))
}

/// Lanewise maximum that returns `0.0` when the operands are `-0.0` and
/// `0.0`, in either order.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn max_f32x4(a: float32x4_t, b: float32x4_t) -> float32x4_t {
    vreinterpretq_f32_u32(vandq_u32(
        vreinterpretq_u32_f32(vmaxq_f32(a, b)),
        vreinterpretq_u32_f32(vmaxq_f32(b, a)),
    ))
}
