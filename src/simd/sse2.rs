//! Portable tier on x86_64: SSE2 kernels, 4 lanes of `f32` per register.

use std::arch::x86_64::*;

use super::{fold_lanes, PORTABLE_LANES as LANES};

/// Reduce the bulk of `data` in chunks of `dimensions * 4` elements.
///
/// Returns the number of leading elements consumed.
///
/// # Safety
/// Requires SSE2 (always available on x86_64). `dimensions` must be non-zero
/// and `min` / `max` must have `dimensions` entries.
#[target_feature(enable = "sse2")]
pub unsafe fn min_max(data: &[f32], dimensions: usize, min: &mut [f32], max: &mut [f32]) -> usize {
    let chunk = dimensions * LANES;
    let bulk = data.len() - data.len() % chunk;
    let ptr = data.as_ptr();

    let mut lo = vec![_mm_set1_ps(f32::INFINITY); dimensions];
    let mut hi = vec![_mm_set1_ps(f32::NEG_INFINITY); dimensions];

    let mut i = 0;
    while i < bulk {
        let base = ptr.add(i);
        for (k, (l, h)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
            let v = _mm_loadu_ps(base.add(k * LANES));
            *l = min_ps(*l, v);
            *h = max_ps(*h, v);
        }
        i += chunk;
    }

    let mut lo_lanes = [0f32; LANES];
    let mut hi_lanes = [0f32; LANES];
    for (k, (l, h)) in lo.iter().zip(hi.iter()).enumerate() {
        _mm_storeu_ps(lo_lanes.as_mut_ptr(), *l);
        _mm_storeu_ps(hi_lanes.as_mut_ptr(), *h);
        fold_lanes(&lo_lanes, &hi_lanes, k * LANES, dimensions, min, max);
    }

    bulk
}

/// 3-component variant of [`min_max`].
///
/// # Safety
/// Requires SSE2. `min` / `max` must have 3 entries.
#[target_feature(enable = "sse2")]
pub unsafe fn min_max_3d(data: &[f32], min: &mut [f32], max: &mut [f32]) -> usize {
    const CHUNK: usize = 3 * LANES;
    let bulk = data.len() - data.len() % CHUNK;
    let ptr = data.as_ptr();

    let mut lo0 = _mm_set1_ps(f32::INFINITY);
    let mut lo1 = lo0;
    let mut lo2 = lo0;
    let mut hi0 = _mm_set1_ps(f32::NEG_INFINITY);
    let mut hi1 = hi0;
    let mut hi2 = hi0;

    let mut i = 0;
    while i < bulk {
        let a = _mm_loadu_ps(ptr.add(i));
        let b = _mm_loadu_ps(ptr.add(i + LANES));
        let c = _mm_loadu_ps(ptr.add(i + 2 * LANES));
        lo0 = min_ps(lo0, a);
        hi0 = max_ps(hi0, a);
        lo1 = min_ps(lo1, b);
        hi1 = max_ps(hi1, b);
        lo2 = min_ps(lo2, c);
        hi2 = max_ps(hi2, c);
        i += CHUNK;
    }

    let mut lo_lanes = [0f32; LANES];
    let mut hi_lanes = [0f32; LANES];
    for (k, (l, h)) in [(lo0, hi0), (lo1, hi1), (lo2, hi2)].into_iter().enumerate() {
        _mm_storeu_ps(lo_lanes.as_mut_ptr(), l);
        _mm_storeu_ps(hi_lanes.as_mut_ptr(), h);
        fold_lanes(&lo_lanes, &hi_lanes, k * LANES, 3, min, max);
    }

    bulk
}

/// Lanewise minimum that returns `-0.0` when the operands are `-0.0` and
/// `0.0`, in either order.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn min_ps(a: __m128, b: __m128) -> __m128 {
    _mm_or_ps(_mm_min_ps(a, b), _mm_min_ps(b, a))
}

/// Lanewise maximum that returns `0.0` when the operands are `-0.0` and
/// `0.0`, in either order.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn max_ps(a: __m128, b: __m128) -> __m128 {
    _mm_and_ps(_mm_max_ps(a, b), _mm_max_ps(b, a))
}
