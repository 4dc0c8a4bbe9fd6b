//! Scalar fallback and remainder pass.

/// Fold every sample of `data` into the running extrema `min` / `max`.
///
/// `data` must hold whole samples of `dimensions` values; `min` and `max`
/// must have `dimensions` entries. Existing values in `min` / `max` take part
/// in the comparison, so this can extend a partial result.
///
/// # Panics
/// Panics if `dimensions` is zero.
pub fn min_max(data: &[f32], dimensions: usize, min: &mut [f32], max: &mut [f32]) {
    debug_assert_eq!(data.len() % dimensions, 0);
    debug_assert_eq!(min.len(), dimensions);
    debug_assert_eq!(max.len(), dimensions);

    for sample in data.chunks_exact(dimensions) {
        for ((&v, lo), hi) in sample.iter().zip(min.iter_mut()).zip(max.iter_mut()) {
            fold(lo, hi, v, v);
        }
    }
}

/// Fold a candidate minimum `l` and maximum `h` into one axis.
///
/// Equal values only replace the running extremum to prefer `-0.0` for the
/// minimum and `0.0` for the maximum, so the result does not depend on the
/// order the candidates arrive in.
#[inline(always)]
pub(crate) fn fold(lo: &mut f32, hi: &mut f32, l: f32, h: f32) {
    if l < *lo || (l == *lo && l.is_sign_negative()) {
        *lo = l;
    }
    if h > *hi || (h == *hi && h.is_sign_positive()) {
        *hi = h;
    }
}
