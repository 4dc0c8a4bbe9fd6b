//! C-callable FFI layer for extrema.
//!
//! Exposes the min/max reduction through plain C types so that asset
//! tooling written in other languages can fill accessor bounds without
//! linking against Rust types.

use std::slice;

use crate::simd::{self, Tier};

// Error codes matching the C API design
const EX_OK: i32 = 0;
const EX_ERROR_INVALID_ARGUMENT: i32 = -2;

/// Convert an [`ExtremaError`](crate::ExtremaError) to an FFI error code.
fn error_to_code(e: crate::ExtremaError) -> i32 {
    match e {
        crate::ExtremaError::InvalidArgument { .. } => EX_ERROR_INVALID_ARGUMENT,
    }
}

/// Hardware tier reported by [`ex_simd_level`].
#[repr(C)]
pub enum ExSimdLevel {
    Scalar = 0,
    Portable = 1,
    Wide = 2,
}

impl From<Tier> for ExSimdLevel {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Scalar => ExSimdLevel::Scalar,
            Tier::Portable => ExSimdLevel::Portable,
            Tier::Wide => ExSimdLevel::Wide,
        }
    }
}

/// Compute the per-axis minimum and maximum of `len` interleaved floats.
///
/// Writes `dimensions` values to each of `min_out` and `max_out`. Returns
/// 0 on success or a negative error code; nothing is written on error.
///
/// # Safety
///
/// - `data` must point to at least `len` readable floats.
/// - `min_out` and `max_out` must each point to at least `dimensions`
///   writable floats.
#[no_mangle]
pub unsafe extern "C" fn ex_find_min_max(
    data: *const f32,
    len: usize,
    dimensions: usize,
    min_out: *mut f32,
    max_out: *mut f32,
) -> i32 {
    if data.is_null() || min_out.is_null() || max_out.is_null() {
        return EX_ERROR_INVALID_ARGUMENT;
    }

    let data = slice::from_raw_parts(data, len);
    match crate::find_min_max(data, dimensions) {
        Ok(extrema) => {
            let min_out = slice::from_raw_parts_mut(min_out, dimensions);
            let max_out = slice::from_raw_parts_mut(max_out, dimensions);
            min_out.copy_from_slice(extrema.min());
            max_out.copy_from_slice(extrema.max());
            EX_OK
        }
        Err(e) => error_to_code(e),
    }
}

/// Hardware tier the process-wide dispatcher uses (see [`ExSimdLevel`]).
#[no_mangle]
pub extern "C" fn ex_simd_level() -> i32 {
    ExSimdLevel::from(simd::dispatcher().level().tier()) as i32
}

/// Lane width of the process-wide dispatcher's widest tier.
#[no_mangle]
pub extern "C" fn ex_lane_width() -> i32 {
    simd::dispatcher().lane_width() as i32
}
