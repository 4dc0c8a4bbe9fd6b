//! Per-axis min/max reduction over interleaved `f32` samples.
//!
//! ```rust
//! let positions: [f32; 9] = [1.0, 2.0, 3.0, 4.0, 0.0, 9.0, -1.0, 5.0, 2.0];
//! let bounds = extrema::find_min_max(&positions, 3)?;
//! assert_eq!(bounds.min(), &[-1.0, 0.0, 2.0]);
//! assert_eq!(bounds.max(), &[4.0, 5.0, 9.0]);
//! # Ok::<(), extrema::ExtremaError>(())
//! ```
//!
//! See [`simd`] for the hardware tiers and how one is picked.

pub mod bounds;
pub mod ffi;
pub mod simd;

#[cfg(test)]
mod validation;

pub use crate::bounds::Extrema;

/// Error types for extrema operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtremaError {
    /// `dimensions` is zero or `len` is not a whole number of samples.
    #[error("invalid argument: {len} values do not form whole samples of {dimensions} components")]
    InvalidArgument { len: usize, dimensions: usize },
}

pub type ExtremaResult<T> = Result<T, ExtremaError>;

/// Compute the per-axis minimum and maximum of `data` using the best SIMD
/// tier of the current CPU.
///
/// `data` holds interleaved samples of `dimensions` values each.
pub fn find_min_max(data: &[f32], dimensions: usize) -> ExtremaResult<Extrema> {
    simd::dispatcher().find_min_max(data, dimensions)
}
