//! SIMD-accelerated per-axis min/max reduction.
//!
//! Computes the minimum and maximum of every axis of a flat buffer of
//! interleaved `f32` samples (for example `xyzxyzxyz...` vertex positions).
//! The buffer is reduced in three tiers:
//!
//! - **Wide**: 256-bit registers, 8 lanes of `f32`.
//! - **Portable**: 128-bit registers, 4 lanes of `f32`.
//! - **Scalar**: per-sample compare loop. Also handles the trailing
//!   elements left over after every vector tier's bulk loop.
//!
//! Both vector tiers carry an unrolled variant for 3-component samples,
//! the common case for point and position data.
//!
//! # Architecture support
//!
//! | ISA            | Tier     | Lanes | Detection          |
//! |----------------|----------|-------|--------------------|
//! | x86_64 SSE2    | Portable | 4     | Baseline           |
//! | x86_64 AVX     | Wide     | 8     | Runtime            |
//! | aarch64 NEON   | Portable | 4     | Baseline           |
//! | other          | Scalar   | 1     | none               |
//!
//! # Runtime dispatch
//!
//! ```rust
//! use extrema::simd::Dispatcher;
//! let d = Dispatcher::new();
//! let positions: [f32; 9] = [1.0, 2.0, 3.0, 4.0, 0.0, 9.0, -1.0, 5.0, 2.0];
//! let bounds = d.find_min_max(&positions, 3).unwrap();
//! assert_eq!(bounds.min(), &[-1.0, 0.0, 2.0]);
//! assert_eq!(bounds.max(), &[4.0, 5.0, 9.0]);
//! ```
//!
//! The dispatcher probes CPU features once; [`dispatcher`] hands out a
//! process-wide instance so callers never re-probe.
//!
//! # Numeric contract
//!
//! For finite input every tier returns bit-for-bit what the scalar reducer
//! returns, independent of sample order. `-0.0` and `0.0` compare equal, so
//! every reducer breaks that tie the same way: `-0.0` wins for the minimum
//! and `0.0` wins for the maximum.
//!
//! NaN handling is unspecified: vector min/max instructions and scalar
//! comparisons disagree on which operand wins, so results may differ
//! between tiers when the buffer holds NaN.

use std::fmt;
use std::sync::OnceLock;

use crate::{Extrema, ExtremaError, ExtremaResult};

pub mod scalar;

#[cfg(target_arch = "x86_64")]
mod avx;
#[cfg(target_arch = "x86_64")]
mod sse2;

#[cfg(target_arch = "aarch64")]
mod neon;


/// Lane count of the wide tier (256-bit registers of `f32`).
pub const WIDE_LANES: usize = 8;

/// Lane count of the portable tier (128-bit registers of `f32`).
pub const PORTABLE_LANES: usize = 4;

/// Minimum buffer length for the 3-component kernels.
const MIN_LEN_3D: usize = 3 * WIDE_LANES;

// ---------------------------------------------------------------------------
// Capability levels
// ---------------------------------------------------------------------------

/// SIMD capability level detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdLevel {
    /// No SIMD, scalar fallback.
    Scalar,
    /// x86_64 SSE2 (baseline for x86_64, always available).
    #[cfg(target_arch = "x86_64")]
    Sse2,
    /// x86_64 AVX (256-bit float registers).
    #[cfg(target_arch = "x86_64")]
    Avx,
    /// aarch64 NEON (baseline for aarch64, always available).
    #[cfg(target_arch = "aarch64")]
    Neon,
}

/// Hardware tier a [`SimdLevel`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// No vector unit; every element goes through the scalar loop.
    Scalar,
    /// 128-bit registers, 4 lanes.
    Portable,
    /// 256-bit registers, 8 lanes.
    Wide,
}

impl SimdLevel {
    /// The tier this level provides.
    pub fn tier(self) -> Tier {
        match self {
            SimdLevel::Scalar => Tier::Scalar,
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Sse2 => Tier::Portable,
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Avx => Tier::Wide,
            #[cfg(target_arch = "aarch64")]
            SimdLevel::Neon => Tier::Portable,
        }
    }

    /// Number of `f32` values one vector operation processes.
    pub fn lane_width(self) -> usize {
        match self.tier() {
            Tier::Scalar => 1,
            Tier::Portable => PORTABLE_LANES,
            Tier::Wide => WIDE_LANES,
        }
    }

    /// Whether the current CPU can execute this level.
    pub fn is_supported(self) -> bool {
        self <= detect_level()
    }

    /// Every level the current CPU supports, lowest first.
    pub fn available() -> Vec<SimdLevel> {
        #[allow(unused_mut)]
        let mut levels = vec![SimdLevel::Scalar];
        #[cfg(target_arch = "x86_64")]
        {
            levels.push(SimdLevel::Sse2);
            if SimdLevel::Avx.is_supported() {
                levels.push(SimdLevel::Avx);
            }
        }
        #[cfg(target_arch = "aarch64")]
        levels.push(SimdLevel::Neon);
        levels
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdLevel::Scalar => write!(f, "Scalar"),
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Sse2 => write!(f, "SSE2"),
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Avx => write!(f, "AVX"),
            #[cfg(target_arch = "aarch64")]
            SimdLevel::Neon => write!(f, "NEON"),
        }
    }
}

/// Detect the highest SIMD level supported by the current CPU.
fn detect_level() -> SimdLevel {
    static LEVEL: OnceLock<SimdLevel> = OnceLock::new();
    *LEVEL.get_or_init(|| {
        let level = probe_level();
        log::debug!("detected SIMD level {level} ({} lanes)", level.lane_width());
        level
    })
}

fn probe_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx") {
            return SimdLevel::Avx;
        }
        // SSE2 is always available on x86_64
        return SimdLevel::Sse2;
    }

    #[cfg(target_arch = "aarch64")]
    {
        // NEON is always available on aarch64
        return SimdLevel::Neon;
    }

    #[allow(unreachable_code)]
    SimdLevel::Scalar
}

// ---------------------------------------------------------------------------
// Runtime dispatcher
// ---------------------------------------------------------------------------

/// Reduction kernel chosen for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Per-sample loop over the whole buffer.
    Scalar,
    /// Portable tier, any dimension count.
    Portable,
    /// Portable tier, unrolled for 3-component samples.
    Portable3,
    /// Wide tier, any dimension count.
    Wide,
    /// Wide tier, unrolled for 3-component samples.
    Wide3,
}

/// Runtime SIMD dispatcher.
///
/// Holds the capability level detected at construction time, so the
/// per-call work is a length check and a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    level: SimdLevel,
    specialize_3d: bool,
}

/// Process-wide dispatcher for the current CPU.
pub fn dispatcher() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::new)
}

impl Dispatcher {
    /// Detect the best available SIMD level for the current CPU.
    pub fn new() -> Self {
        Dispatcher {
            level: detect_level(),
            specialize_3d: true,
        }
    }

    /// Force a specific level. Returns `None` when the CPU lacks it.
    pub fn with_level(level: SimdLevel) -> Option<Self> {
        level.is_supported().then_some(Dispatcher {
            level,
            specialize_3d: true,
        })
    }

    /// Enable or disable the unrolled 3-component kernels.
    ///
    /// When disabled, 3-component buffers go through the generic kernels.
    pub fn with_3d_specialization(mut self, enabled: bool) -> Self {
        self.specialize_3d = enabled;
        self
    }

    /// Return the SIMD capability level in use.
    pub fn level(&self) -> SimdLevel {
        self.level
    }

    /// Lane width of the widest tier this dispatcher may select.
    pub fn lane_width(&self) -> usize {
        self.level.lane_width()
    }

    /// Pick the kernel for a buffer of `len` values with `dimensions` axes.
    pub fn select(&self, len: usize, dimensions: usize) -> Kernel {
        let specialized = self.specialize_3d && dimensions == 3 && len >= MIN_LEN_3D;
        let fits = |lanes: usize| len >= dimensions.saturating_mul(lanes);

        match self.level.tier() {
            Tier::Wide if fits(WIDE_LANES) => {
                if specialized {
                    Kernel::Wide3
                } else {
                    Kernel::Wide
                }
            }
            Tier::Wide | Tier::Portable if fits(PORTABLE_LANES) => {
                if specialized {
                    Kernel::Portable3
                } else {
                    Kernel::Portable
                }
            }
            _ => Kernel::Scalar,
        }
    }

    /// Compute the per-axis minimum and maximum of `data`.
    ///
    /// `data` holds interleaved samples of `dimensions` values each. Returns
    /// [`ExtremaError::InvalidArgument`] when `dimensions` is zero or the
    /// length is not a whole number of samples. An empty buffer yields the
    /// [`Extrema::unobserved`] sentinel.
    pub fn find_min_max(&self, data: &[f32], dimensions: usize) -> ExtremaResult<Extrema> {
        if dimensions == 0 || data.len() % dimensions != 0 {
            return Err(ExtremaError::InvalidArgument {
                len: data.len(),
                dimensions,
            });
        }

        let mut extrema = Extrema::unobserved(dimensions);
        if data.is_empty() {
            return Ok(extrema);
        }

        let kernel = self.select(data.len(), dimensions);
        log::trace!(
            "min/max over {} values ({} axes) with {:?} on {}",
            data.len(),
            dimensions,
            kernel,
            self.level
        );

        let (min, max) = extrema.bounds_mut();
        let bulk = run_bulk(kernel, data, dimensions, min, max);
        scalar::min_max(&data[bulk..], dimensions, min, max);
        Ok(extrema)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the vector part of `kernel`, returning how many leading elements it
/// consumed. The count is always a whole number of samples.
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    allow(unused_variables)
)]
fn run_bulk(
    kernel: Kernel,
    data: &[f32],
    dimensions: usize,
    min: &mut [f32],
    max: &mut [f32],
) -> usize {
    match kernel {
        Kernel::Scalar => 0,
        // SAFETY: `select` only returns wide kernels for a dispatcher
        // whose level passed `is_supported`, i.e. the CPU has AVX.
        #[cfg(target_arch = "x86_64")]
        Kernel::Wide => unsafe { avx::min_max(data, dimensions, min, max) },
        #[cfg(target_arch = "x86_64")]
        Kernel::Wide3 => unsafe { avx::min_max_3d(data, min, max) },
        // SAFETY: SSE2 is always available on x86_64
        #[cfg(target_arch = "x86_64")]
        Kernel::Portable => unsafe { sse2::min_max(data, dimensions, min, max) },
        #[cfg(target_arch = "x86_64")]
        Kernel::Portable3 => unsafe { sse2::min_max_3d(data, min, max) },
        // SAFETY: NEON is always available on aarch64
        #[cfg(target_arch = "aarch64")]
        Kernel::Portable => unsafe { neon::min_max(data, dimensions, min, max) },
        #[cfg(target_arch = "aarch64")]
        Kernel::Portable3 => unsafe { neon::min_max_3d(data, min, max) },
        // No wide tier on aarch64; `select` never returns these
        #[cfg(target_arch = "aarch64")]
        Kernel::Wide | Kernel::Wide3 => 0,
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        Kernel::Portable | Kernel::Portable3 | Kernel::Wide | Kernel::Wide3 => 0,
    }
}

/// Fold one spilled accumulator pair into the running per-axis extrema.
///
/// Lane `j` of the register holds axis `(first + j) % dimensions`, where
/// `first` is the register's element offset within its chunk. Every chunk
/// is a whole number of samples, so this mapping is the same for every
/// chunk the register was loaded from.
#[inline]
pub(crate) fn fold_lanes(
    lo: &[f32],
    hi: &[f32],
    first: usize,
    dimensions: usize,
    min: &mut [f32],
    max: &mut [f32],
) {
    let mut axis = first % dimensions;
    for (&l, &h) in lo.iter().zip(hi) {
        scalar::fold(&mut min[axis], &mut max[axis], l, h);
        axis += 1;
        if axis == dimensions {
            axis = 0;
        }
    }
}
