//! Per-axis bounding extrema produced by a min/max reduction.

/// Per-axis minimum and maximum of a sample buffer.
///
/// Both vectors have one entry per dimension. A result computed from an
/// empty buffer holds `f32::MAX` in every `min` slot and `f32::MIN` in every
/// `max` slot; use [`Extrema::has_samples`] to tell that sentinel apart from
/// a real bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Extrema {
    min: Vec<f32>,
    max: Vec<f32>,
}

impl Extrema {
    /// Create the "no samples observed" result for `dimensions` axes.
    pub fn unobserved(dimensions: usize) -> Self {
        Self {
            min: vec![f32::MAX; dimensions],
            max: vec![f32::MIN; dimensions],
        }
    }

    /// Number of axes.
    pub fn dimensions(&self) -> usize {
        self.min.len()
    }

    /// Per-axis minimum.
    pub fn min(&self) -> &[f32] {
        &self.min
    }

    /// Per-axis maximum.
    pub fn max(&self) -> &[f32] {
        &self.max
    }

    /// Whether any sample contributed to this result.
    ///
    /// Returns `false` for the empty-buffer sentinel. Buffers made up
    /// entirely of NaN also leave the sentinel untouched.
    pub fn has_samples(&self) -> bool {
        self.min.iter().zip(&self.max).all(|(lo, hi)| lo <= hi)
    }

    /// Consume the result, returning `(min, max)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.min, self.max)
    }

    /// Mutable views of the running extrema, used by the reducers.
    pub(crate) fn bounds_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.min, &mut self.max)
    }
}
