/// Validation tests for the min/max reduction.
///
/// These tests verify:
/// 1. **Known vectors** - hand-checked inputs and their extrema
/// 2. **Ordering** - `min[d] <= max[d]` for every axis of every non-empty result
/// 3. **Tier equivalence** - every SIMD level agrees with the scalar reducer
/// 4. **3D equivalence** - the unrolled 3-component kernels agree with the
///    generic kernels
/// 5. **Exactness** - results equal a straightforward per-axis fold
#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::simd::{Dispatcher, SimdLevel};
    use crate::{find_min_max, ExtremaError};

    /// Per-axis extrema computed the obvious way, independent of the crate.
    fn naive(data: &[f32], dimensions: usize) -> (Vec<f32>, Vec<f32>) {
        let mut min = vec![f32::MAX; dimensions];
        let mut max = vec![f32::MIN; dimensions];
        for (i, &v) in data.iter().enumerate() {
            let d = i % dimensions;
            min[d] = min[d].min(v);
            max[d] = max[d].max(v);
        }
        (min, max)
    }

    /// Interleaved finite samples with 1..=8 components.
    fn buffer() -> impl Strategy<Value = (Vec<f32>, usize)> {
        (1usize..=8, 0usize..=200).prop_flat_map(|(dimensions, samples)| {
            (
                prop::collection::vec(-1.0e6f32..1.0e6f32, samples * dimensions),
                Just(dimensions),
            )
        })
    }

    /// 3-component buffers long enough to reach the unrolled kernels.
    fn positions() -> impl Strategy<Value = Vec<f32>> {
        (8usize..=400).prop_flat_map(|samples| {
            prop::collection::vec(-1.0e4f32..1.0e4f32, samples * 3)
        })
    }

    // ---------------------------------------------------------------
    // 1. Known vectors
    // ---------------------------------------------------------------

    #[test]
    fn test_known_single_sample() {
        let e = find_min_max(&[5.0, -2.0, 9.0], 3).unwrap();
        assert_eq!(e.min(), &[5.0, -2.0, 9.0]);
        assert_eq!(e.max(), &[5.0, -2.0, 9.0]);
    }

    #[test]
    fn test_known_three_samples() {
        let e = find_min_max(&[1.0, 2.0, 3.0, 4.0, 0.0, 9.0, -1.0, 5.0, 2.0], 3).unwrap();
        assert_eq!(e.min(), &[-1.0, 0.0, 2.0]);
        assert_eq!(e.max(), &[4.0, 5.0, 9.0]);
    }

    #[test]
    fn test_known_invalid_length() {
        let data = [0.0f32; 10];
        assert!(matches!(
            find_min_max(&data, 3),
            Err(ExtremaError::InvalidArgument {
                len: 10,
                dimensions: 3
            })
        ));
    }

    #[test]
    fn test_known_29_samples() {
        // Ascending ramp: the maximum of every axis lives in the last sample,
        // past the final full chunk of every vector tier.
        let data: Vec<f32> = (0..29 * 3).map(|i| i as f32).collect();
        for level in SimdLevel::available() {
            let e = Dispatcher::with_level(level)
                .unwrap()
                .find_min_max(&data, 3)
                .unwrap();
            assert_eq!(e.min(), &[0.0, 1.0, 2.0], "level {level}");
            assert_eq!(e.max(), &[84.0, 85.0, 86.0], "level {level}");
        }
    }

    #[test]
    fn test_known_infinities() {
        // 10 samples of 3 axes: long enough to fill a full chunk on every
        // vector tier, so infinities meet the kernels' own +/-inf seeds.
        let mut data = Vec::with_capacity(30);
        for s in 0..10 {
            let x = if s == 7 { f32::NEG_INFINITY } else { s as f32 };
            let y = if s == 2 { f32::INFINITY } else { -(s as f32) };
            let z = if s % 2 == 0 { f32::NEG_INFINITY } else { f32::INFINITY };
            data.extend_from_slice(&[x, y, z]);
        }
        for level in SimdLevel::available() {
            for specialize in [true, false] {
                let e = Dispatcher::with_level(level)
                    .unwrap()
                    .with_3d_specialization(specialize)
                    .find_min_max(&data, 3)
                    .unwrap();
                assert_eq!(
                    e.min(),
                    &[f32::NEG_INFINITY, -9.0, f32::NEG_INFINITY],
                    "level {level} specialize {specialize}"
                );
                assert_eq!(
                    e.max(),
                    &[9.0, f32::INFINITY, f32::INFINITY],
                    "level {level} specialize {specialize}"
                );
            }
        }

        // Axes that hold nothing but one infinity.
        let data = [f32::INFINITY, f32::NEG_INFINITY].repeat(12);
        for level in SimdLevel::available() {
            let e = Dispatcher::with_level(level)
                .unwrap()
                .find_min_max(&data, 2)
                .unwrap();
            assert_eq!(e.min(), &[f32::INFINITY, f32::NEG_INFINITY], "level {level}");
            assert_eq!(e.max(), &[f32::INFINITY, f32::NEG_INFINITY], "level {level}");
        }
    }

    // ---------------------------------------------------------------
    // 2-5. Properties
    // ---------------------------------------------------------------

    proptest! {
        #[test]
        fn prop_min_not_above_max((data, dimensions) in buffer()) {
            let e = find_min_max(&data, dimensions).unwrap();
            prop_assert_eq!(e.dimensions(), dimensions);
            if !data.is_empty() {
                prop_assert!(e.has_samples());
                for d in 0..dimensions {
                    prop_assert!(e.min()[d] <= e.max()[d]);
                }
            }
        }

        #[test]
        fn prop_matches_naive_fold((data, dimensions) in buffer()) {
            let e = find_min_max(&data, dimensions).unwrap();
            let (min, max) = naive(&data, dimensions);
            prop_assert_eq!(e.min(), &min[..]);
            prop_assert_eq!(e.max(), &max[..]);
        }

        #[test]
        fn prop_every_level_agrees((data, dimensions) in buffer()) {
            let reference = Dispatcher::with_level(SimdLevel::Scalar)
                .unwrap()
                .find_min_max(&data, dimensions)
                .unwrap();
            for level in SimdLevel::available() {
                let got = Dispatcher::with_level(level)
                    .unwrap()
                    .find_min_max(&data, dimensions)
                    .unwrap();
                prop_assert_eq!(&got, &reference, "level {}", level);
            }
        }

        #[test]
        fn prop_zeros_bitwise_identical_across_levels(
            (data, dimensions) in (1usize..=6).prop_flat_map(|d| {
                let zero = prop::sample::select(vec![0.0f32, -0.0, 1.0, -1.0]);
                (prop::collection::vec(zero, 0..=40).prop_map(move |mut v| {
                    v.truncate(v.len() - v.len() % d);
                    v
                }), Just(d))
            })
        ) {
            let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            let reference = Dispatcher::with_level(SimdLevel::Scalar)
                .unwrap()
                .find_min_max(&data, dimensions)
                .unwrap();
            for level in SimdLevel::available() {
                for specialize in [true, false] {
                    let got = Dispatcher::with_level(level)
                        .unwrap()
                        .with_3d_specialization(specialize)
                        .find_min_max(&data, dimensions)
                        .unwrap();
                    prop_assert_eq!(bits(got.min()), bits(reference.min()), "level {}", level);
                    prop_assert_eq!(bits(got.max()), bits(reference.max()), "level {}", level);
                }
            }
        }

        #[test]
        fn prop_3d_specialized_matches_generic(data in positions()) {
            for level in SimdLevel::available() {
                let specialized = Dispatcher::with_level(level).unwrap();
                let generic = specialized.with_3d_specialization(false);
                prop_assert_eq!(
                    specialized.find_min_max(&data, 3).unwrap(),
                    generic.find_min_max(&data, 3).unwrap()
                );
            }
        }

        #[test]
        fn prop_idempotent((data, dimensions) in buffer()) {
            let first = find_min_max(&data, dimensions).unwrap();
            let second = find_min_max(&data, dimensions).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_partial_sample_rejected(
            dimensions in 2usize..=8,
            samples in 0usize..=50,
            extra in 1usize..8,
        ) {
            let extra = extra % dimensions;
            prop_assume!(extra != 0);
            let data = vec![0.0f32; samples * dimensions + extra];
            prop_assert!(find_min_max(&data, dimensions).is_err());
        }
    }
}
