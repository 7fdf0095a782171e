//! Candidate generation for brush strokes.
//!
//! Samplers propose offsets on the XZ plane relative to the brush center. Offsets are
//! returned as 2D vectors where `x` maps to world X and `y` maps to world Z.
use mint::Vector2;
use rand::RngCore;

pub mod disk;
pub mod grid;

pub use disk::DiskScatterSampling;
pub use grid::GridSampling;

/// Trait for brush candidate sampling.
pub trait BrushSampling: Send + Sync {
    fn generate(&self, radius: f32, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform draw in `[lo, hi]`. Returns `lo` when the range is empty or inverted.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    lo + rand01(rng) * (hi - lo)
}

/// Uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}

/// Bernoulli trial with a success chance given in percent.
///
/// 0% never succeeds and 100% always succeeds, regardless of the draw.
#[inline]
pub(crate) fn roll_percent(rng: &mut dyn RngCore, percent: f32) -> bool {
    if percent <= 0.0 {
        return false;
    }
    if percent >= 100.0 {
        return true;
    }
    rand01(rng) * 100.0 < percent
}

/// Compute the next smaller representable float value.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct FixedRng {
        pub(crate) value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_spans_unit_interval() {
        assert_eq!(rand01(&mut FixedRng { value: 0 }), 0.0);
        let top = rand01(&mut FixedRng { value: u32::MAX });
        assert!((0.0..=1.0).contains(&top));
        let mid = rand01(&mut FixedRng {
            value: u32::MAX / 2,
        });
        assert!((mid - 0.5).abs() < 0.001);
    }

    #[test]
    fn rand_range_handles_inverted_bounds() {
        let mut rng = FixedRng { value: u32::MAX };
        assert_eq!(rand_range(&mut rng, 2.0, 1.0), 2.0);
        assert_eq!(rand_range(&mut rng, 1.0, 1.0), 1.0);
    }

    #[test]
    fn rand_index_stays_in_bounds_at_top_of_range() {
        let mut rng = FixedRng { value: u32::MAX };
        assert_eq!(rand_index(&mut rng, 3), 2);
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand_index(&mut rng, 3), 0);
    }

    #[test]
    fn roll_percent_extremes_ignore_the_draw() {
        assert!(!roll_percent(&mut FixedRng { value: 0 }, 0.0));
        assert!(roll_percent(&mut FixedRng { value: u32::MAX }, 100.0));
        assert!(roll_percent(&mut FixedRng { value: 0 }, 50.0));
        assert!(!roll_percent(&mut FixedRng { value: u32::MAX }, 50.0));
    }

    #[test]
    fn next_down_handles_edge_cases() {
        assert!(next_down(360.0) < 360.0);
        assert_eq!(next_down(0.0), -f32::MIN_POSITIVE);
        assert_eq!(next_down(f32::INFINITY), f32::MAX);
        assert!(next_down(f32::NAN).is_nan());
    }
}
