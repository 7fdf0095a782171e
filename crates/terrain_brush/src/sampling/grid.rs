//! Full-coverage lattice sampling inside a circular brush.
use mint::Vector2;
use rand::RngCore;

use crate::sampling::BrushSampling;

/// Smallest lattice step; keeps the candidate count bounded when spacing is near zero.
pub const MIN_GRID_STEP: f32 = 0.25;

/// Square lattice clipped to the brush disk.
///
/// Offsets run from `-radius` to `radius` in both axes at `step` increments. A lattice
/// point is kept when `x² + z² <= radius²`.
#[derive(Debug, Clone)]
pub struct GridSampling {
    /// Lattice step in world units, floored to [`MIN_GRID_STEP`].
    pub step: f32,
}

impl GridSampling {
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() {
            step.max(MIN_GRID_STEP)
        } else {
            MIN_GRID_STEP
        };
        Self { step }
    }

    /// Number of lattice coordinates along one axis for `radius`.
    pub fn axis_count(&self, radius: f32) -> usize {
        (2.0 * radius.max(0.0) / self.step).floor() as usize + 1
    }
}

impl BrushSampling for GridSampling {
    fn generate(&self, radius: f32, _rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        if !radius.is_finite() {
            return Vec::new();
        }
        let radius = radius.max(0.0);
        let r2 = radius * radius;
        let n = self.axis_count(radius);

        let mut points = Vec::with_capacity(n * n);
        for i in 0..n {
            let x = -radius + i as f32 * self.step;
            for j in 0..n {
                let z = -radius + j as f32 * self.step;
                if x * x + z * z <= r2 {
                    points.push(Vector2 { x, y: z });
                }
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn new_floors_step() {
        assert_eq!(GridSampling::new(0.0).step, MIN_GRID_STEP);
        assert_eq!(GridSampling::new(-3.0).step, MIN_GRID_STEP);
        assert_eq!(GridSampling::new(f32::NAN).step, MIN_GRID_STEP);
        assert_eq!(GridSampling::new(1.5).step, 1.5);
    }

    #[test]
    fn zero_radius_yields_only_the_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let pts = GridSampling::new(1.0).generate(0.0, &mut rng);
        assert_eq!(pts, vec![Vector2 { x: 0.0, y: 0.0 }]);
        let pts = GridSampling::new(1.0).generate(-4.0, &mut rng);
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn lattice_is_clipped_to_disk() {
        let mut rng = StdRng::seed_from_u64(1);
        let pts = GridSampling::new(1.0).generate(2.0, &mut rng);
        // Integer points with x² + z² <= 4 in [-2, 2]².
        assert_eq!(pts.len(), 13);
        for p in &pts {
            assert!(p.x * p.x + p.y * p.y <= 4.0);
        }
    }

    #[test]
    fn every_point_is_attempted_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let pts = GridSampling::new(0.5).generate(3.0, &mut rng);
        let unique: HashSet<(u32, u32)> =
            pts.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect();
        assert_eq!(unique.len(), pts.len());
    }

    #[test]
    fn non_finite_radius_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(GridSampling::new(1.0)
            .generate(f32::INFINITY, &mut rng)
            .is_empty());
    }
}
