//! Uniform-area scatter sampling inside a circular brush.
use std::f32::consts::TAU;

use mint::Vector2;
use rand::RngCore;

use crate::sampling::{rand01, BrushSampling};

/// Uniform i.i.d. points inside a disk.
///
/// The radial coordinate is drawn as `radius * sqrt(u)` so density is uniform per area,
/// not per radius.
#[derive(Debug, Clone)]
pub struct DiskScatterSampling {
    /// Number of candidate points to generate.
    pub count: usize,
}

impl DiskScatterSampling {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Attempt count for a fill density: `max(1, round(attempts * fill / 100))`.
    pub fn for_fill(attempts_per_tick: u32, fill_percentage: f32) -> Self {
        let scaled = (attempts_per_tick as f32 * (fill_percentage / 100.0)).round();
        let count = if scaled.is_finite() && scaled >= 1.0 {
            scaled as usize
        } else {
            1
        };
        Self::new(count)
    }
}

impl BrushSampling for DiskScatterSampling {
    fn generate(&self, radius: f32, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let radius = if radius.is_finite() {
            radius.max(0.0)
        } else {
            0.0
        };

        let mut out = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            let r = radius * rand01(rng).sqrt();
            let theta = rand01(rng) * TAU;
            let (sin, cos) = theta.sin_cos();
            out.push(Vector2 {
                x: r * cos,
                y: r * sin,
            });
        }
        out
    }
}
