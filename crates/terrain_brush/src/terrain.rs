//! Terrain height and normal providers.
//!
//! The engine treats the terrain as read-only. A sampler returning `None` means no terrain
//! is available at that position and placement keeps the caller-supplied height.
use glam::{Vec2, Vec3};

use crate::error::{Error, Result};

/// Surface query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    pub height: f32,
    pub normal: Vec3,
}

/// Height/normal lookup at a world XZ position.
pub trait TerrainSampler {
    fn sample(&self, x: f32, z: f32) -> Option<TerrainSample>;
}

/// No terrain.
impl TerrainSampler for () {
    #[inline]
    fn sample(&self, _x: f32, _z: f32) -> Option<TerrainSample> {
        None
    }
}

impl<T: TerrainSampler> TerrainSampler for Option<T> {
    fn sample(&self, x: f32, z: f32) -> Option<TerrainSample> {
        self.as_ref().and_then(|t| t.sample(x, z))
    }
}

impl<T: TerrainSampler + ?Sized> TerrainSampler for &T {
    fn sample(&self, x: f32, z: f32) -> Option<TerrainSample> {
        (**self).sample(x, z)
    }
}

/// Infinite horizontal plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTerrain {
    pub height: f32,
}

impl FlatTerrain {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl TerrainSampler for FlatTerrain {
    fn sample(&self, _x: f32, _z: f32) -> Option<TerrainSample> {
        Some(TerrainSample {
            height: self.height,
            normal: Vec3::Y,
        })
    }
}

/// Regular height grid with bilinear sampling.
///
/// Heights are stored row-major (`z * width + x`) and span the world rectangle
/// `[origin, origin + size]` on XZ. Queries outside the rectangle clamp to the border.
#[derive(Debug, Clone)]
pub struct Heightfield {
    heights: Vec<f32>,
    width: u32,
    depth: u32,
    origin: Vec2,
    size: Vec2,
    height_scale: f32,
    base_height: f32,
}

impl Heightfield {
    /// Create a heightfield of `width * depth` samples covering `size` world units.
    pub fn from_raw(heights: Vec<f32>, width: u32, depth: u32, size: Vec2) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(Error::InvalidConfig(
                "heightfield needs at least 2x2 samples".into(),
            ));
        }
        if heights.len() != (width as usize) * (depth as usize) {
            return Err(Error::InvalidConfig(format!(
                "heightfield expects {} samples, got {}",
                (width as usize) * (depth as usize),
                heights.len()
            )));
        }
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(Error::InvalidConfig(
                "heightfield size must be > 0 in both components".into(),
            ));
        }

        Ok(Self {
            heights,
            width,
            depth,
            origin: Vec2::ZERO,
            size,
            height_scale: 1.0,
            base_height: 0.0,
        })
    }

    /// Build a heightfield by evaluating `f(u, v)` at every sample, with `u, v` in [0, 1].
    pub fn from_fn(
        width: u32,
        depth: u32,
        size: Vec2,
        mut f: impl FnMut(f32, f32) -> f32,
    ) -> Result<Self> {
        let w1 = width.saturating_sub(1).max(1) as f32;
        let d1 = depth.saturating_sub(1).max(1) as f32;
        let mut heights = Vec::with_capacity((width as usize) * (depth as usize));
        for z in 0..depth {
            for x in 0..width {
                heights.push(f(x as f32 / w1, z as f32 / d1));
            }
        }
        Self::from_raw(heights, width, depth, size)
    }

    /// Set the world position of the grid's first sample.
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Multiply stored samples by `height_scale` when sampling.
    pub fn with_height_scale(mut self, height_scale: f32) -> Self {
        self.height_scale = height_scale;
        self
    }

    /// World height added after scaling.
    pub fn with_base_height(mut self, base_height: f32) -> Self {
        self.base_height = base_height;
        self
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Bilinear sample of the raw grid at normalized coordinates.
    pub fn sample_uv(&self, u: f32, v: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let fx = u * (self.width - 1) as f32;
        let fz = v * (self.depth - 1) as f32;

        let x0 = (fx as u32).min(self.width - 2);
        let z0 = (fz as u32).min(self.depth - 2);
        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;

        let h00 = self.get(x0, z0);
        let h10 = self.get(x0 + 1, z0);
        let h01 = self.get(x0, z0 + 1);
        let h11 = self.get(x0 + 1, z0 + 1);

        let h0 = h00 * (1.0 - tx) + h10 * tx;
        let h1 = h01 * (1.0 - tx) + h11 * tx;
        h0 * (1.0 - tz) + h1 * tz
    }

    /// World-space height at `(x, z)`.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let (u, v) = self.to_uv(x, z);
        self.base_height + self.sample_uv(u, v) * self.height_scale
    }

    /// Surface normal from central differences over one grid cell.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let cell_x = self.size.x / (self.width - 1) as f32;
        let cell_z = self.size.y / (self.depth - 1) as f32;

        let dx = (self.height_at(x + cell_x, z) - self.height_at(x - cell_x, z)) / (2.0 * cell_x);
        let dz = (self.height_at(x, z + cell_z) - self.height_at(x, z - cell_z)) / (2.0 * cell_z);

        Vec3::new(-dx, 1.0, -dz).normalize()
    }

    fn to_uv(&self, x: f32, z: f32) -> (f32, f32) {
        (
            (x - self.origin.x) / self.size.x,
            (z - self.origin.y) / self.size.y,
        )
    }

    fn get(&self, x: u32, z: u32) -> f32 {
        self.heights[(z * self.width + x) as usize]
    }
}

impl TerrainSampler for Heightfield {
    fn sample(&self, x: f32, z: f32) -> Option<TerrainSample> {
        Some(TerrainSample {
            height: self.height_at(x, z),
            normal: self.normal_at(x, z),
        })
    }
}
