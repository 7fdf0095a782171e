//! Proximity queries over placed instances.
//!
//! The default [`SpatialHash`] buckets instances into square XZ cells and answers sphere
//! queries by scanning the cells overlapped by the query's footprint, or every occupied
//! cell when the footprint covers more cells than are occupied.
use std::collections::HashMap;

use glam::Vec3;

use crate::brush::InstanceId;

/// Spatial index over top-level placed instances.
pub trait SpatialIndex {
    fn insert(&mut self, id: InstanceId, position: Vec3);

    /// Removes `id`, previously inserted at `position`.
    fn remove(&mut self, id: InstanceId, position: Vec3);

    /// Appends every instance whose position is within `radius` (inclusive) of `center`.
    fn query_nearby(&self, center: Vec3, radius: f32, out: &mut Vec<InstanceId>);

    fn clear(&mut self);
}

pub const DEFAULT_CELL_SIZE: f32 = 2.0;

/// Uniform grid hash on the XZ plane.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<(InstanceId, Vec3)>>,
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialHash {
    /// Create an empty hash. Non-positive or non-finite cell sizes fall back to the default.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    fn cell_of(&self, x: f32, z: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (z / self.cell_size).floor() as i32,
        )
    }
}

impl SpatialIndex for SpatialHash {
    fn insert(&mut self, id: InstanceId, position: Vec3) {
        let cell = self.cell_of(position.x, position.z);
        self.cells.entry(cell).or_default().push((id, position));
    }

    fn remove(&mut self, id: InstanceId, position: Vec3) {
        let cell = self.cell_of(position.x, position.z);
        if let Some(bucket) = self.cells.get_mut(&cell) {
            bucket.retain(|(other, _)| *other != id);
            if bucket.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    fn query_nearby(&self, center: Vec3, radius: f32, out: &mut Vec<InstanceId>) {
        if !radius.is_finite() || radius < 0.0 {
            return;
        }
        let r2 = radius * radius;
        let within = |bucket: &Vec<(InstanceId, Vec3)>, out: &mut Vec<InstanceId>| {
            out.extend(
                bucket
                    .iter()
                    .filter(|(_, p)| p.distance_squared(center) <= r2)
                    .map(|(id, _)| *id),
            );
        };

        let (x0, z0) = self.cell_of(center.x - radius, center.z - radius);
        let (x1, z1) = self.cell_of(center.x + radius, center.z + radius);
        let footprint = (i64::from(x1) - i64::from(x0) + 1) as u128
            * (i64::from(z1) - i64::from(z0) + 1) as u128;
        if footprint > self.cells.len() as u128 {
            for bucket in self.cells.values() {
                within(bucket, out);
            }
            return;
        }

        for cz in z0..=z1 {
            for cx in x0..=x1 {
                if let Some(bucket) = self.cells.get(&(cx, cz)) {
                    within(bucket, out);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}
