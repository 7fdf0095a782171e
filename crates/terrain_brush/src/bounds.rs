//! Render bounds, rotations and transforms for placed instances.
//!
//! Model bounds are authored pivot-relative at unit scale. Placement transforms them
//! into world space to find the lowest rendered point for bottom-snapping.
use glam::{EulerRot, Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two opposite corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest edge length of the box.
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Scale the box about the pivot (origin).
    pub fn scaled(&self, scale: Vec3) -> Aabb {
        Aabb::new(self.min * scale, self.max * scale)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Euler rotation in degrees: yaw about Y, tilts about X and Z.
///
/// Applied Z first, then X, then Y (intrinsic Y-X-Z).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub yaw: f32,
    pub pitch_x: f32,
    pub pitch_z: f32,
}

impl EulerAngles {
    pub const IDENTITY: Self = Self {
        yaw: 0.0,
        pitch_x: 0.0,
        pitch_z: 0.0,
    };

    pub fn new(yaw: f32, pitch_x: f32, pitch_z: f32) -> Self {
        Self {
            yaw,
            pitch_x,
            pitch_z,
        }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch_x.to_radians(),
            self.pitch_z.to_radians(),
        )
    }
}

/// World transform of a placed instance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: EulerAngles,
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: EulerAngles::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl InstanceTransform {
    pub fn new(position: Vec3, rotation: EulerAngles, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Map a pivot-relative point into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation.to_quat() * (local * self.scale)
    }

    /// Lowest world-space Y over the transformed corners of every part.
    ///
    /// Returns `None` when there are no parts, i.e. nothing is rendered.
    pub fn lowest_point(&self, parts: &[Aabb]) -> Option<f32> {
        let rotation = self.rotation.to_quat();
        parts
            .iter()
            .flat_map(|part| part.corners())
            .map(|corner| (self.position + rotation * (corner * self.scale)).y)
            .reduce(f32::min)
    }
}
