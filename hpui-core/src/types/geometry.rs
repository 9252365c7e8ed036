//! Geometry helpers on top of `glam`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A rectangle lying on a plane in world space.
///
/// `right` and `forward` span the plane (the plane normal is their cross
/// product); `half_extents` are the half sizes along each axis. Points are
/// mapped into normalized surface coordinates where `(0, 0)` is the
/// `-right, -forward` corner and `(1, 1)` the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub center: Vec3,
    pub right: Vec3,
    pub forward: Vec3,
    pub half_extents: Vec2,
}

impl SurfaceRect {
    /// Builds a rectangle, normalizing both axes.
    ///
    /// Zero-length axes are replaced by world X and Z respectively.
    pub fn new(center: Vec3, right: Vec3, forward: Vec3, half_extents: Vec2) -> Self {
        Self {
            center,
            right: right.try_normalize().unwrap_or(Vec3::X),
            forward: forward.try_normalize().unwrap_or(Vec3::Z),
            half_extents,
        }
    }

    /// An axis-aligned rectangle on the world XZ plane.
    pub fn axis_aligned(center: Vec3, half_extents: Vec2) -> Self {
        Self::new(center, Vec3::X, Vec3::Z, half_extents)
    }

    /// Plane normal.
    pub fn normal(&self) -> Vec3 {
        self.forward.cross(self.right).normalize_or_zero()
    }

    /// Projects `point` onto the plane and returns its in-plane offset from
    /// the center, in meters along (`right`, `forward`).
    pub fn local_offset(&self, point: Vec3) -> Vec2 {
        let offset = point - self.center;
        Vec2::new(offset.dot(self.right), offset.dot(self.forward))
    }

    /// Normalized surface coordinates of `point`. Values outside `[0, 1]`
    /// mean the projection falls outside the rectangle.
    pub fn normalized_coordinates(&self, point: Vec3) -> Vec2 {
        let size = self.half_extents * 2.0;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Vec2::ZERO;
        }
        (self.local_offset(point) + self.half_extents) / size
    }
}
