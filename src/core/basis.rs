//! Local orthonormal bases carried along a path.
//!
//! Each path node keeps a basis oriented to its arrival direction so the
//! direction fan has a stable local "clock face" per node, and collision
//! queries see the trace cross-section in the segment's own frame.

use serde::{Deserialize, Serialize};

use super::plane::Plane;
use super::point::{Point3, Vector3};

/// Three mutually orthogonal unit vectors anchored at an origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Basis3 {
    pub origin: Point3,
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

impl Default for Basis3 {
    fn default() -> Self {
        Self::world(Point3::ORIGIN)
    }
}

impl Basis3 {
    /// The world-aligned basis at `origin`.
    pub fn world(origin: Point3) -> Self {
        Self {
            origin,
            x: Vector3::X,
            y: Vector3::Y,
            z: Vector3::Z,
        }
    }

    /// Same axes, re-anchored at `origin`.
    pub fn with_origin(&self, origin: Point3) -> Self {
        Self { origin, ..*self }
    }

    /// Re-orient so the X axis aligns with `direction`.
    ///
    /// Applies the minimal rotation taking the current X onto `direction`,
    /// which keeps the frame orthonormal with a deterministic roll. The
    /// antiparallel case flips half a turn about the current Z. A zero
    /// `direction` returns the basis unchanged.
    pub fn rotated_to(&self, direction: Vector3) -> Basis3 {
        let Some(target) = direction.unitized() else {
            return *self;
        };
        let angle = self.x.angle_to(target);
        if angle <= f64::EPSILON {
            return *self;
        }
        let axis = match self.x.cross(target).unitized() {
            Some(axis) => axis,
            // x and target are antiparallel; any perpendicular works, Z
            // keeps the roll deterministic.
            None => self.z,
        };
        Basis3 {
            origin: self.origin,
            x: rotate_about(self.x, axis, angle),
            y: rotate_about(self.y, axis, angle),
            z: rotate_about(self.z, axis, angle),
        }
    }

    /// The three coordinate planes of this basis (XY, XZ, YZ).
    pub fn planes(&self) -> Vec<Plane> {
        [(self.x, self.y), (self.x, self.z), (self.y, self.z)]
            .into_iter()
            .filter_map(|(a, b)| Plane::from_directions(self.origin, a, b))
            .collect()
    }
}

/// Rodrigues rotation of `v` about unit `axis` by `angle` radians.
pub fn rotate_about(v: Vector3, axis: Vector3, angle: f64) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * (axis.dot(v) * (1.0 - cos))
}
