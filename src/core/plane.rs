//! Oriented planes.

use serde::{Deserialize, Serialize};

use super::point::{Point3, Vector3};

/// An oriented plane: origin plus an orthonormal in-plane frame.
///
/// `normal = x_axis × y_axis`. Candidate-direction fans are rotations of an
/// in-plane seed about the normal, so the frame matters, not just the normal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub normal: Vector3,
}

impl Plane {
    /// Build a plane through `origin` spanned by two directions.
    ///
    /// The X axis follows `x_dir`; `y_dir` only fixes the plane. Returns
    /// `None` when the directions are parallel or degenerate, which cannot
    /// define a plane.
    pub fn from_directions(origin: Point3, x_dir: Vector3, y_dir: Vector3) -> Option<Plane> {
        let x_axis = x_dir.unitized()?;
        let normal = x_dir.cross(y_dir).unitized()?;
        let y_axis = normal.cross(x_axis);
        Some(Plane {
            origin,
            x_axis,
            y_axis,
            normal,
        })
    }

    /// Build a plane through `origin` with the given normal.
    ///
    /// The in-plane frame is derived deterministically from the world axis
    /// least aligned with the normal.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Option<Plane> {
        let normal = normal.unitized()?;
        let helper = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
            Vector3::X
        } else if normal.y.abs() <= normal.z.abs() {
            Vector3::Y
        } else {
            Vector3::Z
        };
        let x_axis = normal.cross(helper).unitized()?;
        let y_axis = normal.cross(x_axis);
        Some(Plane {
            origin,
            x_axis,
            y_axis,
            normal,
        })
    }

    /// Signed distance from a point to the plane.
    #[inline]
    pub fn signed_distance(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.normal)
    }
}
