//! Point and vector value types for 3D routing.
//!
//! Coordinates are `f64`: the solvers compare coordinates rounded to 3 or 5
//! decimal digits over spans up to the ray length (10 000), which is beyond
//! what single precision can hold exactly.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use super::math::round_to;

/// A position in 3D space.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// The origin (0, 0, 0).
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point3) -> f64 {
        (*self - other).length()
    }

    /// Round each coordinate to `digits` decimal places.
    #[inline]
    pub fn round(&self, digits: u32) -> Point3 {
        Point3::new(
            round_to(self.x, digits),
            round_to(self.y, digits),
            round_to(self.z, digits),
        )
    }
}

/// A direction or displacement in 3D space.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit X axis.
    pub const X: Vector3 = Vector3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit Y axis.
    pub const Y: Vector3 = Vector3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit Z axis.
    pub const Z: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new vector.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(&self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// True when the length is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Unit vector in this direction, or `None` for a (near-)zero vector.
    #[inline]
    pub fn unitized(&self) -> Option<Vector3> {
        let len = self.length();
        if len <= f64::EPSILON {
            return None;
        }
        Some(*self * (1.0 / len))
    }

    /// Round each component to `digits` decimal places.
    #[inline]
    pub fn round(&self, digits: u32) -> Vector3 {
        Vector3::new(
            round_to(self.x, digits),
            round_to(self.y, digits),
            round_to(self.z, digits),
        )
    }

    /// Angle between two vectors in radians, in [0, π].
    ///
    /// Zero vectors yield an angle of 0.
    pub fn angle_to(&self, other: Vector3) -> f64 {
        let (Some(a), Some(b)) = (self.unitized(), other.unitized()) else {
            return 0.0;
        };
        a.dot(b).clamp(-1.0, 1.0).acos()
    }

    /// True when the vectors are parallel or antiparallel within
    /// `angle_tolerance` radians.
    pub fn is_parallel_to(&self, other: Vector3, angle_tolerance: f64) -> bool {
        let angle = self.angle_to(other);
        angle <= angle_tolerance || (std::f64::consts::PI - angle) <= angle_tolerance
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, v: Vector3) -> Point3 {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign<Vector3> for Point3 {
    #[inline]
    fn add_assign(&mut self, v: Vector3) {
        *self = *self + v;
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, other: Point3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    #[inline]
    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, s: f64) -> Vector3 {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}
