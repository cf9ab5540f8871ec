//! Finite line segments.

use serde::{Deserialize, Serialize};

use super::point::{Point3, Vector3};

/// A finite segment between two points.
///
/// Parametrized over `t` in [0, 1] spanning from `from` to `to`;
/// [`Line::point_at`] extrapolates outside that range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point3,
    pub to: Point3,
}

impl Line {
    /// Segment between two points.
    #[inline]
    pub fn new(from: Point3, to: Point3) -> Self {
        Self { from, to }
    }

    /// Segment starting at `origin`, running `extent` along `direction`.
    ///
    /// `direction` does not need to be unit length.
    pub fn from_ray(origin: Point3, direction: Vector3, extent: f64) -> Self {
        let dir = direction.unitized().unwrap_or(Vector3::ZERO);
        Self {
            from: origin,
            to: origin + dir * extent,
        }
    }

    /// Displacement from start to end.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.to - self.from
    }

    /// Unit tangent, or the zero vector for a degenerate segment.
    #[inline]
    pub fn unit_tangent(&self) -> Vector3 {
        self.direction().unitized().unwrap_or(Vector3::ZERO)
    }

    /// Segment length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Point at parameter `t` (0 = start, 1 = end, extrapolates outside).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.from + self.direction() * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_at_spans_segment() {
        let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
        assert_eq!(line.point_at(0.0), line.from);
        assert_eq!(line.point_at(1.0), line.to);
        assert_eq!(line.point_at(0.5), Point3::new(5.0, 0.0, 0.0));
        // extrapolation
        assert_eq!(line.point_at(2.0), Point3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_ray_normalizes_direction() {
        let line = Line::from_ray(Point3::ORIGIN, Vector3::new(0.0, 2.0, 0.0), 5.0);
        assert_relative_eq!(line.length(), 5.0);
        assert_eq!(line.unit_tangent(), Vector3::Y);
    }
}
