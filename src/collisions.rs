//! Collision-detection capability consumed by the solvers.
//!
//! The routing core only asks one question: is a candidate segment clear?
//! Hosts embed their own geometry engine behind [`CollisionDetector`]; the
//! crate ships an axis-aligned-box detector good enough for routing around
//! rectangular equipment and for tests.

use serde::{Deserialize, Serialize};

use crate::core::math::digit_tolerance;
use crate::core::{Basis3, Point3};

/// A single detected collision along a candidate segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collision {
    /// Index of the obstacle that was hit.
    pub obstacle: usize,
    /// Sample point at which the hit was detected.
    pub point: Point3,
}

/// Capability to test candidate segments against host geometry.
///
/// An empty result means the segment is clear. `basis` is the local frame
/// rotated to the segment's own tangent; `route_start`/`route_end` are the
/// global route endpoints so implementations can ignore the equipment being
/// connected. `digits` is the compound tolerance the caller compares at.
pub trait CollisionDetector {
    fn collisions(
        &self,
        from: Point3,
        to: Point3,
        basis: &Basis3,
        route_start: Point3,
        route_end: Point3,
        digits: u32,
    ) -> Vec<Collision>;
}

/// An axis-aligned box obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Create a box from two opposite corners (any order per axis).
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Point containment with an inflation margin.
    pub fn contains(&self, p: Point3, margin: f64) -> bool {
        p.x >= self.min.x - margin
            && p.x <= self.max.x + margin
            && p.y >= self.min.y - margin
            && p.y <= self.max.y + margin
            && p.z >= self.min.z - margin
            && p.z <= self.max.z + margin
    }
}

/// Segment-sampling detector over a set of axis-aligned boxes.
#[derive(Clone, Debug, Default)]
pub struct AabbObstacles {
    boxes: Vec<Aabb>,
    /// Inflation margin applied to every box (trace half-width).
    pub margin: f64,
    /// Sampling step along candidate segments.
    pub sample_step: f64,
}

impl AabbObstacles {
    /// Create a detector over `boxes` with a sampling step.
    pub fn new(boxes: Vec<Aabb>, sample_step: f64) -> Self {
        Self {
            boxes,
            margin: 0.0,
            sample_step,
        }
    }

    /// Inflate every box by `margin`.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

impl CollisionDetector for AabbObstacles {
    fn collisions(
        &self,
        from: Point3,
        to: Point3,
        _basis: &Basis3,
        route_start: Point3,
        route_end: Point3,
        digits: u32,
    ) -> Vec<Collision> {
        let mut hits = Vec::new();
        let length = from.distance(to);
        if length == 0.0 || self.sample_step <= 0.0 {
            return hits;
        }
        let ct = digit_tolerance(digits);
        let steps = (length / self.sample_step).ceil() as usize;

        for (index, aabb) in self.boxes.iter().enumerate() {
            // Boxes holding the connected equipment are not obstacles.
            if aabb.contains(route_start, ct) || aabb.contains(route_end, ct) {
                continue;
            }
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let sample = from + (to - from) * t;
                if aabb.contains(sample, self.margin) {
                    hits.push(Collision {
                        obstacle: index,
                        point: sample,
                    });
                    break;
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vector3;

    fn far() -> Point3 {
        Point3::new(-100.0, -100.0, -100.0)
    }

    #[test]
    fn test_clear_segment() {
        let detector = AabbObstacles::new(
            vec![Aabb::new(Point3::new(4.0, 2.0, -1.0), Point3::new(6.0, 4.0, 1.0))],
            0.1,
        );
        let hits = detector.collisions(
            Point3::ORIGIN,
            Point3::new(10.0, 0.0, 0.0),
            &Basis3::default(),
            far(),
            far(),
            3,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_blocked_segment() {
        let detector = AabbObstacles::new(
            vec![Aabb::new(Point3::new(4.0, -1.0, -1.0), Point3::new(6.0, 1.0, 1.0))],
            0.1,
        );
        let hits = detector.collisions(
            Point3::ORIGIN,
            Point3::new(10.0, 0.0, 0.0),
            &Basis3::default(),
            far(),
            far(),
            3,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].obstacle, 0);
    }

    #[test]
    fn test_route_endpoint_box_ignored() {
        let start = Point3::ORIGIN;
        let detector = AabbObstacles::new(
            vec![Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))],
            0.1,
        );
        let hits = detector.collisions(
            start,
            start + Vector3::X * 10.0,
            &Basis3::default(),
            start,
            Point3::new(10.0, 0.0, 0.0),
            3,
        );
        assert!(hits.is_empty());
    }
}
