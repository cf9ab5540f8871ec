//! Straight-run compaction.
//!
//! Collapses runs of nodes that repeat the previous segment's direction
//! into single straight links, leaving the minimal vertex set describing
//! the same polyline.

use crate::core::{Point3, Vector3};
use crate::routing::node::PathNode;

/// Drops path vertices whose incoming direction repeats the tracked one.
#[derive(Clone, Copy, Debug)]
pub struct PathRefiner {
    tolerance_digits: u32,
}

impl Default for PathRefiner {
    fn default() -> Self {
        Self {
            tolerance_digits: 5,
        }
    }
}

impl PathRefiner {
    /// Create a refiner comparing directions rounded to `tolerance_digits`.
    pub fn new(tolerance_digits: u32) -> Self {
        Self { tolerance_digits }
    }

    /// Compact a node path into its bend and end vertices.
    pub fn refine(&self, path: &[PathNode]) -> Vec<Point3> {
        let mut points = Vec::new();
        let Some(first) = path.first() else {
            return points;
        };

        let mut base_point = first.point;
        let mut base_dir = first.dir;
        points.push(base_point);

        for (i, node) in path.iter().enumerate().skip(1) {
            let changed = base_dir.is_zero()
                || node.dir.round(self.tolerance_digits) != base_dir.round(self.tolerance_digits);
            if changed {
                if i != 1 {
                    points.push(base_point);
                }
                base_dir = node.dir;
            }
            base_point = node.point;
        }
        points.push(base_point);

        points
    }

    /// Compact a bare point polyline, deriving directions from the
    /// consecutive segments.
    pub fn refine_points(&self, points: &[Point3]) -> Vec<Point3> {
        let nodes: Vec<PathNode> = points
            .iter()
            .enumerate()
            .map(|(i, &point)| {
                let dir = if i == 0 {
                    Vector3::ZERO
                } else {
                    (point - points[i - 1]).unitized().unwrap_or(Vector3::ZERO)
                };
                PathNode {
                    dir,
                    ..PathNode::start(point, Vector3::ZERO, Default::default())
                }
            })
            .collect();
        self.refine(&nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn test_collinear_run_collapses_to_endpoints() {
        let refiner = PathRefiner::default();
        let points: Vec<Point3> = (0..=10).map(|i| p(f64::from(i), 0.0)).collect();
        assert_eq!(refiner.refine_points(&points), vec![p(0.0, 0.0), p(10.0, 0.0)]);
    }

    #[test]
    fn test_bends_survive() {
        let refiner = PathRefiner::default();
        let points = vec![p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)];
        assert_eq!(
            refiner.refine_points(&points),
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)]
        );
    }

    #[test]
    fn test_idempotent() {
        let refiner = PathRefiner::default();
        let points = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 3.0),
            p(4.0, 6.0),
            p(9.0, 6.0),
        ];
        let once = refiner.refine_points(&points);
        let twice = refiner.refine_points(&once);
        assert_eq!(once, twice);
        assert_eq!(once, vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 6.0), p(9.0, 6.0)]);
    }

    #[test]
    fn test_empty_and_single() {
        let refiner = PathRefiner::default();
        assert!(refiner.refine_points(&[]).is_empty());
        assert_eq!(refiner.refine_points(&[p(1.0, 1.0)]), vec![p(1.0, 1.0), p(1.0, 1.0)]);
    }
}
