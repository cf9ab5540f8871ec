//! Bounded single-bend path search between two directed endpoints.
//!
//! Wraps the line intersection solver into the [`BendSolver`] capability the
//! node builder consumes for non-90° turn angles, and doubles as a
//! standalone two-leg connector.

use crate::collisions::CollisionDetector;
use crate::config::ToleranceConfig;
use crate::core::{Basis3, Point3, Vector3};
use crate::routing::builder::BendSolver;
use crate::routing::intersection::LineIntersectionSolver;

/// Connects two directed endpoints with at most one bend.
pub struct SingleBendFinder<'a> {
    tolerance: ToleranceConfig,
    detector: Option<&'a dyn CollisionDetector>,
    route_start: Point3,
    route_end: Point3,
}

impl<'a> SingleBendFinder<'a> {
    /// Create a finder with the given tolerances.
    pub fn new(tolerance: ToleranceConfig) -> Self {
        Self {
            tolerance,
            detector: None,
            route_start: Point3::ORIGIN,
            route_end: Point3::ORIGIN,
        }
    }

    /// Attach a collision detector with the global route endpoints.
    pub fn with_detector(
        mut self,
        detector: &'a dyn CollisionDetector,
        route_start: Point3,
        route_end: Point3,
    ) -> Self {
        self.detector = Some(detector);
        self.route_start = route_start;
        self.route_end = route_end;
        self
    }

    /// Path between the endpoints using the allowed `angles`.
    ///
    /// Returns `[start, bend, end]`, or `[start, end]` when the bend
    /// coincides with an endpoint, or `None` when no valid connection
    /// exists.
    pub fn find_path(
        &self,
        start: (Point3, Vector3),
        end: (Point3, Vector3),
        angles: Vec<i32>,
        min_link_length: f64,
    ) -> Option<Vec<Point3>> {
        let start_basis = Basis3::world(start.0).rotated_to(start.1);
        let end_basis = Basis3::world(end.0).rotated_to(end.1);

        let mut solver = LineIntersectionSolver::new(angles, self.tolerance);
        solver.min_link_length = min_link_length;
        solver.first_node_planes = start_basis.planes();
        solver.last_node_planes = end_basis.planes();
        if let Some(detector) = self.detector {
            solver = solver.with_detector(detector, start_basis, self.route_start, self.route_end);
        }

        let p = solver.intersection(start, end)?;
        let ct = self.tolerance.compound_epsilon();
        if p.distance(start.0) <= ct || p.distance(end.0) <= ct {
            Some(vec![start.0, end.0])
        } else {
            Some(vec![start.0, p, end.0])
        }
    }
}

impl BendSolver for SingleBendFinder<'_> {
    fn find_bend_path(
        &self,
        start: (Point3, Vector3),
        end: (Point3, Vector3),
        angle: i32,
        min_link_length: f64,
    ) -> Option<Vec<Point3>> {
        self.find_path(start, end, vec![angle], min_link_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_run_collapses_to_endpoints() {
        let finder = SingleBendFinder::new(ToleranceConfig::default());
        let path = finder
            .find_path(
                (Point3::ORIGIN, Vector3::X),
                (Point3::new(10.0, 0.0, 0.0), Vector3::X),
                vec![0, 90],
                1.0,
            )
            .unwrap();
        assert_eq!(
            path,
            vec![Point3::ORIGIN, Point3::new(10.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_offset_run_gets_one_bend() {
        let finder = SingleBendFinder::new(ToleranceConfig::default());
        let path = finder
            .find_path(
                (Point3::ORIGIN, Vector3::X),
                (Point3::new(10.0, 5.0, 0.0), Vector3::X),
                vec![90],
                1.0,
            )
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Point3::ORIGIN);
        assert_eq!(path[2], Point3::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn test_45_degree_bend() {
        let finder = SingleBendFinder::new(ToleranceConfig::default());
        // goal offset so a single 45° bend fits: run along +X, then
        // diagonally up-right into a goal stub pointing (1,1,0)/√2
        let diag = Vector3::new(1.0, 1.0, 0.0).unitized().unwrap();
        let path = finder.find_bend_path(
            (Point3::ORIGIN, Vector3::X),
            (Point3::new(10.0, 5.0, 0.0), diag),
            45,
            1.0,
        );
        let path = path.unwrap();
        assert_eq!(path.len(), 3);
        // bend point lies where the diagonal leg meets the X run
        assert_eq!(path[1], Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_unreachable_yields_none() {
        let finder = SingleBendFinder::new(ToleranceConfig::default());
        let path = finder.find_path(
            (Point3::ORIGIN, Vector3::X),
            (Point3::new(10.0, 5.0, 5.0), Vector3::X),
            vec![90],
            1.0,
        );
        assert!(path.is_none());
    }
}
