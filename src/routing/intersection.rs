//! Single-bend ray/ray connector.
//!
//! Given two directed endpoints, sweep the cross-product of their candidate
//! direction fans for the pair of rays whose intersection yields the
//! shortest collision-free, angle-valid elbow. This is the one geometric
//! primitive shared by per-step routing and path minimization.

use crate::collisions::CollisionDetector;
use crate::config::ToleranceConfig;
use crate::core::intersect::line_line;
use crate::core::math::{round_to, rounded_degrees};
use crate::core::{Basis3, Line, Plane, Point3, Vector3};
use crate::routing::directions::DirectionIterator;

/// Ray extent for candidate lines; effectively unbounded at routing scale.
const RAY_LENGTH: f64 = 10_000.0;

/// Finds the minimal-total-distance valid connection between two directed
/// endpoints.
pub struct LineIntersectionSolver<'a> {
    angles: Vec<i32>,
    tolerance: ToleranceConfig,
    /// Minimum accepted length for either resulting segment; an exact touch
    /// (zero length) is always accepted.
    pub min_link_length: f64,
    /// Candidate planes spanning the first endpoint's direction fan.
    pub first_node_planes: Vec<Plane>,
    /// Candidate planes spanning the second endpoint's direction fan.
    pub last_node_planes: Vec<Plane>,
    detector: Option<&'a dyn CollisionDetector>,
    basis: Basis3,
    route_start: Point3,
    route_end: Point3,
}

impl<'a> LineIntersectionSolver<'a> {
    /// Create a solver for an allowed-angle set.
    pub fn new(angles: Vec<i32>, tolerance: ToleranceConfig) -> Self {
        Self {
            angles,
            tolerance,
            min_link_length: 0.0,
            first_node_planes: Vec::new(),
            last_node_planes: Vec::new(),
            detector: None,
            basis: Basis3::default(),
            route_start: Point3::ORIGIN,
            route_end: Point3::ORIGIN,
        }
    }

    /// Attach a collision detector.
    ///
    /// `basis` is the local frame the candidate segments are evaluated in
    /// (rotated to each segment's own tangent before the query);
    /// `route_start`/`route_end` are the global route endpoints.
    pub fn with_detector(
        mut self,
        detector: &'a dyn CollisionDetector,
        basis: Basis3,
        route_start: Point3,
        route_end: Point3,
    ) -> Self {
        self.detector = Some(detector);
        self.basis = basis;
        self.route_start = route_start;
        self.route_end = route_end;
        self
    }

    /// Update the local frame used for collision queries.
    pub fn set_basis(&mut self, basis: Basis3) {
        self.basis = basis;
    }

    /// The allowed-angle set this solver validates against.
    pub fn angles(&self) -> &[i32] {
        &self.angles
    }

    /// Find the best connecting point between two directed endpoints.
    ///
    /// The second endpoint's direction is mirrored so its fan points back
    /// toward the route. Returns `None` when no candidate pair satisfies
    /// the angle, minimum-length and collision constraints.
    pub fn intersection(
        &self,
        node1: (Point3, Vector3),
        node2: (Point3, Vector3),
    ) -> Option<Point3> {
        let (point1, dir1) = node1;
        let (point2, dir2) = node2;
        let c = self.tolerance.compound_digits;
        let ct = self.tolerance.compound_epsilon();
        let at = self.tolerance.angle_tolerance();

        let mut best: Option<Point3> = None;
        let mut best_sum = f64::MAX;

        let mut first_iter =
            DirectionIterator::with_parent(&self.first_node_planes, &self.angles, dir1);
        let mut last_iter =
            DirectionIterator::with_parent(&self.last_node_planes, &self.angles, -dir2);

        while first_iter.advance() {
            let Some(item1) = first_iter.current() else {
                break;
            };
            let line1 = Line::from_ray(point1, item1.round(c), RAY_LENGTH);
            last_iter.reset();
            while last_iter.advance() {
                let Some(item2) = last_iter.current() else {
                    break;
                };
                let line2 = Line::from_ray(point2, item2.round(c), RAY_LENGTH);

                let tangent1 = line1.unit_tangent();
                let tangent2 = line2.unit_tangent();
                let turn = rounded_degrees(tangent1.angle_to(-tangent2));
                if !tangent1.is_parallel_to(tangent2, at) && !self.angles.contains(&turn) {
                    continue;
                }

                let Some((ta, _tb)) = line_line(&line1, &line2, ct, true) else {
                    continue;
                };
                let p = line1.point_at(ta).round(self.tolerance.linear_digits);

                let d1 = round_to(point1.distance(p), c);
                let d2 = round_to(point2.distance(p), c);
                let sum = d1 + d2;
                let lengths_valid = (d1 == 0.0 || d1 >= self.min_link_length)
                    && (d2 == 0.0 || d2 >= self.min_link_length);
                if !lengths_valid || sum >= best_sum {
                    continue;
                }

                if self.segments_clear(point1, point2, p, tangent1, tangent2, d1, d2) {
                    best = Some(p);
                    best_sum = sum;
                }
            }
        }

        best
    }

    /// Collision gate for both candidate segments; exact-touch segments
    /// skip the query.
    fn segments_clear(
        &self,
        point1: Point3,
        point2: Point3,
        p: Point3,
        tangent1: Vector3,
        tangent2: Vector3,
        d1: f64,
        d2: f64,
    ) -> bool {
        let Some(detector) = self.detector else {
            return true;
        };
        let digits = self.tolerance.compound_digits;

        let clear1 = d1 == 0.0 || {
            let basis1 = self.basis.rotated_to(tangent1);
            detector
                .collisions(point1, p, &basis1, self.route_start, self.route_end, digits)
                .is_empty()
        };
        if !clear1 {
            return false;
        }
        let clear2 = d2 == 0.0 || {
            let basis2 = self.basis.rotated_to(tangent2);
            detector
                .collisions(point2, p, &basis2, self.route_start, self.route_end, digits)
                .is_empty()
        };
        clear2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collisions::{Aabb, AabbObstacles};

    fn solver_with_planes(angles: Vec<i32>, p1: Point3, p2: Point3) -> LineIntersectionSolver<'static> {
        let mut solver = LineIntersectionSolver::new(angles, ToleranceConfig::default());
        solver.min_link_length = 1.0;
        solver.first_node_planes =
            vec![Plane::from_directions(p1, Vector3::X, Vector3::Y).unwrap()];
        solver.last_node_planes =
            vec![Plane::from_directions(p2, Vector3::X, Vector3::Y).unwrap()];
        solver
    }

    #[test]
    fn test_direct_connection_preferred_over_bend() {
        let start = Point3::ORIGIN;
        let goal = Point3::new(10.0, 0.0, 0.0);
        let solver = solver_with_planes(vec![0, 90], start, goal);

        let p = solver
            .intersection((start, Vector3::X), (goal, Vector3::X))
            .unwrap();
        assert_eq!(p, goal);
    }

    #[test]
    fn test_offset_endpoints_connect_with_elbow() {
        let start = Point3::ORIGIN;
        let goal = Point3::new(10.0, 5.0, 0.0);
        let solver = solver_with_planes(vec![90], start, goal);

        let p = solver
            .intersection((start, Vector3::X), (goal, Vector3::X))
            .unwrap();
        // elbow lies on one of the two axis-aligned corners
        assert!(p == Point3::new(10.0, 0.0, 0.0) || p == Point3::new(0.0, 5.0, 0.0));

        // returned point satisfies the angle and minimum-length contract
        let d1 = start.distance(p);
        let d2 = goal.distance(p);
        assert!(d1 == 0.0 || d1 >= solver.min_link_length);
        assert!(d2 == 0.0 || d2 >= solver.min_link_length);
    }

    #[test]
    fn test_skew_fans_yield_none() {
        let start = Point3::ORIGIN;
        // goal offset out of both candidate planes: every ray pair is
        // parallel or separated by the 5-unit plane gap
        let goal = Point3::new(10.0, 5.0, 5.0);
        let solver = solver_with_planes(vec![90], start, goal);
        let p = solver.intersection((start, Vector3::X), (goal, Vector3::X));
        assert!(p.is_none());
    }

    #[test]
    fn test_min_link_length_filters_short_segments() {
        let start = Point3::ORIGIN;
        let goal = Point3::new(10.0, 0.5, 0.0);
        let mut solver = solver_with_planes(vec![90], start, goal);
        solver.min_link_length = 1.0;
        // the only 90° elbows leave a 0.5 leg, below the minimum
        assert!(solver
            .intersection((start, Vector3::X), (goal, Vector3::X))
            .is_none());
    }

    #[test]
    fn test_collision_gate_rejects_blocked_elbow() {
        let start = Point3::ORIGIN;
        let goal = Point3::new(10.0, 5.0, 0.0);
        // block the corner at (10, 0): the other corner must win
        let obstacles = AabbObstacles::new(
            vec![Aabb::new(
                Point3::new(8.0, -1.0, -1.0),
                Point3::new(11.0, 1.0, 1.0),
            )],
            0.1,
        );
        let solver = solver_with_planes(vec![90], start, goal).with_detector(
            &obstacles,
            Basis3::default(),
            Point3::new(-100.0, 0.0, 0.0),
            Point3::new(-100.0, 0.0, 0.0),
        );
        let p = solver
            .intersection((start, Vector3::X), (goal, Vector3::X))
            .unwrap();
        assert_eq!(p, Point3::new(0.0, 5.0, 0.0));
    }
}
