//! Angle-constrained best-first route search.
//!
//! Expands nodes by lowest F score, fanning candidate directions from each
//! node's local frame and stepping with the node builder. Visited points are
//! keyed on their coordinates quantized at the active tolerance, so revisits
//! at the same rounding only survive when they arrive cheaper.

use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::collisions::CollisionDetector;
use crate::config::ToleranceConfig;
use crate::core::{Basis3, Point3, Vector3};
use crate::routing::builder::NodeBuilder;
use crate::routing::directions::DirectionIterator;
use crate::routing::node::{PathNode, ScoredNode};
use crate::routing::refine::PathRefiner;
use crate::routing::sweep::SweepSearch;

/// Hashable quantized coordinates.
type PointKey = (i64, i64, i64);

fn point_key(point: Point3, digits: u32) -> PointKey {
    let scale = 10f64.powi(digits as i32);
    (
        (point.x * scale).round() as i64,
        (point.y * scale).round() as i64,
        (point.z * scale).round() as i64,
    )
}

/// Best-first router over adaptive steps and direction fans.
pub struct AStarRouter<'a> {
    builder: NodeBuilder<'a>,
    start: (Point3, Vector3),
    end: (Point3, Vector3),
    angles: Vec<i32>,
    tolerance: ToleranceConfig,
    max_iterations: usize,
    detector: Option<&'a dyn CollisionDetector>,
    tolerance_digits: u32,
}

impl<'a> AStarRouter<'a> {
    /// Create a router for directed endpoints.
    pub fn new(
        builder: NodeBuilder<'a>,
        start: (Point3, Vector3),
        end: (Point3, Vector3),
        angles: Vec<i32>,
        tolerance: ToleranceConfig,
        max_iterations: usize,
    ) -> Self {
        Self {
            builder,
            start,
            end,
            angles,
            tolerance,
            max_iterations,
            detector: None,
            tolerance_digits: 3,
        }
    }

    /// Attach a collision detector gating every expanded step segment.
    pub fn with_detector(mut self, detector: &'a dyn CollisionDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Run the search with the builder's current step, tolerance and
    /// heuristic settings. Returns the refined point path, empty when no
    /// route was found within the iteration cap.
    pub fn find_path(&mut self) -> Vec<Point3> {
        let (start_point, start_dir) = self.start;
        let (end_point, _) = self.end;
        let goal_epsilon = self.tolerance.compound_epsilon();
        let digits = self.tolerance_digits;

        let start_basis = Basis3::world(start_point).rotated_to(start_dir);
        let start_node = PathNode::start(start_point, start_dir, start_basis);

        let mut open = BinaryHeap::new();
        let mut closed: HashSet<PointKey> = HashSet::new();
        let mut visited: HashMap<PointKey, PathNode> = HashMap::new();

        open.push(ScoredNode { node: start_node });
        visited.insert(point_key(start_point, digits), start_node);

        let mut iterations = 0usize;
        while let Some(ScoredNode { node: current }) = open.pop() {
            iterations += 1;
            if iterations > self.max_iterations {
                tracing::warn!(
                    iterations = self.max_iterations,
                    "route search hit the iteration cap"
                );
                return Vec::new();
            }

            let current_key = point_key(current.point, digits);
            if !closed.insert(current_key) {
                continue;
            }

            if current.point.distance(end_point) <= goal_epsilon {
                tracing::debug!(iterations, "goal reached");
                return self.reconstruct(current, &visited);
            }

            let planes = current.basis.planes();
            let mut fan = DirectionIterator::with_parent(&planes, &self.angles, current.dir);
            while fan.advance() {
                let Some(dir) = fan.current() else {
                    break;
                };
                let dir = dir.round(self.tolerance.compound_digits);

                let Some(node) = self.builder.build(&current, dir) else {
                    continue;
                };
                let node = self.builder.score(&current, node);
                let node_key = point_key(node.point, digits);
                if closed.contains(&node_key) {
                    continue;
                }
                if !self.segment_clear(&current, &node) {
                    continue;
                }
                match visited.get(&node_key) {
                    Some(seen) if seen.g <= node.g => {}
                    _ => {
                        visited.insert(node_key, node);
                        open.push(ScoredNode { node });
                    }
                }
            }
        }

        tracing::debug!(iterations, "open set exhausted without reaching the goal");
        Vec::new()
    }

    fn segment_clear(&self, parent: &PathNode, node: &PathNode) -> bool {
        let Some(detector) = self.detector else {
            return true;
        };
        detector
            .collisions(
                parent.point,
                node.point,
                &node.basis,
                self.start.0,
                self.end.0,
                self.tolerance.compound_digits,
            )
            .is_empty()
    }

    /// Walk the parent chain back to the start, snap the terminal node onto
    /// the goal and compact straight runs.
    fn reconstruct(&self, goal: PathNode, visited: &HashMap<PointKey, PathNode>) -> Vec<Point3> {
        let digits = self.tolerance_digits;
        let mut chain = vec![goal];
        let mut guard = 0usize;
        while let Some(last) = chain.last().copied() {
            if point_key(last.parent, digits) == point_key(last.point, digits) {
                break;
            }
            let Some(parent) = visited.get(&point_key(last.parent, digits)).copied() else {
                break;
            };
            chain.push(parent);
            guard += 1;
            if guard > self.max_iterations {
                break;
            }
        }
        chain.reverse();
        if let Some(last) = chain.last_mut() {
            last.point = self.end.0;
        }
        PathRefiner::new(self.tolerance.linear_digits).refine(&chain)
    }
}

impl SweepSearch for AStarRouter<'_> {
    fn search(&mut self, step: f64, tolerance_digits: u32, heuristic_weight: i32) -> Vec<Point3> {
        self.builder.set_step(step);
        self.builder.set_tolerance_digits(tolerance_digits);
        self.builder.set_heuristic(heuristic_weight);
        self.tolerance_digits = tolerance_digits;
        self.find_path()
    }
}
