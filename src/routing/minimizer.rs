//! Bend-count reduction over a found path.
//!
//! Slides a four-node window along the path and asks the line intersection
//! solver whether the window's interior can be replaced by a single valid
//! elbow (or dropped entirely). Each successful reduction strictly shortens
//! the node list, so the pass terminates.

use crate::collisions::CollisionDetector;
use crate::config::ToleranceConfig;
use crate::core::{Basis3, Point3, Vector3};
use crate::graph::SimpleGraph;
use crate::routing::intersection::LineIntersectionSolver;

/// Reduces a path's node count window by window.
pub struct NodeMinimizer<'a> {
    angles: Vec<i32>,
    tolerance: ToleranceConfig,
    min_link_length: f64,
    max_link_length: Option<f64>,
    detector: Option<&'a dyn CollisionDetector>,
    basis: Basis3,
}

impl<'a> NodeMinimizer<'a> {
    /// Create a minimizer for an allowed-angle set.
    pub fn new(angles: Vec<i32>, tolerance: ToleranceConfig, min_link_length: f64) -> Self {
        Self {
            angles,
            tolerance,
            min_link_length,
            max_link_length: None,
            detector: None,
            basis: Basis3::default(),
        }
    }

    /// Leave windows containing a link at or above `length` untouched.
    pub fn with_max_link_length(mut self, length: f64) -> Self {
        self.max_link_length = Some(length);
        self
    }

    /// Attach a collision detector gating every replacement segment.
    pub fn with_detector(mut self, detector: &'a dyn CollisionDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Reduce `nodes` until no window can be simplified further.
    pub fn minimize(&mut self, nodes: Vec<Point3>) -> Vec<Point3> {
        if nodes.len() < 4 {
            return nodes;
        }
        let before = nodes.len();
        let route_start = nodes[0];
        let route_end = nodes[nodes.len() - 1];
        if let Some(first_dir) = (nodes[1] - nodes[0]).unitized() {
            self.basis = Basis3::world(nodes[0]).rotated_to(first_dir);
        }

        let mut solver = LineIntersectionSolver::new(self.angles.clone(), self.tolerance);
        solver.min_link_length = self.min_link_length;
        if let Some(detector) = self.detector {
            solver = solver.with_detector(detector, self.basis, route_start, route_end);
        }

        let mut nodes = nodes;
        let mut i = 0;
        while i + 3 < nodes.len() {
            match self.reduce_window(&nodes, i, &mut solver) {
                Some(replacement) => {
                    nodes.splice(i..i + 4, replacement);
                    // a shorter list may expose a new reduction at the
                    // same index
                }
                None => i += 1,
            }
        }

        if nodes.len() < before {
            tracing::debug!(before, after = nodes.len(), "path reduced");
        }
        nodes
    }

    /// Replacement for the window at `i`, or `None` when it must stand.
    fn reduce_window(
        &mut self,
        nodes: &[Point3],
        i: usize,
        solver: &mut LineIntersectionSolver<'a>,
    ) -> Option<Vec<Point3>> {
        let window = &nodes[i..i + 4];

        // the carried frame follows every window's first link, including
        // windows the gates below reject
        if let Some(link_dir) = (window[1] - window[0]).unitized() {
            self.basis = self.basis.rotated_to(link_dir).with_origin(window[0]);
            solver.set_basis(self.basis);
        }

        if let Some(max) = self.max_link_length {
            if window.windows(2).any(|pair| pair[0].distance(pair[1]) >= max) {
                return None;
            }
        }

        // the window must span exactly one plane: zero means collinear,
        // more means a genuinely three-dimensional stretch
        let graph = SimpleGraph {
            nodes: window.to_vec(),
        };
        let planes = graph.planes(self.tolerance.angle_tolerance());
        let [plane] = planes.as_slice() else {
            return None;
        };

        let dir_in = if i == 0 {
            Vector3::ZERO
        } else {
            (window[0] - nodes[i - 1]).unitized().unwrap_or(Vector3::ZERO)
        };
        let dir_out = if i + 4 == nodes.len() {
            Vector3::ZERO
        } else {
            (nodes[i + 4] - window[3]).unitized().unwrap_or(Vector3::ZERO)
        };

        solver.first_node_planes = vec![*plane];
        solver.last_node_planes = vec![*plane];

        let p = solver.intersection((window[0], dir_in), (window[3], dir_out))?;

        let ct = self.tolerance.compound_epsilon();
        if p.distance(window[0]) > ct && p.distance(window[3]) > ct {
            Some(vec![window[0], p, window[3]])
        } else {
            Some(vec![window[0], window[3]])
        }
    }
}
