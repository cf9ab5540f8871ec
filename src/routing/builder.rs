//! Per-step path extension.
//!
//! The [`NodeBuilder`] advances a node one adaptive step toward the goal
//! along a chosen direction (geometry phase), then scores it and carries the
//! local basis forward (costing phase). A rejected geometry phase means the
//! direction is infeasible from that parent, nothing more.

use crate::core::intersect::line_plane;
use crate::core::math::{digit_tolerance, round_to, rounded_degrees};
use crate::core::{Line, Plane, Point3, Vector3};
use crate::routing::node::{HeuristicFormula, PathNode};
use crate::visualize::PointVisualizer;
use crate::TraceSettings;

/// Capability to resolve a non-90° step target through a bounded
/// single-bend path search.
///
/// Injected rather than referenced concretely so the stepping component
/// does not depend on the bend-solving component at compile time.
pub trait BendSolver {
    /// Path from `start` to `end` using exactly one allowed `angle`, with
    /// legs no shorter than `min_link_length`. `None` when no single bend
    /// connects the endpoints.
    fn find_bend_path(
        &self,
        start: (Point3, Vector3),
        end: (Point3, Vector3),
        angle: i32,
        min_link_length: f64,
    ) -> Option<Vec<Point3>>;
}

/// Multiplier applied to the incremental G of a direction change when the
/// penalty is enabled (200 × the 0.01 step-cost scalar).
const CHANGE_DIR_PENALTY: f64 = 200.0 * STEP_COST;

/// Scalar applied to heuristic weight percentages.
const STEP_COST: f64 = 0.01;

/// Distance below which a fallback plane hit is discarded as a
/// compound-rounding artifact.
const FALLBACK_HIT_TOLERANCE: f64 = 0.03;

/// Builds path nodes: geometry step first, then scores.
pub struct NodeBuilder<'a> {
    formula: HeuristicFormula,
    start: Point3,
    end: Point3,
    end_planes: Vec<Plane>,
    end_direction: Vector3,
    trace: TraceSettings,
    punish_change_direction: bool,
    step: f64,
    /// Coordinate-rounding digit count (the sweep's tolerance axis).
    tolerance_digits: u32,
    /// Digit count for derived comparisons in this builder.
    compound_digits: u32,
    heuristic: i32,
    bend_solver: Option<&'a dyn BendSolver>,
    visualizer: Option<&'a dyn PointVisualizer>,
}

impl<'a> NodeBuilder<'a> {
    /// Create a builder for a route from `start` to `end`.
    ///
    /// `end_orths` are the goal-local orth directions; each anchors one of
    /// the axis-aligned terminal planes the step-length fallback intersects.
    pub fn new(
        formula: HeuristicFormula,
        start: Point3,
        end: Point3,
        step: f64,
        end_orths: [Vector3; 3],
        trace: TraceSettings,
        punish_change_direction: bool,
    ) -> Self {
        let end_planes = end_orths
            .iter()
            .rev()
            .filter_map(|&orth| Plane::from_normal(end, orth))
            .collect();
        Self {
            formula,
            start,
            end,
            end_planes,
            end_direction: Vector3::ZERO,
            trace,
            punish_change_direction,
            step,
            tolerance_digits: 3,
            compound_digits: 2,
            heuristic: 100,
            bend_solver: None,
            visualizer: None,
        }
    }

    /// Attach the single-bend search capability for non-90° turn angles.
    pub fn with_bend_solver(mut self, solver: &'a dyn BendSolver) -> Self {
        self.bend_solver = Some(solver);
        self
    }

    /// Attach a debug point visualizer.
    pub fn with_visualizer(mut self, visualizer: &'a dyn PointVisualizer) -> Self {
        self.visualizer = Some(visualizer);
        self
    }

    /// Direction at the goal endpoint, used by the bend search.
    pub fn set_end_direction(&mut self, dir: Vector3) {
        self.end_direction = dir;
    }

    /// Nominal step size for sub-step division.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Coordinate-rounding digit count.
    pub fn set_tolerance_digits(&mut self, digits: u32) {
        self.tolerance_digits = digits;
    }

    /// Heuristic weight percentage.
    pub fn set_heuristic(&mut self, heuristic: i32) {
        self.heuristic = heuristic;
    }

    /// Geometry phase: position a child of `parent` one step along `dir`.
    ///
    /// Recomputes the step vector when the carried one rounds to zero at
    /// the compound tolerance or the direction changed. Returns `None` when
    /// no valid forward step exists in this direction.
    pub fn build(&self, parent: &PathNode, dir: Vector3) -> Option<PathNode> {
        let mut node = *parent;
        node.dir = dir;

        let carried_len = round_to(node.step_vector.length(), self.compound_digits);
        let dir_changed = rounded_degrees(parent.dir.angle_to(node.dir)) != 0;
        if carried_len == 0.0 || dir_changed {
            node.step_vector = self.step_vector(&node, parent);
        }

        if round_to(node.step_vector.length(), self.compound_digits) == 0.0 {
            tracing::trace!("step vector length below tolerance");
            return None;
        }

        node.step_vector = node.step_vector.round(self.tolerance_digits);
        node.point = (node.point + node.step_vector).round(self.tolerance_digits);
        Some(node)
    }

    /// Costing phase: G/H/F scores, ANP carry and basis update.
    pub fn score(&self, parent: &PathNode, mut node: PathNode) -> PathNode {
        node.parent = parent.point;

        let ct = digit_tolerance(self.compound_digits);
        let mut g_step = node.step_vector.length();
        if parent.dir == node.dir && parent.point.distance(self.start) > ct {
            node.anp = parent.anp;
        } else {
            node.anp = parent.point;
            if self.punish_change_direction {
                g_step *= CHANGE_DIR_PENALTY;
            }
        }

        node.g += g_step;
        node.h = self
            .formula
            .evaluate(node.point, self.end, f64::from(self.heuristic) * STEP_COST);
        node.f = node.g + node.h;

        node.basis = parent.basis.rotated_to(node.dir).with_origin(node.point);
        node
    }

    /// Adaptive step vector toward the goal along the node's direction.
    ///
    /// A non-90° configured turn angle first asks the bend solver for an
    /// exact single-bend path and steps toward its interior point; otherwise
    /// (or when that fails) the node's ray is intersected against the
    /// goal-anchored planes. The travel distance is divided into equal
    /// sub-steps no longer than the nominal step size.
    fn step_vector(&self, node: &PathNode, parent: &PathNode) -> Vector3 {
        let mut target: Option<Point3> = None;

        let angle = self.trace.turn_angle_deg;
        if angle != 90 {
            if let Some(solver) = self.bend_solver {
                let path = solver.find_bend_path(
                    (parent.point, parent.dir),
                    (self.end, self.end_direction),
                    angle,
                    self.trace.min_link_length,
                );
                if let Some(path) = path {
                    if path.len() > 2 {
                        target = Some(path[1]);
                    }
                }
            }
        }

        let target = target.or_else(|| self.plane_intersection(node));
        if let (Some(v), Some(t)) = (self.visualizer, target) {
            v.show(t);
        }

        let calc_step = match target {
            Some(t) if t != node.point => {
                let vector_length = (t - node.point).length();
                let steps_count = (vector_length / self.step).ceil();
                vector_length / steps_count
            }
            _ => self.step,
        };

        node.dir * calc_step
    }

    /// Fallback step target: nearest valid hit of the node's ray against
    /// the goal-anchored planes.
    fn plane_intersection(&self, node: &PathNode) -> Option<Point3> {
        let ray = Line::new(node.point, node.point + node.dir);

        let mut found: Vec<Point3> = Vec::new();
        for plane in &self.end_planes {
            let Some(t) = line_plane(&ray, plane) else {
                continue;
            };
            let hit = ray.point_at(t).round(self.tolerance_digits);
            if hit.distance(node.point) < FALLBACK_HIT_TOLERANCE {
                continue;
            }
            found.push(hit);
        }

        // Several goal planes can limit the run; the nearest valid hit is
        // the one the run meets first.
        found
            .into_iter()
            .min_by(|a, b| {
                node.point
                    .distance(*a)
                    .partial_cmp(&node.point.distance(*b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
