//! Path nodes and heuristic formulas.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{Basis3, Point3, Vector3};

/// Distance-to-goal estimator used for the H score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeuristicFormula {
    /// Sum of per-axis distances.
    Manhattan,
    /// Maximum of the X and Y axis distances.
    MaxDxDy,
    /// Euclidean distance (scaled value truncated to whole units).
    Euclidean,
    /// Squared XY distance without the square root (truncated).
    EuclideanNoSqrt,
    /// Straight-line distance.
    DiagonalShortCut,
}

impl HeuristicFormula {
    /// Evaluate the heuristic from `point` to `goal`, scaled by `weight`.
    ///
    /// The Euclidean variants truncate the scaled value to whole units;
    /// the cost model only resolves whole step-cost units for them.
    pub fn evaluate(&self, point: Point3, goal: Point3, weight: f64) -> f64 {
        let dx = point.x - goal.x;
        let dy = point.y - goal.y;
        let dz = point.z - goal.z;
        match self {
            HeuristicFormula::Manhattan => weight * (dx.abs() + dy.abs() + dz.abs()),
            HeuristicFormula::MaxDxDy => weight * dx.abs().max(dy.abs()),
            HeuristicFormula::Euclidean => {
                (weight * (dx * dx + dy * dy + dz * dz).sqrt()).trunc()
            }
            HeuristicFormula::EuclideanNoSqrt => (weight * (dx * dx + dy * dy)).trunc(),
            HeuristicFormula::DiagonalShortCut => weight * point.distance(goal),
        }
    }
}

/// A candidate node in the route search.
///
/// Built per candidate step by the node builder; geometry first, then
/// scores. Once accepted into a path a node is never mutated again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    /// Node position.
    pub point: Point3,
    /// Direction used to arrive here.
    pub dir: Vector3,
    /// Step displacement applied to the parent point.
    pub step_vector: Vector3,
    /// Parent node position.
    pub parent: Point3,
    /// Angle node parent: the last point at which direction changed.
    pub anp: Point3,
    /// Accumulated path cost.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// Total score (G + H).
    pub f: f64,
    /// Local frame oriented to the arrival direction.
    pub basis: Basis3,
}

impl PathNode {
    /// The search start node: no step taken yet, zero scores.
    pub fn start(point: Point3, dir: Vector3, basis: Basis3) -> Self {
        Self {
            point,
            dir,
            step_vector: Vector3::ZERO,
            parent: point,
            anp: point,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            basis,
        }
    }
}

/// Heap entry ordering nodes by total score.
///
/// Reverse ordering turns the max-heap into a min-heap, lowest F first.
#[derive(Clone, Copy, Debug)]
pub struct ScoredNode {
    pub node: PathNode,
}

impl PartialEq for ScoredNode {
    fn eq(&self, other: &Self) -> bool {
        self.node.f == other.node.f
    }
}

impl Eq for ScoredNode {}

impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .f
            .partial_cmp(&self.node.f)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BinaryHeap;

    #[test]
    fn test_manhattan() {
        let h = HeuristicFormula::Manhattan.evaluate(
            Point3::new(1.0, 2.0, 3.0),
            Point3::ORIGIN,
            0.5,
        );
        assert_relative_eq!(h, 3.0);
    }

    #[test]
    fn test_max_dx_dy_ignores_z() {
        let h = HeuristicFormula::MaxDxDy.evaluate(
            Point3::new(1.0, 4.0, 100.0),
            Point3::ORIGIN,
            1.0,
        );
        assert_relative_eq!(h, 4.0);
    }

    #[test]
    fn test_euclidean_truncates() {
        let h = HeuristicFormula::Euclidean.evaluate(
            Point3::new(1.0, 1.0, 0.0),
            Point3::ORIGIN,
            1.0,
        );
        assert_relative_eq!(h, 1.0); // sqrt(2) truncated
    }

    #[test]
    fn test_diagonal_shortcut_is_distance() {
        let h = HeuristicFormula::DiagonalShortCut.evaluate(
            Point3::new(3.0, 4.0, 0.0),
            Point3::ORIGIN,
            2.0,
        );
        assert_relative_eq!(h, 10.0);
    }

    #[test]
    fn test_heap_pops_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        for f in [3.0, 1.0, 2.0] {
            let mut node = PathNode::start(Point3::ORIGIN, Vector3::X, Basis3::default());
            node.f = f;
            heap.push(ScoredNode { node });
        }
        assert_relative_eq!(heap.pop().unwrap().node.f, 1.0);
        assert_relative_eq!(heap.pop().unwrap().node.f, 2.0);
        assert_relative_eq!(heap.pop().unwrap().node.f, 3.0);
    }
}
