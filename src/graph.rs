//! Ordered point sequences with derived links.

use serde::{Deserialize, Serialize};

use crate::core::{Line, Plane, Point3};

/// An ordered sequence of path points.
///
/// Links are derived from consecutive pairs, never stored:
/// `links().len() == nodes.len().saturating_sub(1)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleGraph {
    pub nodes: Vec<Point3>,
}

impl SimpleGraph {
    /// Create a graph over `nodes`.
    pub fn new(nodes: Vec<Point3>) -> Self {
        Self { nodes }
    }

    /// Consecutive-pair segments.
    pub fn links(&self) -> Vec<Line> {
        self.nodes
            .windows(2)
            .map(|pair| Line::new(pair[0], pair[1]))
            .collect()
    }

    /// Distinct supporting planes of the node set.
    ///
    /// The first two nodes define the primary axis. Every further node spans
    /// a candidate plane with that axis; a candidate is recorded when its
    /// spanning direction is not parallel (within `angle_tolerance` radians)
    /// to the primary axis and its normal is not parallel to an
    /// already-recorded normal. Fewer than 3 nodes, or all nodes collinear,
    /// yield no distinguishing plane.
    pub fn planes(&self, angle_tolerance: f64) -> Vec<Plane> {
        let mut planes: Vec<Plane> = Vec::new();
        if self.nodes.len() < 3 {
            return planes;
        }

        let origin = self.nodes[0];
        let x_direction = self.nodes[1] - origin;

        for &node in &self.nodes[1..] {
            let y_direction = node - origin;
            if x_direction.is_parallel_to(y_direction, angle_tolerance) {
                continue;
            }
            let Some(plane) = Plane::from_directions(origin, x_direction, y_direction) else {
                continue;
            };
            if planes
                .iter()
                .all(|p| !p.normal.is_parallel_to(plane.normal, angle_tolerance))
            {
                planes.push(plane);
            }
        }

        planes
    }

    /// True when every node lies in one plane (or no plane distinguishes
    /// them at all: collinear or fewer than 3 nodes).
    pub fn is_plane(&self, angle_tolerance: f64) -> bool {
        self.planes(angle_tolerance).len() <= 1
    }
}
