//! Point-visualizer capability for debugging candidate geometry.
//!
//! Must never affect control flow; everything here is fire-and-forget.

use crate::core::Point3;

/// Capability to display a point in a host viewport.
pub trait PointVisualizer {
    fn show(&self, point: Point3);
}

/// Discards every point.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopVisualizer;

impl PointVisualizer for NoopVisualizer {
    fn show(&self, _point: Point3) {}
}

/// Emits each point as a `tracing` debug event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingVisualizer;

impl PointVisualizer for TracingVisualizer {
    fn show(&self, point: Point3) {
        tracing::debug!(x = point.x, y = point.y, z = point.z, "candidate point");
    }
}
