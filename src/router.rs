//! End-to-end route construction.
//!
//! Wires the pipeline together: a single-bend fast path, the parameter-swept
//! best-first search, the window minimizer and the straight-run refiner.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::collisions::CollisionDetector;
use crate::config::RouterConfig;
use crate::core::{Basis3, Point3, Vector3};
use crate::error::Result;
use crate::routing::astar::AStarRouter;
use crate::routing::builder::NodeBuilder;
use crate::routing::minimizer::NodeMinimizer;
use crate::routing::refine::PathRefiner;
use crate::routing::single_bend::SingleBendFinder;
use crate::routing::sweep::{PathFindEnumerator, SearchStatus};
use crate::visualize::PointVisualizer;

/// Outcome of a route request.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
    /// Bend and end vertices of the found route; empty unless `status`
    /// is [`SearchStatus::Found`].
    pub points: Vec<Point3>,
    /// How the search ended.
    pub status: SearchStatus,
}

/// Routes between directed endpoints under one configuration.
pub struct PathRouter<'a> {
    config: RouterConfig,
    detector: Option<&'a dyn CollisionDetector>,
    visualizer: Option<&'a dyn PointVisualizer>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> PathRouter<'a> {
    /// Create a router after validating `config`.
    pub fn new(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            detector: None,
            visualizer: None,
            cancel: None,
        })
    }

    /// Attach an obstacle detector consulted by every pipeline stage.
    pub fn with_detector(mut self, detector: &'a dyn CollisionDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Attach a debug point visualizer.
    pub fn with_visualizer(mut self, visualizer: &'a dyn PointVisualizer) -> Self {
        self.visualizer = Some(visualizer);
        self
    }

    /// Attach an external cancellation token.
    pub fn with_cancellation(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Route from `start` to `end`, each a position with its required
    /// run direction.
    pub fn route(&self, start: (Point3, Vector3), end: (Point3, Vector3)) -> RouteResult {
        tracing::info!(?start, ?end, "routing");
        let config = &self.config;

        // a direct or single-bend connection skips the sweep entirely
        let mut bend_finder = SingleBendFinder::new(config.tolerance);
        if let Some(detector) = self.detector {
            bend_finder = bend_finder.with_detector(detector, start.0, end.0);
        }
        if let Some(points) = bend_finder.find_path(
            start,
            end,
            config.allowed_angles.clone(),
            config.trace.min_link_length,
        ) {
            tracing::info!(points = points.len(), "connected without a search");
            return RouteResult {
                points,
                status: SearchStatus::Found,
            };
        }

        let end_basis = Basis3::world(end.0).rotated_to(end.1);
        let mut builder = NodeBuilder::new(
            config.heuristic_formula,
            start.0,
            end.0,
            config.step_sizes[0],
            [end_basis.x, end_basis.y, end_basis.z],
            config.trace,
            config.punish_change_direction,
        )
        .with_bend_solver(&bend_finder);
        if let Some(visualizer) = self.visualizer {
            builder = builder.with_visualizer(visualizer);
        }
        builder.set_end_direction(end.1);

        let mut search = AStarRouter::new(
            builder,
            start,
            end,
            config.allowed_angles.clone(),
            config.tolerance,
            config.max_iterations,
        );
        if let Some(detector) = self.detector {
            search = search.with_detector(detector);
        }

        let mut sweep = PathFindEnumerator::new(
            search,
            config.step_sizes.clone(),
            config.sweep_tolerances.clone(),
            config.heuristic_weights.clone(),
        )
        .with_deadline(Duration::from_millis(config.deadline_ms));
        if let Some(token) = &self.cancel {
            sweep = sweep.with_cancellation(Arc::clone(token));
        }

        let (path, status) = sweep.run();
        if status != SearchStatus::Found {
            return RouteResult {
                points: Vec::new(),
                status,
            };
        }

        let mut minimizer = NodeMinimizer::new(
            config.allowed_angles.clone(),
            config.tolerance,
            config.trace.min_link_length,
        );
        if let Some(max) = config.max_link_length {
            minimizer = minimizer.with_max_link_length(max);
        }
        if let Some(detector) = self.detector {
            minimizer = minimizer.with_detector(detector);
        }
        let minimized = minimizer.minimize(path);

        let points = PathRefiner::new(config.tolerance.linear_digits).refine_points(&minimized);
        RouteResult {
            points,
            status: SearchStatus::Found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let config = RouterConfig {
            allowed_angles: vec![],
            ..Default::default()
        };
        assert!(PathRouter::new(config).is_err());
    }

    #[test]
    fn test_straight_route_found_without_search() {
        let router = PathRouter::new(RouterConfig::default()).unwrap();
        let result = router.route(
            (Point3::ORIGIN, Vector3::X),
            (Point3::new(10.0, 0.0, 0.0), Vector3::X),
        );
        assert_eq!(result.status, SearchStatus::Found);
        assert_eq!(
            result.points,
            vec![Point3::ORIGIN, Point3::new(10.0, 0.0, 0.0)]
        );
    }
}
