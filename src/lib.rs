//! Obstacle-aware routing of angle-constrained 3D runs.
//!
//! Finds polyline routes between directed endpoints where every bend must
//! match an allowed fitting angle and every straight leg must clear a
//! minimum length. A route request runs through a pipeline: a single-bend
//! fast path, a parameter-swept best-first search over adaptive steps, a
//! four-node-window bend minimizer and a straight-run refiner.
//!
//! ```no_run
//! use marga::{PathRouter, Point3, RouterConfig, Vector3};
//!
//! # fn main() -> marga::Result<()> {
//! let router = PathRouter::new(RouterConfig::default())?;
//! let result = router.route(
//!     (Point3::new(0.0, 0.0, 0.0), Vector3::X),
//!     (Point3::new(120.0, 35.0, 0.0), Vector3::X),
//! );
//! for point in &result.points {
//!     println!("{:?}", point);
//! }
//! # Ok(())
//! # }
//! ```

pub mod collisions;
pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod router;
pub mod routing;
pub mod visualize;

pub use collisions::{Aabb, AabbObstacles, Collision, CollisionDetector};
pub use config::{RouterConfig, ToleranceConfig, TraceSettings};
pub use crate::core::{Basis3, Line, Plane, Point3, Vector3};
pub use error::{Result, RouteError};
pub use graph::SimpleGraph;
pub use router::{PathRouter, RouteResult};
pub use routing::{HeuristicFormula, SearchStatus};
pub use visualize::{NoopVisualizer, PointVisualizer, TracingVisualizer};
