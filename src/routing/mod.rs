//! Route search pipeline.
//!
//! The stages, in pipeline order: candidate direction fans
//! ([`directions`]), per-step node construction ([`builder`]), the
//! best-first search itself ([`astar`]), the parameter sweep driving it
//! ([`sweep`]), the single-bend connector ([`single_bend`] over
//! [`intersection`]), bend-count reduction ([`minimizer`]) and straight-run
//! compaction ([`refine`]).

pub mod astar;
pub mod builder;
pub mod directions;
pub mod intersection;
pub mod minimizer;
pub mod node;
pub mod refine;
pub mod single_bend;
pub mod sweep;

pub use astar::AStarRouter;
pub use builder::{BendSolver, NodeBuilder};
pub use directions::DirectionIterator;
pub use intersection::LineIntersectionSolver;
pub use minimizer::NodeMinimizer;
pub use node::{HeuristicFormula, PathNode, ScoredNode};
pub use refine::PathRefiner;
pub use single_bend::SingleBendFinder;
pub use sweep::{PathFindEnumerator, SearchStatus, SweepCursor, SweepSearch};
