//! Geometry foundation: points, vectors, lines, planes, bases and the
//! tolerance-aware numeric helpers everything above them depends on.

pub mod basis;
pub mod intersect;
pub mod line;
pub mod math;
pub mod plane;
pub mod point;

pub use basis::Basis3;
pub use line::Line;
pub use plane::Plane;
pub use point::{Point3, Vector3};
