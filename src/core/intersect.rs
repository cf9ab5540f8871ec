//! Line/line and line/plane intersection with numeric tolerance.

use super::line::Line;
use super::plane::Plane;

/// Relative epsilon for parallelism rejection in the closest-point solve.
const PARALLEL_EPS: f64 = 1e-12;

/// Closest-approach intersection of two lines.
///
/// Returns the parameters `(ta, tb)` of the mutually closest points in each
/// line's [0, 1] parametrization, or `None` when the lines are parallel,
/// when the closest points are farther apart than `tolerance`, or (with
/// `finite_segments`) when either parameter falls outside its segment.
pub fn line_line(a: &Line, b: &Line, tolerance: f64, finite_segments: bool) -> Option<(f64, f64)> {
    let da = a.direction();
    let db = b.direction();
    let w = a.from - b.from;

    let aa = da.dot(da);
    let ab = da.dot(db);
    let bb = db.dot(db);
    let aw = da.dot(w);
    let bw = db.dot(w);

    let denom = aa * bb - ab * ab;
    if denom.abs() <= PARALLEL_EPS * aa * bb {
        return None;
    }

    let ta = (ab * bw - bb * aw) / denom;
    let tb = (aa * bw - ab * aw) / denom;

    if finite_segments && !((0.0..=1.0).contains(&ta) && (0.0..=1.0).contains(&tb)) {
        return None;
    }

    let gap = a.point_at(ta).distance(b.point_at(tb));
    if gap > tolerance {
        return None;
    }

    Some((ta, tb))
}

/// Intersection of a line with a plane.
///
/// Returns the line parameter of the hit (extrapolating beyond [0, 1]), or
/// `None` when the line runs parallel to the plane.
pub fn line_plane(line: &Line, plane: &Plane) -> Option<f64> {
    let dir = line.direction();
    let denom = dir.dot(plane.normal);
    if denom.abs() <= PARALLEL_EPS * dir.length().max(1.0) {
        return None;
    }
    Some(-plane.signed_distance(line.from) / denom)
}
