//! Candidate direction fans.
//!
//! A [`DirectionIterator`] produces the finite, restartable sequence of
//! directions a node may leave along: for each candidate plane, the parent
//! direction (projected into the plane) seeds a fan of rotations drawn from
//! the allowed-angle set. Ordering is deterministic: plane order first, then
//! angle order within each plane.

use crate::core::basis::rotate_about;
use crate::core::math::deg_to_rad;
use crate::core::{Plane, Vector3};

/// Restartable cursor over candidate directions in one or more planes.
#[derive(Clone, Debug)]
pub struct DirectionIterator {
    directions: Vec<Vector3>,
    position: Option<usize>,
}

impl DirectionIterator {
    /// Build the fan for `planes` and `angles` with no parent bias.
    ///
    /// Without a parent the plane's X axis seeds each fan. Degenerate input
    /// (no valid planes) yields an empty sequence.
    pub fn new(planes: &[Plane], angles: &[i32]) -> Self {
        Self::with_parent(planes, angles, Vector3::ZERO)
    }

    /// Build the fan for `planes` and `angles`, favoring `parent_dir`.
    ///
    /// The parent direction is projected into each plane and emitted first,
    /// then each allowed angle contributes its +a and −a rotations about the
    /// plane normal (180° once). A zero parent falls back to the plane's X
    /// axis, as does a parent perpendicular to the plane.
    pub fn with_parent(planes: &[Plane], angles: &[i32], parent_dir: Vector3) -> Self {
        let mut fan_angles: Vec<i32> = angles
            .iter()
            .copied()
            .filter(|&a| (1..=180).contains(&a))
            .collect();
        fan_angles.sort_unstable();
        fan_angles.dedup();

        let mut directions = Vec::new();
        for plane in planes {
            let seed = project_seed(plane, parent_dir);
            directions.push(seed);
            for &angle in &fan_angles {
                let rad = deg_to_rad(f64::from(angle));
                directions.push(rotate_about(seed, plane.normal, rad));
                if angle != 180 {
                    directions.push(rotate_about(seed, plane.normal, -rad));
                }
            }
        }

        Self {
            directions,
            position: None,
        }
    }

    /// Move to the next candidate; false when the sequence is exhausted.
    pub fn advance(&mut self) -> bool {
        let next = match self.position {
            None => 0,
            Some(i) => i + 1,
        };
        if next < self.directions.len() {
            self.position = Some(next);
            true
        } else {
            self.position = Some(self.directions.len());
            false
        }
    }

    /// The candidate the cursor rests on, if any.
    pub fn current(&self) -> Option<Vector3> {
        self.position
            .and_then(|i| self.directions.get(i))
            .copied()
    }

    /// Rewind to before the first candidate.
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Number of candidates in the sequence.
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// True when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// Project the parent direction into the plane, falling back to the plane's
/// X axis when absent or perpendicular.
fn project_seed(plane: &Plane, parent_dir: Vector3) -> Vector3 {
    if parent_dir.is_zero() {
        return plane.x_axis;
    }
    let in_plane = parent_dir - plane.normal * parent_dir.dot(plane.normal);
    in_plane.unitized().unwrap_or(plane.x_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point3;
    use approx::assert_relative_eq;

    fn xy_plane() -> Plane {
        Plane::from_directions(Point3::ORIGIN, Vector3::X, Vector3::Y).unwrap()
    }

    fn collect(iter: &mut DirectionIterator) -> Vec<Vector3> {
        let mut out = Vec::new();
        while iter.advance() {
            out.push(iter.current().unwrap());
        }
        out
    }

    #[test]
    fn test_empty_planes_empty_sequence() {
        let mut iter = DirectionIterator::new(&[], &[90]);
        assert!(iter.is_empty());
        assert!(!iter.advance());
        assert!(iter.current().is_none());
    }

    #[test]
    fn test_parent_emitted_first() {
        let mut iter = DirectionIterator::with_parent(&[xy_plane()], &[90], Vector3::X);
        assert!(iter.advance());
        assert_eq!(iter.current().unwrap(), Vector3::X);
    }

    #[test]
    fn test_fan_covers_both_rotations() {
        let mut iter = DirectionIterator::with_parent(&[xy_plane()], &[90], Vector3::X);
        let dirs = collect(&mut iter);
        assert_eq!(dirs.len(), 3);
        let has = |v: Vector3| {
            dirs.iter()
                .any(|d| d.round(6) == v.round(6))
        };
        assert!(has(Vector3::X));
        assert!(has(Vector3::Y));
        assert!(has(-Vector3::Y));
    }

    #[test]
    fn test_half_turn_emitted_once() {
        let mut iter = DirectionIterator::with_parent(&[xy_plane()], &[180], Vector3::X);
        let dirs = collect(&mut iter);
        assert_eq!(dirs.len(), 2);
        assert_relative_eq!(dirs[1].dot(Vector3::X), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_angle_covered_by_seed() {
        let mut iter = DirectionIterator::with_parent(&[xy_plane()], &[0, 90], Vector3::X);
        assert_eq!(collect(&mut iter).len(), 3);
    }

    #[test]
    fn test_reset_restarts_identical_sequence() {
        let mut iter = DirectionIterator::with_parent(&[xy_plane()], &[45, 90], Vector3::X);
        let first = collect(&mut iter);
        iter.reset();
        let second = collect(&mut iter);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_plane_order_precedes_angle_order() {
        let xz = Plane::from_directions(Point3::ORIGIN, Vector3::X, Vector3::Z).unwrap();
        let mut iter =
            DirectionIterator::with_parent(&[xy_plane(), xz], &[90], Vector3::X);
        let dirs = collect(&mut iter);
        assert_eq!(dirs.len(), 6);
        // first fan stays in the XY plane
        for d in &dirs[..3] {
            assert_relative_eq!(d.z, 0.0, epsilon = 1e-12);
        }
        // second fan stays in the XZ plane
        for d in &dirs[3..] {
            assert_relative_eq!(d.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_perpendicular_parent_falls_back_to_plane_axis() {
        let mut iter = DirectionIterator::with_parent(&[xy_plane()], &[90], Vector3::Z);
        assert!(iter.advance());
        assert_eq!(iter.current().unwrap(), Vector3::X);
    }
}
