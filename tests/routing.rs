//! End-to-end routing scenarios.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use marga::core::math::rounded_degrees;
use marga::{
    Aabb, AabbObstacles, PathRouter, Point3, RouterConfig, SearchStatus, Vector3,
};

fn assert_right_angle_turns(points: &[Point3]) {
    for w in points.windows(3) {
        let a = (w[1] - w[0]).unitized().unwrap();
        let b = (w[2] - w[1]).unitized().unwrap();
        assert_eq!(rounded_degrees(a.angle_to(b)), 90, "turn at {:?}", w[1]);
    }
}

#[test]
fn straight_run_connects_directly() {
    let router = PathRouter::new(RouterConfig::default()).unwrap();
    let result = router.route(
        (Point3::new(0.0, 0.0, 0.0), Vector3::X),
        (Point3::new(50.0, 0.0, 0.0), Vector3::X),
    );
    assert_eq!(result.status, SearchStatus::Found);
    assert_eq!(
        result.points,
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(50.0, 0.0, 0.0)]
    );
}

#[test]
fn offset_run_connects_with_one_bend() {
    let router = PathRouter::new(RouterConfig::default()).unwrap();
    let result = router.route(
        (Point3::new(0.0, 0.0, 0.0), Vector3::X),
        (Point3::new(20.0, 8.0, 0.0), Vector3::X),
    );
    assert_eq!(result.status, SearchStatus::Found);
    assert_eq!(result.points.len(), 3);
    assert_eq!(result.points[0], Point3::new(0.0, 0.0, 0.0));
    assert_eq!(result.points[2], Point3::new(20.0, 8.0, 0.0));
    assert_right_angle_turns(&result.points);
}

#[test]
fn non_coplanar_endpoints_need_the_search() {
    let router = PathRouter::new(RouterConfig::default()).unwrap();
    let start = Point3::new(0.0, 0.0, 0.0);
    let end = Point3::new(10.0, 5.0, 5.0);
    let result = router.route((start, Vector3::X), (end, Vector3::X));
    assert_eq!(result.status, SearchStatus::Found);
    assert!(result.points.len() >= 4, "points: {:?}", result.points);
    assert_eq!(result.points[0], start);
    assert_eq!(*result.points.last().unwrap(), end);
    assert_right_angle_turns(&result.points);
}

#[test]
fn route_detours_around_an_obstacle() {
    let start = Point3::new(0.0, 0.0, 0.0);
    let end = Point3::new(20.0, 0.0, 0.0);
    let obstacles = AabbObstacles::new(
        vec![Aabb::new(
            Point3::new(8.0, -2.0, -2.0),
            Point3::new(12.0, 2.0, 2.0),
        )],
        0.1,
    );
    let router = PathRouter::new(RouterConfig::default())
        .unwrap()
        .with_detector(&obstacles);
    let result = router.route((start, Vector3::X), (end, Vector3::X));
    assert_eq!(result.status, SearchStatus::Found);
    assert_eq!(result.points[0], start);
    assert_eq!(*result.points.last().unwrap(), end);
    assert_right_angle_turns(&result.points);
    // no vertex lies inside the blocked box
    for p in &result.points {
        let inside = p.x > 8.0 && p.x < 12.0 && p.y.abs() < 2.0 && p.z.abs() < 2.0;
        assert!(!inside, "vertex {:?} inside the obstacle", p);
    }
}

#[test]
fn exhausted_deadline_reports_timeout() {
    let config = RouterConfig {
        deadline_ms: 0,
        ..Default::default()
    };
    let router = PathRouter::new(config).unwrap();
    // out of reach of the single-bend fast path, so the sweep must run
    let result = router.route(
        (Point3::new(0.0, 0.0, 0.0), Vector3::X),
        (Point3::new(10.0, 5.0, 5.0), Vector3::X),
    );
    assert_eq!(result.status, SearchStatus::TimedOut);
    assert!(result.points.is_empty());
}

#[test]
fn cancellation_token_stops_the_route() {
    let token = Arc::new(AtomicBool::new(true));
    let router = PathRouter::new(RouterConfig::default())
        .unwrap()
        .with_cancellation(Arc::clone(&token));
    let result = router.route(
        (Point3::new(0.0, 0.0, 0.0), Vector3::X),
        (Point3::new(10.0, 5.0, 5.0), Vector3::X),
    );
    assert_eq!(result.status, SearchStatus::Cancelled);
    assert!(result.points.is_empty());
}

#[test]
fn config_loads_from_toml_file() {
    let contents = r#"
        allowed_angles = [45, 90]
        step_sizes = [2.0, 0.5]
        deadline_ms = 1000

        [trace]
        turn_angle_deg = 45
        min_link_length = 0.5

        [tolerance]
        compound_digits = 2
    "#;
    let path = std::env::temp_dir().join("marga_router_config_test.toml");
    std::fs::write(&path, contents).unwrap();
    let config = RouterConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.allowed_angles, vec![45, 90]);
    assert_eq!(config.step_sizes, vec![2.0, 0.5]);
    assert_eq!(config.deadline_ms, 1000);
    assert_eq!(config.trace.turn_angle_deg, 45);
    assert_eq!(config.tolerance.compound_digits, 2);
    // untouched sections keep their defaults
    assert_eq!(config.tolerance.linear_digits, 5);
    assert_eq!(config.heuristic_weights, vec![100, 50]);
}
