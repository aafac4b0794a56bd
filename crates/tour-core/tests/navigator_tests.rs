// Tests for the navigator state machine and its tweened transitions.

use glam::Vec3;
use instant::Duration;
use tour_core::{Navigator, ViewpointCatalog, TRANSITION_DURATION_SECS};

fn catalog() -> ViewpointCatalog {
    ViewpointCatalog::museum()
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn go_to_enters_transitioning_and_completes_exactly_once() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let mut nav = Navigator::new();

    assert!(nav.go_to(&catalog, 1, &pose));
    assert!(nav.is_transitioning());

    let mut arrivals = Vec::new();
    // 25 x 100ms = 2.5s, past the 2s duration.
    for _ in 0..25 {
        if let Some(i) = nav.update(millis(100), &mut pose) {
            arrivals.push(i);
        }
    }
    assert_eq!(arrivals, vec![1]);
    assert!(!nav.is_transitioning());

    let target = catalog.get(1).unwrap();
    assert_eq!(pose.position, target.position);
    assert_eq!(pose.rotation, target.rotation);
}

#[test]
fn completion_happens_at_fixed_duration() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let mut nav = Navigator::new();
    assert!(nav.go_to(&catalog, 2, &pose));

    let steps = (TRANSITION_DURATION_SECS / 0.5) as usize;
    for step in 1..=steps {
        let arrived = nav.update(millis(500), &mut pose);
        if step < steps {
            assert!(arrived.is_none(), "arrived early at step {}", step);
            assert!(nav.is_transitioning());
        } else {
            assert_eq!(arrived, Some(2));
        }
    }
}

#[test]
fn go_to_while_transitioning_is_a_noop() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let mut nav = Navigator::new();

    assert!(nav.go_to(&catalog, 1, &pose));
    nav.update(millis(500), &mut pose);
    let mid_pose = pose;

    // Second request is dropped, not queued.
    assert!(!nav.go_to(&catalog, 3, &pose));
    assert_eq!(pose, mid_pose);
    assert!(nav.is_transitioning());

    for _ in 0..20 {
        nav.update(millis(100), &mut pose);
    }
    // The original target wins.
    assert_eq!(pose.position, catalog.get(1).unwrap().position);
}

#[test]
fn go_to_out_of_range_is_a_noop() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let start = pose;
    let mut nav = Navigator::new();

    assert!(!nav.go_to(&catalog, catalog.len(), &pose));
    assert!(!nav.is_transitioning());
    assert_eq!(pose, start);
    assert!(nav.update(millis(100), &mut pose).is_none());
    assert_eq!(pose, start);
}

#[test]
fn update_while_idle_does_nothing() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let start = pose;
    let mut nav = Navigator::new();
    for _ in 0..10 {
        assert!(nav.update(millis(100), &mut pose).is_none());
    }
    assert_eq!(pose, start);
}

#[test]
fn never_reenters_transitioning_after_arrival() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let mut nav = Navigator::new();
    assert!(nav.go_to(&catalog, 1, &pose));
    for _ in 0..30 {
        nav.update(millis(100), &mut pose);
        if !nav.is_transitioning() {
            break;
        }
    }
    for _ in 0..10 {
        assert!(nav.update(millis(100), &mut pose).is_none());
        assert!(!nav.is_transitioning());
    }
}

#[test]
fn position_progresses_monotonically_toward_target() {
    // A straight-line transition on one axis eases monotonically.
    let catalog = ViewpointCatalog::new(vec![
        tour_core::Viewpoint {
            name: "A",
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        },
        tour_core::Viewpoint {
            name: "B",
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
        },
    ]);
    let mut pose = catalog.initial_pose();
    let mut nav = Navigator::new();
    assert!(nav.go_to(&catalog, 1, &pose));

    let mut last_x = pose.position.x;
    for _ in 0..20 {
        nav.update(millis(100), &mut pose);
        assert!(pose.position.x >= last_x);
        assert!(pose.position.x <= 10.0);
        last_x = pose.position.x;
    }
    assert_eq!(pose.position.x, 10.0);
}

#[test]
fn transition_can_restart_after_arrival() {
    let catalog = catalog();
    let mut pose = catalog.initial_pose();
    let mut nav = Navigator::new();

    assert!(nav.go_to(&catalog, 1, &pose));
    for _ in 0..25 {
        nav.update(millis(100), &mut pose);
    }
    assert!(!nav.is_transitioning());

    assert!(nav.go_to(&catalog, 2, &pose));
    assert!(nav.is_transitioning());
    for _ in 0..25 {
        nav.update(millis(100), &mut pose);
    }
    assert_eq!(pose.position, catalog.get(2).unwrap().position);
}
