// End-to-end tests for the tour session: click routing, transitions,
// marker regeneration, and the forward walk.

use glam::Vec3;
use instant::Duration;
use tour_core::marker::RING_Y_OFFSET;
use tour_core::picking;
use tour_core::session::MOVE_SPEED;
use tour_core::{TourSession, Viewpoint, ViewpointCatalog};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

fn two_stop_catalog() -> ViewpointCatalog {
    ViewpointCatalog::new(vec![
        Viewpoint {
            name: "A",
            position: Vec3::new(0.0, 10.0, 0.0),
            rotation: Vec3::ZERO,
        },
        Viewpoint {
            name: "B",
            position: Vec3::new(0.0, 10.0, -50.0),
            rotation: Vec3::ZERO,
        },
    ])
}

/// Screen pixel that projects onto a point of the marker ring at
/// `ring_center` (offset into the inner band along +X).
fn pixel_over_ring(session: &TourSession, ring_center: Vec3) -> (f32, f32) {
    let aspect = WIDTH / HEIGHT;
    let point = ring_center + Vec3::new(2.5, 0.0, 0.0);
    let clip = picking::projection(aspect)
        * picking::view_matrix(session.pose())
        * point.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    (
        (ndc.x + 1.0) / 2.0 * WIDTH,
        (1.0 - ndc.y) / 2.0 * HEIGHT,
    )
}

#[test]
fn click_navigates_to_marker_and_back() {
    let mut session = TourSession::new(two_stop_catalog());
    session.regenerate_markers();

    // Camera sits at A, so exactly one marker exists, for B.
    assert_eq!(session.markers().len(), 1);
    assert_eq!(session.markers().markers()[0].target_index, 1);

    let b_ring = Vec3::new(0.0, RING_Y_OFFSET, -50.0);
    let (sx, sy) = pixel_over_ring(&session, b_ring);
    assert_eq!(session.handle_click(sx, sy, WIDTH, HEIGHT), Some(1));
    assert!(session.is_transitioning());

    // Let the 2s transition elapse.
    for _ in 0..25 {
        session.update(Duration::from_millis(100));
    }
    assert!(!session.is_transitioning());
    assert_eq!(session.pose().position, Vec3::new(0.0, 10.0, -50.0));

    // Markers were regenerated for the new viewpoint: only A remains.
    assert_eq!(session.markers().len(), 1);
    assert_eq!(session.markers().markers()[0].target_index, 0);
}

#[test]
fn clicks_are_dropped_while_transitioning() {
    let mut session = TourSession::new(two_stop_catalog());
    session.regenerate_markers();

    let b_ring = Vec3::new(0.0, RING_Y_OFFSET, -50.0);
    let (sx, sy) = pixel_over_ring(&session, b_ring);
    assert_eq!(session.handle_click(sx, sy, WIDTH, HEIGHT), Some(1));

    session.update(Duration::from_millis(300));
    let mid_pose = *session.pose();
    let mid_markers = session.markers().generation();

    // Mid-flight click: no state change, nothing queued.
    assert_eq!(session.handle_click(sx, sy, WIDTH, HEIGHT), None);
    assert_eq!(*session.pose(), mid_pose);
    assert_eq!(session.markers().generation(), mid_markers);
    assert!(session.is_transitioning());
}

#[test]
fn click_on_empty_space_is_a_noop() {
    let mut session = TourSession::new(two_stop_catalog());
    session.regenerate_markers();

    // Top-left corner: the ray goes up and away from the floor rings.
    assert_eq!(session.handle_click(0.0, 0.0, WIDTH, HEIGHT), None);
    assert!(!session.is_transitioning());
}

#[test]
fn markers_do_not_regenerate_mid_flight() {
    let mut session = TourSession::new(two_stop_catalog());
    session.regenerate_markers();
    let gen_before = session.markers().generation();

    let b_ring = Vec3::new(0.0, RING_Y_OFFSET, -50.0);
    let (sx, sy) = pixel_over_ring(&session, b_ring);
    session.handle_click(sx, sy, WIDTH, HEIGHT);

    for _ in 0..5 {
        session.update(Duration::from_millis(100));
        assert_eq!(session.markers().generation(), gen_before);
    }
    for _ in 0..20 {
        session.update(Duration::from_millis(100));
    }
    // Exactly one regeneration, on arrival.
    assert_eq!(session.markers().generation(), gen_before + 1);
}

#[test]
fn forward_walk_translates_each_update() {
    let mut session = TourSession::new(two_stop_catalog());
    let start_z = session.pose().position.z;

    session.set_moving_forward(true);
    session.update(Duration::from_millis(16));
    session.update(Duration::from_millis(16));
    // Unrotated pose walks along -Z, one fixed step per frame.
    assert!((session.pose().position.z - (start_z - 2.0 * MOVE_SPEED)).abs() < 1e-5);

    session.set_moving_forward(false);
    let z = session.pose().position.z;
    session.update(Duration::from_millis(16));
    assert_eq!(session.pose().position.z, z);
}

#[test]
fn forward_walk_applies_even_during_transition() {
    // The walk writer is intentionally uncoordinated with the navigator.
    let mut session = TourSession::new(two_stop_catalog());
    session.regenerate_markers();

    let b_ring = Vec3::new(0.0, RING_Y_OFFSET, -50.0);
    let (sx, sy) = pixel_over_ring(&session, b_ring);
    session.handle_click(sx, sy, WIDTH, HEIGHT);

    let mut without_walk = TourSession::new(two_stop_catalog());
    without_walk.regenerate_markers();
    without_walk.handle_click(sx, sy, WIDTH, HEIGHT);

    session.set_moving_forward(true);
    session.update(Duration::from_millis(100));
    without_walk.update(Duration::from_millis(100));

    let walked = session.pose().position.z;
    let tweened = without_walk.pose().position.z;
    assert!((walked - (tweened - MOVE_SPEED)).abs() < 1e-4);
}

#[test]
fn blink_tick_drives_marker_opacity() {
    let mut session = TourSession::new(two_stop_catalog());
    session.regenerate_markers();
    let before = session.markers().markers()[0].blink.opacity[0];
    session.blink_tick();
    assert_ne!(session.markers().markers()[0].blink.opacity[0], before);
}
