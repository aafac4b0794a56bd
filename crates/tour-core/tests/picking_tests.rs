// Tests for ray construction and ray-vs-marker-ring intersection.

use glam::{Vec2, Vec3};
use tour_core::marker::RING_Y_OFFSET;
use tour_core::picking::{camera_ray, pick, ray_annulus, screen_to_ndc};
use tour_core::{CameraPose, MarkerSet, Viewpoint, ViewpointCatalog};

fn vp(name: &'static str, position: Vec3) -> Viewpoint {
    Viewpoint {
        name,
        position,
        rotation: Vec3::ZERO,
    }
}

/// Marker set built for a catalog with the camera far away, so every
/// viewpoint gets a marker.
fn markers_for(viewpoints: Vec<Viewpoint>) -> MarkerSet {
    let catalog = ViewpointCatalog::new(viewpoints);
    let pose = CameraPose {
        position: Vec3::new(9999.0, 9999.0, 9999.0),
        rotation: Vec3::ZERO,
    };
    let mut markers = MarkerSet::new();
    markers.regenerate(&catalog, &pose);
    markers
}

#[test]
fn screen_to_ndc_maps_center_and_corners() {
    let ndc = screen_to_ndc(400.0, 300.0, 800.0, 600.0);
    assert!((ndc - Vec2::ZERO).length() < 1e-6);

    let tl = screen_to_ndc(0.0, 0.0, 800.0, 600.0);
    assert!((tl - Vec2::new(-1.0, 1.0)).length() < 1e-6);

    let br = screen_to_ndc(800.0, 600.0, 800.0, 600.0);
    assert!((br - Vec2::new(1.0, -1.0)).length() < 1e-6);
}

#[test]
fn center_ray_points_along_camera_forward() {
    let pose = CameraPose {
        position: Vec3::new(0.0, 5.0, 0.0),
        rotation: Vec3::ZERO,
    };
    let (ro, rd) = camera_ray(&pose, Vec2::ZERO, 16.0 / 9.0);
    assert_eq!(ro, pose.position);
    assert!((rd - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn ray_annulus_hits_within_band() {
    let center = Vec3::new(0.0, 0.5, 0.0);
    let down = Vec3::NEG_Y;

    // Inside the band.
    let t = ray_annulus(Vec3::new(2.5, 10.0, 0.0), down, center, 2.0, 3.0);
    assert!(t.is_some());
    assert!((t.unwrap() - 9.5).abs() < 1e-5);

    // Gap between the rings.
    assert!(ray_annulus(Vec3::new(3.5, 10.0, 0.0), down, center, 2.0, 3.0).is_none());
    // Center hole.
    assert!(ray_annulus(Vec3::new(0.0, 10.0, 0.0), down, center, 2.0, 3.0).is_none());
}

#[test]
fn ray_annulus_requires_forward_hit() {
    let center = Vec3::new(0.0, 0.5, 0.0);
    // Plane is behind the ray origin.
    assert!(ray_annulus(Vec3::new(2.5, 10.0, 0.0), Vec3::Y, center, 2.0, 3.0).is_none());
    // Ray parallel to the plane never hits.
    assert!(ray_annulus(Vec3::new(2.5, 10.0, 0.0), Vec3::X, center, 2.0, 3.0).is_none());
}

#[test]
fn ray_annulus_hits_from_below() {
    // Rings are double-sided.
    let center = Vec3::new(0.0, 0.5, 0.0);
    let t = ray_annulus(Vec3::new(2.5, -5.0, 0.0), Vec3::Y, center, 2.0, 3.0);
    assert!(t.is_some());
    assert!((t.unwrap() - 5.5).abs() < 1e-5);
}

#[test]
fn pick_resolves_hit_to_owning_marker_and_ring() {
    let markers = markers_for(vec![
        vp("A", Vec3::new(0.0, 30.0, 0.0)),
        vp("B", Vec3::new(100.0, 30.0, 0.0)),
    ]);

    // Straight down onto B's outer ring.
    let hit = pick(&markers, Vec3::new(104.5, 10.0, 0.0), Vec3::NEG_Y).expect("hit");
    assert_eq!(markers.markers()[hit.marker_index].target_index, 1);
    assert_eq!(hit.ring, 1);
    assert!((hit.distance - (10.0 - RING_Y_OFFSET)).abs() < 1e-5);

    // Straight down onto A's inner ring.
    let hit = pick(&markers, Vec3::new(2.5, 10.0, 0.0), Vec3::NEG_Y).expect("hit");
    assert_eq!(markers.markers()[hit.marker_index].target_index, 0);
    assert_eq!(hit.ring, 0);
}

#[test]
fn pick_misses_outside_all_rings() {
    let markers = markers_for(vec![vp("A", Vec3::new(0.0, 30.0, 0.0))]);
    assert!(pick(&markers, Vec3::new(50.0, 10.0, 0.0), Vec3::NEG_Y).is_none());
    assert!(pick(&markers, Vec3::new(2.5, 10.0, 0.0), Vec3::Z).is_none());
}

#[test]
fn pick_empty_marker_set_is_none() {
    let markers = MarkerSet::new();
    assert!(pick(&markers, Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y).is_none());
}

#[test]
fn projected_ring_point_round_trips_through_a_click_ray() {
    // Project a known ring point to the screen, then cast a ray back
    // through that pixel and verify it lands on the ring.
    let pose = CameraPose {
        position: Vec3::new(0.0, 10.0, 0.0),
        rotation: Vec3::ZERO,
    };
    let (width, height) = (1280.0_f32, 720.0_f32);
    let aspect = width / height;
    let ring_point = Vec3::new(2.5, RING_Y_OFFSET, -50.0);

    let clip = tour_core::picking::projection(aspect)
        * tour_core::picking::view_matrix(&pose)
        * ring_point.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    let sx = (ndc.x + 1.0) / 2.0 * width;
    let sy = (1.0 - ndc.y) / 2.0 * height;

    let (ro, rd) = camera_ray(&pose, screen_to_ndc(sx, sy, width, height), aspect);
    let t = ray_annulus(ro, rd, Vec3::new(0.0, RING_Y_OFFSET, -50.0), 2.0, 3.0);
    assert!(t.is_some());
    let hit_point = ro + rd * t.unwrap();
    assert!((hit_point - ring_point).length() < 1e-2);
}
