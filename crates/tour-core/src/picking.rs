//! Ray picking: screen coordinates to a world-space ray through the camera
//! frustum, and intersection of that ray against marker ring annuli.

use glam::{Mat4, Vec2, Vec3, Vec4};
use smallvec::SmallVec;

use crate::catalog::CameraPose;
use crate::marker::{MarkerSet, INNER_RING, OUTER_RING};

/// Vertical field of view of the tour camera, degrees.
pub const CAMERA_FOV_DEGREES: f32 = 100.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

/// A ray hit resolved to its owning marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerHit {
    /// Index into the current marker set (not the catalog).
    pub marker_index: usize,
    /// Which ring primitive was hit: 0 = inner, 1 = outer.
    pub ring: usize,
    /// Distance along the ray.
    pub distance: f32,
}

/// Convert canvas pixel coordinates to normalized device coordinates.
#[inline]
pub fn screen_to_ndc(sx: f32, sy: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (2.0 * sx / width) - 1.0,
        1.0 - (2.0 * sy / height),
    )
}

/// World-space projection matrix for the tour camera at `aspect`.
pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        CAMERA_FOV_DEGREES.to_radians(),
        aspect,
        CAMERA_ZNEAR,
        CAMERA_ZFAR,
    )
}

/// View matrix for a camera pose.
pub fn view_matrix(pose: &CameraPose) -> Mat4 {
    Mat4::from_rotation_translation(pose.orientation(), pose.position).inverse()
}

/// Compute a world-space ray from the camera through an NDC point.
///
/// Returns `(ray_origin, ray_direction)`.
pub fn camera_ray(pose: &CameraPose, ndc: Vec2, aspect: f32) -> (Vec3, Vec3) {
    let inv = (projection(aspect) * view_matrix(pose)).inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let p_far: Vec3 = p_far.truncate() / p_far.w;
    let ro = pose.position;
    let rd = (p_far - ro).normalize();
    (ro, rd)
}

/// Intersect a ray with a flat annulus lying in the XZ plane at
/// `center.y`, radial band `[inner, outer]`. Both faces hit (the rings are
/// double-sided). Returns the distance along the ray.
#[inline]
pub fn ray_annulus(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    inner: f32,
    outer: f32,
) -> Option<f32> {
    if ray_dir.y.abs() < 1e-6 {
        return None;
    }
    let t = (center.y - ray_origin.y) / ray_dir.y;
    if t < 0.0 {
        return None;
    }
    let p = ray_origin + ray_dir * t;
    let dx = p.x - center.x;
    let dz = p.z - center.z;
    let r = (dx * dx + dz * dz).sqrt();
    (r >= inner && r <= outer).then_some(t)
}

/// Intersect a ray against every ring primitive of every current marker and
/// resolve the nearest hit to its owning marker. `None` when nothing is
/// hit.
pub fn pick(markers: &MarkerSet, ray_origin: Vec3, ray_dir: Vec3) -> Option<MarkerHit> {
    let mut hits: SmallVec<[MarkerHit; 4]> = SmallVec::new();
    for (marker_index, m) in markers.markers().iter().enumerate() {
        for (ring, (inner, outer)) in [INNER_RING, OUTER_RING].into_iter().enumerate() {
            if let Some(distance) = ray_annulus(ray_origin, ray_dir, m.position, inner, outer) {
                hits.push(MarkerHit {
                    marker_index,
                    ring,
                    distance,
                });
            }
        }
    }
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
