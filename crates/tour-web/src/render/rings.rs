//! Ring geometry for hotspot markers: one shared unit annulus mesh,
//! instanced per ring with world center, radial band, color, and blink
//! opacity.

use std::f32::consts::TAU;

use tour_core::marker::{MarkerSet, INNER_RING, OUTER_RING, RING_SEGMENTS};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RingVertex {
    /// Unit direction in the XZ plane.
    pub dir: [f32; 2],
    /// 0 at the inner edge, 1 at the outer edge.
    pub edge: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RingInstance {
    pub center: [f32; 3],
    /// (inner radius, outer radius).
    pub radii: [f32; 2],
    pub color: [f32; 3],
    pub opacity: f32,
}

/// Tessellate a unit annulus as a triangle list; radii come from the
/// instance, so one mesh serves both ring bands.
pub(crate) fn unit_annulus_mesh() -> Vec<RingVertex> {
    let mut verts = Vec::with_capacity(RING_SEGMENTS as usize * 6);
    for seg in 0..RING_SEGMENTS {
        let a0 = seg as f32 / RING_SEGMENTS as f32 * TAU;
        let a1 = (seg + 1) as f32 / RING_SEGMENTS as f32 * TAU;
        let d0 = [a0.cos(), a0.sin()];
        let d1 = [a1.cos(), a1.sin()];
        verts.push(RingVertex { dir: d0, edge: 0.0 });
        verts.push(RingVertex { dir: d1, edge: 0.0 });
        verts.push(RingVertex { dir: d1, edge: 1.0 });
        verts.push(RingVertex { dir: d0, edge: 0.0 });
        verts.push(RingVertex { dir: d1, edge: 1.0 });
        verts.push(RingVertex { dir: d0, edge: 1.0 });
    }
    verts
}

/// Build one instance per ring of every marker, inner ring first.
pub(crate) fn ring_instances(
    markers: &MarkerSet,
    ring_colors: [[f32; 3]; 2],
) -> Vec<RingInstance> {
    let mut out = Vec::with_capacity(markers.len() * 2);
    for m in markers.markers() {
        for (ring, (inner, outer)) in [INNER_RING, OUTER_RING].into_iter().enumerate() {
            out.push(RingInstance {
                center: m.position.to_array(),
                radii: [inner, outer],
                color: ring_colors[ring],
                opacity: m.blink.opacity[ring],
            });
        }
    }
    out
}
