//! Hotspot markers: one clickable floor ring per viewpoint other than the
//! one the camera currently occupies.
//!
//! A marker is a composite of two concentric flat rings lying in the XZ
//! plane slightly above the floor. Both rings blink by oscillating their
//! opacity between fixed bounds, sharing one direction per marker. The set
//! is discarded and rebuilt wholesale on every regeneration; there is no
//! incremental diffing.

use glam::Vec3;

use crate::catalog::{CameraPose, ViewpointCatalog};

/// Vertical offset of a marker above the floor plane.
pub const RING_Y_OFFSET: f32 = 0.5;
/// Inner ring radial band (inner radius, outer radius).
pub const INNER_RING: (f32, f32) = (2.0, 3.0);
/// Outer ring radial band.
pub const OUTER_RING: (f32, f32) = (4.0, 5.0);
/// Segment count used when tessellating a ring for rendering.
pub const RING_SEGMENTS: u32 = 32;

/// Blink cadence; the frontend drives [`MarkerSet::blink_tick`] on this
/// period.
pub const BLINK_PERIOD_MS: u32 = 100;
/// Opacity change per tick.
pub const BLINK_STEP: f32 = 0.05;
/// Blink opacity bounds; opacity never leaves this range.
pub const BLINK_MIN: f32 = 0.1;
pub const BLINK_MAX: f32 = 0.8;

/// Greyscale colors of the (inner, outer) rings.
pub const RING_COLORS: [[f32; 3]; 2] = [
    [0.266, 0.266, 0.266], // inner, 0x444444
    [0.133, 0.133, 0.133], // outer, 0x222222
];

/// Opacity oscillation state for one marker's two rings.
///
/// Each ring carries its own opacity channel but both advance with the one
/// shared direction, so they stay in phase.
#[derive(Clone, Copy, Debug)]
pub struct RingBlink {
    /// Opacity per ring: `[inner, outer]`.
    pub opacity: [f32; 2],
    direction: f32,
}

impl RingBlink {
    pub fn new() -> Self {
        Self {
            opacity: [BLINK_MAX, BLINK_MAX],
            direction: -BLINK_STEP,
        }
    }

    /// Advance one blink step. Opacity is clamped to the bounds and the
    /// direction reverses exactly when a ring lands on a bound.
    pub fn tick(&mut self) {
        for o in &mut self.opacity {
            *o = (*o + self.direction).clamp(BLINK_MIN, BLINK_MAX);
        }
        if self
            .opacity
            .iter()
            .any(|o| *o <= BLINK_MIN || *o >= BLINK_MAX)
        {
            self.direction = -self.direction;
        }
    }
}

impl Default for RingBlink {
    fn default() -> Self {
        Self::new()
    }
}

/// Clickable visual proxy for one viewpoint.
#[derive(Clone, Debug)]
pub struct Marker {
    /// Index into the viewpoint catalog this marker navigates to.
    pub target_index: usize,
    /// Ring center in world space (viewpoint position, y forced to the
    /// floor offset).
    pub position: Vec3,
    pub blink: RingBlink,
}

impl Marker {
    fn new(target_index: usize, viewpoint_position: Vec3) -> Self {
        Self {
            target_index,
            position: Vec3::new(
                viewpoint_position.x,
                RING_Y_OFFSET,
                viewpoint_position.z,
            ),
            blink: RingBlink::new(),
        }
    }
}

/// Owns the current marker population and its blink state.
#[derive(Clone, Debug, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    generation: u64,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Bumped on every regeneration; lets the renderer notice that all
    /// marker handles were replaced.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard every marker and create a fresh one per viewpoint whose
    /// position differs from `pose.position` (exact component equality).
    /// Zero eligible viewpoints yield an empty set.
    pub fn regenerate(&mut self, catalog: &ViewpointCatalog, pose: &CameraPose) {
        self.markers = catalog
            .iter()
            .enumerate()
            .filter(|(_, vp)| vp.position != pose.position)
            .map(|(index, vp)| Marker::new(index, vp.position))
            .collect();
        self.generation += 1;
        log::debug!(
            "[markers] regenerated: {} markers (gen {})",
            self.markers.len(),
            self.generation
        );
    }

    /// Advance every marker's blink by one step.
    pub fn blink_tick(&mut self) {
        for m in &mut self.markers {
            m.blink.tick();
        }
    }
}
