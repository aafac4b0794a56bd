//! The tour session context: one object owning the camera pose, catalog,
//! marker set, navigator, and walk flag, so the frontend has a single
//! mutable core to wrap instead of a pile of globals.

use instant::Duration;

use crate::catalog::{CameraPose, ViewpointCatalog};
use crate::marker::MarkerSet;
use crate::navigator::Navigator;
use crate::picking;

/// Forward-walk translation per frame while the movement key is held.
pub const MOVE_SPEED: f32 = 0.5;

pub struct TourSession {
    catalog: ViewpointCatalog,
    pose: CameraPose,
    markers: MarkerSet,
    navigator: Navigator,
    moving_forward: bool,
}

impl TourSession {
    pub fn new(catalog: ViewpointCatalog) -> Self {
        let pose = catalog.initial_pose();
        Self {
            catalog,
            pose,
            markers: MarkerSet::new(),
            navigator: Navigator::new(),
            moving_forward: false,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &ViewpointCatalog {
        &self.catalog
    }

    #[inline]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    #[inline]
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.navigator.is_transitioning()
    }

    /// Rebuild the marker set for the current pose. Called after the model
    /// finishes loading and after every completed transition.
    pub fn regenerate_markers(&mut self) {
        self.markers.regenerate(&self.catalog, &self.pose);
    }

    /// Set or clear the continuous forward-walk flag ('W' held).
    pub fn set_moving_forward(&mut self, moving: bool) {
        self.moving_forward = moving;
    }

    /// Route a pointer click at canvas pixel `(sx, sy)`.
    ///
    /// Ignored outright while a transition is in flight. Otherwise casts a
    /// ray through the click point, picks the nearest marker ring hit, and
    /// starts a transition toward that marker's viewpoint. Returns the
    /// catalog index navigation started toward, if any.
    pub fn handle_click(&mut self, sx: f32, sy: f32, width: f32, height: f32) -> Option<usize> {
        if self.navigator.is_transitioning() {
            return None;
        }
        let ndc = picking::screen_to_ndc(sx, sy, width, height);
        let aspect = width / height.max(1.0);
        let (ro, rd) = picking::camera_ray(&self.pose, ndc, aspect);
        let hit = picking::pick(&self.markers, ro, rd)?;
        let target = self.markers.markers()[hit.marker_index].target_index;
        log::info!("[click] marker hit -> viewpoint {}", target);
        self.navigator
            .go_to(&self.catalog, target, &self.pose)
            .then_some(target)
    }

    /// Per-frame update: advance an in-flight transition (regenerating
    /// markers on arrival, never mid-flight) and apply the forward walk.
    ///
    /// The walk path writes the pose even during a transition; the two
    /// writers run sequentially within a frame and are intentionally left
    /// uncoordinated.
    pub fn update(&mut self, dt: Duration) {
        if self.navigator.update(dt, &mut self.pose).is_some() {
            self.regenerate_markers();
        }
        if self.moving_forward {
            self.pose.translate_forward(MOVE_SPEED);
        }
    }

    /// Advance marker blink state; driven on a fixed cadence by the
    /// frontend timer.
    pub fn blink_tick(&mut self) {
        self.markers.blink_tick();
    }
}
