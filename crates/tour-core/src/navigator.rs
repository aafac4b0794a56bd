//! Camera navigator: a two-state machine (Idle / Transitioning) driving a
//! timed ease-in-out interpolation of the camera pose toward a target
//! viewpoint.
//!
//! Position and orientation tween independently over the same fixed
//! duration; position completion is the authoritative finish signal. At
//! most one transition is in flight; `go_to` while transitioning is a
//! silent no-op and clicks are dropped, never queued.

use glam::Vec3;
use instant::Duration;

use crate::catalog::{CameraPose, ViewpointCatalog};

/// Fixed transition duration.
pub const TRANSITION_DURATION_SECS: f32 = 2.0;

/// Quadratic ease-in-out over `t` in [0, 1].
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Component-wise tween of a `Vec3` over a fixed duration.
#[derive(Clone, Copy, Debug)]
struct Tween {
    start: Vec3,
    end: Vec3,
    elapsed: f32,
}

impl Tween {
    fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
        }
    }

    fn step(&mut self, dt_secs: f32) -> Vec3 {
        self.elapsed += dt_secs;
        let t = (self.elapsed / TRANSITION_DURATION_SECS).min(1.0);
        self.start.lerp(self.end, ease_in_out(t))
    }

    fn done(&self) -> bool {
        self.elapsed >= TRANSITION_DURATION_SECS
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    target_index: usize,
    position: Tween,
    rotation: Tween,
}

#[derive(Clone, Copy, Debug)]
enum NavState {
    Idle,
    Transitioning(Transition),
}

/// Drives timed camera transitions with a single-flight guard.
#[derive(Clone, Debug)]
pub struct Navigator {
    state: NavState,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            state: NavState::Idle,
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, NavState::Transitioning(_))
    }

    /// Begin a transition from `pose` toward catalog entry `target_index`.
    ///
    /// Silently does nothing when a transition is already in flight or the
    /// index is out of range. Returns whether a transition started.
    pub fn go_to(
        &mut self,
        catalog: &ViewpointCatalog,
        target_index: usize,
        pose: &CameraPose,
    ) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let Some(target) = catalog.get(target_index) else {
            return false;
        };
        log::info!(
            "[nav] transition start -> {} ({})",
            target_index,
            target.name
        );
        self.state = NavState::Transitioning(Transition {
            target_index,
            position: Tween::new(pose.position, target.position),
            rotation: Tween::new(pose.rotation, target.rotation),
        });
        true
    }

    /// Advance an in-flight transition by `dt`, mutating `pose`.
    ///
    /// Returns the target viewpoint index once, on the frame the transition
    /// completes; the pose then equals the target exactly and the state is
    /// Idle again. `None` while idle or mid-flight.
    pub fn update(&mut self, dt: Duration, pose: &mut CameraPose) -> Option<usize> {
        let NavState::Transitioning(mut tr) = self.state else {
            return None;
        };
        let dt_secs = dt.as_secs_f32();
        pose.position = tr.position.step(dt_secs);
        pose.rotation = tr.rotation.step(dt_secs);
        // Position is the authoritative completion signal; snap both
        // channels exactly onto the target.
        if tr.position.done() {
            pose.position = tr.position.end;
            pose.rotation = tr.rotation.end;
            self.state = NavState::Idle;
            log::info!("[nav] arrived at {}", tr.target_index);
            return Some(tr.target_index);
        }
        self.state = NavState::Transitioning(tr);
        None
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
