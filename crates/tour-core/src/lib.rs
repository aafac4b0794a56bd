//! Platform-independent logic for the museum tour: the fixed viewpoint
//! catalog, hotspot marker lifecycle and blink state, the camera navigator
//! state machine, and ray picking against marker rings.
//!
//! Nothing in this crate touches the DOM or the GPU; the web frontend wraps
//! a [`TourSession`] in `Rc<RefCell<_>>` and feeds it pointer, keyboard, and
//! frame events.

pub mod catalog;
pub mod marker;
pub mod navigator;
pub mod picking;
pub mod session;

pub use catalog::{CameraPose, Viewpoint, ViewpointCatalog};
pub use marker::{Marker, MarkerSet, RingBlink};
pub use navigator::{Navigator, TRANSITION_DURATION_SECS};
pub use picking::{camera_ray, pick, screen_to_ndc, MarkerHit};
pub use session::TourSession;
