//! Frontend tuning values and DOM/asset identifiers.

/// CDN location of the museum model.
pub const MODEL_URL: &str =
    "https://storage.googleapis.com/pearl-artifacts-cdn/pearl-gltf-artifacts/museum.glb";
/// Uniform scale applied to the loaded model.
pub const MODEL_SCALE: f32 = 25.0;

/// Where the home button points.
pub const HOME_URL: &str = "https://pearlrhythmfoundation.org/category/art-archive/";

// DOM element ids consumed by the glue code (must match index.html).
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_SCREEN_SELECTOR: &str = ".loading-screen";
pub const MAIN_CONTENT_SELECTOR: &str = ".main-content";
pub const LOADING_PERCENTAGE_ID: &str = "loading-percentage";
pub const PROGRESS_BAR_FILL_ID: &str = "progress-bar-fill";
pub const INSTRUCTION_POPUP_ID: &str = "instruction-popup";
pub const CLOSE_POPUP_ID: &str = "close-popup";
pub const HOME_BUTTON_ID: &str = "home-button";

// Lighting, matching the authored scene: half-intensity white ambient plus
// a half-intensity white directional light.
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_INTENSITY: f32 = 0.5;
/// Direction the scene light arrives from (normalized at upload).
pub const LIGHT_DIRECTION: [f32; 3] = [-90.535_8, 463.334_7, 272.396_52];
