// Shared tuning constants used by both the core logic and the web front-end.

// Flag namespace under which the scene stores our settings
pub const MODULE_ID: &str = "pin-scale";

// Canvas zoom limits used when the host does not report its own
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

// Neutral values for the user-tunable curve
pub const DEFAULT_MIN_SCALE: f64 = 1.0; // pin scale at the zoom floor
pub const DEFAULT_MAX_SCALE: f64 = 1.0; // pin scale at the zoom ceiling
pub const DEFAULT_HUD_SCALE: f64 = 1.0; // multiplier on top of the HUD reciprocal

// Scale written back when scaling is switched off
pub const IDENTITY_SCALE: f64 = 1.0;

// Input step sizes for the settings form
pub const ZOOM_INPUT_STEP: f64 = 0.05;
pub const SCALE_INPUT_STEP: f64 = 0.1;
