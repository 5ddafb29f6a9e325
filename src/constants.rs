// Browser-side tuning constants: camera handling, picking and rendering.

// Orbit camera
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per CSS pixel dragged
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // fractional distance change per wheel delta unit
pub const ORBIT_MIN_POLAR: f32 = 0.05; // keep the eye off the pole

// Interaction
pub const CLICK_MAX_TRAVEL_PX: f32 = 6.0; // pointer travel that still counts as a click
pub const STAR_PICK_RADIUS: f32 = 0.36;
pub const ORNAMENT_PICK_PADDING: f32 = 0.02;

// Sparkles
pub const SPARKLE_WORLD_RADIUS_PER_SIZE: f32 = 0.008;

// Renderer
pub const MAX_INSTANCES: usize = 256;
pub const BLOOM_BLUR_TEXELS_PER_RADIUS: f32 = 2.5;

// DOM contract
pub const CANVAS_ID: &str = "app-canvas";
pub const SNOW_OVERLAY_ID: &str = "snow-overlay";
pub const HUD_ID: &str = "hud";
pub const MUSIC_BUTTON_ID: &str = "music-toggle";

// Background track, relative to the document base URI
pub const MUSIC_TRACK: &str = "assets/jingle.mp3";
