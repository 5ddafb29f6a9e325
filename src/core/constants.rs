// Generation and animation tuning constants.
//
// These constants express intended behavior (ranges, rates, amplitudes) and
// keep magic numbers out of the generator and animator.

// Snow overlay
pub const SNOWFLAKE_COUNT: usize = 50;
pub const SNOW_LEFT_PERCENT: (f32, f32) = (0.0, 100.0);
pub const SNOW_SIZE_PX: (f32, f32) = (4.0, 8.0);
pub const SNOW_DURATION_SEC: (f32, f32) = (10.0, 20.0);
pub const SNOW_DELAY_SEC: (f32, f32) = (0.0, 10.0);
pub const SNOW_OPACITY: (f32, f32) = (0.3, 0.7);

// Ornament rings, top to bottom: (height, nominal radius)
pub const ORNAMENT_LAYERS: [(f32, f32); 4] = [(2.0, 0.8), (1.4, 1.1), (0.8, 1.35), (0.3, 1.6)];
pub const ORNAMENT_BASE_COUNT: usize = 7;
pub const ORNAMENT_COUNT_STEP: usize = 2;
pub const ORNAMENT_LAYER_PHASE: f32 = 0.2; // radians added per layer
pub const ORNAMENT_RADIUS_JITTER: f32 = 0.075; // fraction of nominal radius, each way
pub const ORNAMENT_HEIGHT_JITTER: f32 = 0.04; // world units, each way
pub const ORNAMENT_SIZE: (f32, f32) = (0.08, 0.12);
pub const ORNAMENT_PALETTE: [u32; 4] = [0xfacc15, 0xf97316, 0xfbbf24, 0xfef3c7];

// Sparkle particles
pub const SPARKLE_COUNT: usize = 100;
pub const SPARKLE_BOX: [f32; 3] = [12.0, 8.0, 10.0];
pub const SPARKLE_CENTER: [f32; 3] = [0.0, 1.7, 0.0];
pub const SPARKLE_SIZE_SCALE: (f32, f32) = (0.5, 1.0);
pub const SPARKLE_SPEED: f32 = 0.4;
pub const SPARKLE_OPACITY: f32 = 0.7;
pub const SPARKLE_DRIFT: f32 = 0.1;
pub const SPARKLE_TWINKLE_RATE: f32 = 4.0; // multiple of SPARKLE_SPEED

// Tree group sway and bob
pub const GROUP_INITIAL_Y: f32 = 0.1;
pub const GROUP_SWAY_RATE: f32 = 0.12;
pub const GROUP_SWAY_AMPLITUDE: f32 = 0.2;
pub const GROUP_POINTER_GAIN: f32 = 0.4;
pub const GROUP_ROT_SMOOTHING: f32 = 0.04; // fraction of the gap closed per frame
pub const GROUP_BOB_BASE: f32 = 0.2;
pub const GROUP_BOB_RATE: f32 = 0.8;
pub const GROUP_BOB_AMPLITUDE: f32 = 0.03;
pub const GROUP_Y_SMOOTHING: f32 = 0.06;

// Tree layer swing
pub const LAYER_SWING_RATE: f32 = 0.3;
pub const LAYER_SWING_AMPLITUDE: f32 = 0.04;

// Star
pub const STAR_BASE: [f32; 3] = [0.0, 3.4, 0.0];
pub const STAR_SPIN_RATE: f32 = 0.8;
pub const STAR_BOB_RATE: f32 = 3.0;
pub const STAR_BOB_AMPLITUDE: f32 = 0.06;
pub const STAR_EMISSIVE_ACTIVE: f32 = 1.0;
pub const STAR_EMISSIVE_IDLE: f32 = 0.6;

// Ornament hover and pulse
pub const ORNAMENT_HOVER_LIFT: f32 = 0.07;
pub const ORNAMENT_PULSE_RATE: f32 = 3.0;
pub const ORNAMENT_PULSE_STAGGER: f32 = 2.0; // phase per unit of base x
pub const ORNAMENT_PULSE_AMPLITUDE: f32 = 0.03;
pub const ORNAMENT_EMISSIVE_HOVER: f32 = 1.1;
pub const ORNAMENT_EMISSIVE_IDLE: f32 = 0.5;
