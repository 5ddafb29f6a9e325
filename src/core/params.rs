// One-shot procedural layout for the scene: snowflakes for the DOM overlay,
// ornaments hung on the tree and the ambient sparkle cloud.
//
// Everything here is generated once per mount from an injected RNG and is
// immutable afterwards. Callers keep the returned collections for the
// lifetime of the scene.

use super::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Snowflake {
    pub id: usize,
    pub left_percent: f32,
    pub size_px: f32,
    pub duration_sec: f32,
    pub delay_sec: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    pub layer: usize,
    pub index: usize,
    pub position: Vec3,
    pub color: u32,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub position: Vec3,
    pub phase: f32,
    pub size_scale: f32,
}

#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, range: (f32, f32)) -> f32 {
    range.0 + rng.gen::<f32>() * (range.1 - range.0)
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * half_width
}

pub fn generate_snowflakes<R: Rng + ?Sized>(rng: &mut R) -> Vec<Snowflake> {
    (0..SNOWFLAKE_COUNT)
        .map(|id| Snowflake {
            id,
            left_percent: uniform(rng, SNOW_LEFT_PERCENT),
            size_px: uniform(rng, SNOW_SIZE_PX),
            duration_sec: uniform(rng, SNOW_DURATION_SEC),
            delay_sec: uniform(rng, SNOW_DELAY_SEC),
            opacity: uniform(rng, SNOW_OPACITY),
        })
        .collect()
}

/// Number of ornaments hung on ring `layer` (0 is the top ring).
#[inline]
pub fn ornaments_in_layer(layer: usize) -> usize {
    ORNAMENT_BASE_COUNT + layer * ORNAMENT_COUNT_STEP
}

/// Nominal angle of ornament `index` on ring `layer`, before jitter.
#[inline]
pub fn ornament_angle(layer: usize, index: usize) -> f32 {
    let count = ornaments_in_layer(layer) as f32;
    (index as f32 / count) * TAU + layer as f32 * ORNAMENT_LAYER_PHASE
}

pub fn generate_ornaments<R: Rng + ?Sized>(rng: &mut R) -> Vec<Ornament> {
    let total: usize = (0..ORNAMENT_LAYERS.len()).map(ornaments_in_layer).sum();
    let mut out = Vec::with_capacity(total);
    for (layer, &(height, radius)) in ORNAMENT_LAYERS.iter().enumerate() {
        for index in 0..ornaments_in_layer(layer) {
            let angle = ornament_angle(layer, index);
            let r = radius * (1.0 + jitter(rng, ORNAMENT_RADIUS_JITTER));
            let y = height + jitter(rng, ORNAMENT_HEIGHT_JITTER);
            out.push(Ornament {
                layer,
                index,
                position: Vec3::new(angle.cos() * r, y, angle.sin() * r),
                color: ORNAMENT_PALETTE[(layer + index) % ORNAMENT_PALETTE.len()],
                size: uniform(rng, ORNAMENT_SIZE),
            });
        }
    }
    out
}

pub fn generate_sparkles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Sparkle> {
    let center = Vec3::from_array(SPARKLE_CENTER);
    let half = Vec3::from_array(SPARKLE_BOX) * 0.5;
    (0..SPARKLE_COUNT)
        .map(|_| Sparkle {
            position: center
                + Vec3::new(
                    jitter(rng, half.x),
                    jitter(rng, half.y),
                    jitter(rng, half.z),
                ),
            phase: rng.gen::<f32>() * TAU,
            size_scale: uniform(rng, SPARKLE_SIZE_SCALE),
        })
        .collect()
}

/// All per-mount layout data, generated in one go.
#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub snowflakes: Vec<Snowflake>,
    pub ornaments: Vec<Ornament>,
    pub sparkles: Vec<Sparkle>,
}

impl SceneLayout {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            snowflakes: generate_snowflakes(rng),
            ornaments: generate_ornaments(rng),
            sparkles: generate_sparkles(rng),
        }
    }
}
