// Host-side tests for the procedural layout generator.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
}

use crate::core::constants::*;
use crate::core::params::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::f32::consts::TAU;

fn within(v: f32, (lo, hi): (f32, f32)) -> bool {
    v >= lo - 1e-5 && v <= hi + 1e-5
}

#[test]
fn snowflakes_fall_within_declared_ranges() {
    let mut rng = StdRng::seed_from_u64(1);
    let flakes = generate_snowflakes(&mut rng);
    assert_eq!(flakes.len(), SNOWFLAKE_COUNT);
    for (i, f) in flakes.iter().enumerate() {
        assert_eq!(f.id, i);
        assert!(within(f.left_percent, SNOW_LEFT_PERCENT));
        assert!(within(f.size_px, SNOW_SIZE_PX));
        assert!(within(f.duration_sec, SNOW_DURATION_SEC));
        assert!(within(f.delay_sec, SNOW_DELAY_SEC));
        assert!(within(f.opacity, SNOW_OPACITY));
    }
}

#[test]
fn snowflake_ids_are_unique_and_dense() {
    let flakes = generate_snowflakes(&mut StdRng::seed_from_u64(11));
    let ids: HashSet<usize> = flakes.iter().map(|f| f.id).collect();
    assert_eq!(ids.len(), SNOWFLAKE_COUNT);
    assert_eq!(ids, (0..SNOWFLAKE_COUNT).collect::<HashSet<_>>());
}

#[test]
fn ornaments_hang_near_their_ring_height() {
    for seed in 0..8 {
        let ornaments = generate_ornaments(&mut StdRng::seed_from_u64(seed));
        for o in &ornaments {
            let (height, _) = ORNAMENT_LAYERS[o.layer];
            assert!(
                (o.position.y - height).abs() <= ORNAMENT_HEIGHT_JITTER + 1e-5,
                "seed {} layer {} y {}",
                seed,
                o.layer,
                o.position.y
            );
        }
    }
}

#[test]
fn each_ring_has_two_more_ornaments_than_the_one_above() {
    let mut rng = StdRng::seed_from_u64(2);
    let ornaments = generate_ornaments(&mut rng);
    let counts: Vec<usize> = (0..ORNAMENT_LAYERS.len())
        .map(|l| ornaments.iter().filter(|o| o.layer == l).count())
        .collect();
    assert_eq!(counts, vec![7, 9, 11, 13]);
    assert_eq!(ornaments.len(), 40);
}

#[test]
fn ornaments_are_evenly_spaced_around_each_ring() {
    let mut rng = StdRng::seed_from_u64(3);
    for o in generate_ornaments(&mut rng) {
        let count = ornaments_in_layer(o.layer) as f32;
        let expected = o.index as f32 / count * TAU + o.layer as f32 * ORNAMENT_LAYER_PHASE;
        let actual = o.position.z.atan2(o.position.x);
        let diff = (actual - expected).rem_euclid(TAU);
        assert!(diff < 1e-3 || TAU - diff < 1e-3, "{:?}", o);
    }
}

#[test]
fn ornament_radius_and_height_stay_inside_jitter_band() {
    let mut rng = StdRng::seed_from_u64(4);
    for o in generate_ornaments(&mut rng) {
        let (height, radius) = ORNAMENT_LAYERS[o.layer];
        let r = (o.position.x * o.position.x + o.position.z * o.position.z).sqrt();
        assert!(r >= radius * (1.0 - ORNAMENT_RADIUS_JITTER) - 1e-4);
        assert!(r <= radius * (1.0 + ORNAMENT_RADIUS_JITTER) + 1e-4);
        assert!((o.position.y - height).abs() <= ORNAMENT_HEIGHT_JITTER + 1e-5);
        assert!(within(o.size, ORNAMENT_SIZE));
        assert_eq!(o.color, ORNAMENT_PALETTE[(o.layer + o.index) % 4]);
    }
}

#[test]
fn same_seed_gives_same_layout() {
    let a = SceneLayout::generate(&mut StdRng::seed_from_u64(9));
    let b = SceneLayout::generate(&mut StdRng::seed_from_u64(9));
    assert_eq!(a.snowflakes, b.snowflakes);
    assert_eq!(a.ornaments, b.ornaments);
    assert_eq!(a.sparkles, b.sparkles);
    assert_eq!(a.sparkles.len(), SPARKLE_COUNT);
}
