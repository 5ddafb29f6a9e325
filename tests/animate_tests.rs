// Host-side tests for the frame animator.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod animate {
        include!("../src/core/animate.rs");
    }
}

use crate::core::animate::*;
use crate::core::constants::*;
use crate::core::params::SceneLayout;
use crate::core::scene::SceneConfig;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: f32 = 1.0 / 60.0;

fn mounted_rig() -> TreeRig {
    let config = SceneConfig::christmas();
    let layout = SceneLayout::generate(&mut StdRng::seed_from_u64(5));
    let mut rig = TreeRig::new(&config, &layout);
    rig.mount(&config);
    rig
}

fn input(t: f32, pointer_x: f32, star_active: bool) -> FrameInput {
    FrameInput {
        t,
        pointer: Vec2::new(pointer_x, 0.0),
        star_active,
    }
}

#[test]
fn star_does_not_bob_while_idle() {
    let mut t = 0.0;
    while t < 10.0 {
        assert_eq!(star_bob(t, false), 0.0);
        t += 0.173;
    }
    let mut rig = mounted_rig();
    rig.animate(&input(4.2, 0.0, false));
    let node = rig.star.node.unwrap();
    assert_eq!(node.position.y, STAR_BASE[1]);
}

#[test]
fn star_returns_to_base_after_toggle_round_trip() {
    let mut rig = mounted_rig();
    rig.animate(&input(1.0, 0.0, true));
    let lit = rig.star.node.unwrap().position.y;
    assert!((lit - (STAR_BASE[1] + (1.0 * STAR_BOB_RATE).sin() * STAR_BOB_AMPLITUDE)).abs() < 1e-6);
    rig.animate(&input(1.5, 0.0, false));
    assert_eq!(rig.star.node.unwrap().position.y, STAR_BASE[1]);
}

#[test]
fn first_frame_is_finite_and_leaves_rotation_at_rest() {
    let mut rig = mounted_rig();
    rig.animate(&input(0.0, 0.0, false));
    let group = rig.group.unwrap();
    assert_eq!(group.rotation.y, 0.0);
    assert!(group.position.is_finite());
    for layer in &rig.layers {
        let n = layer.node.unwrap();
        assert!(n.rotation.is_finite() && n.position.is_finite());
    }
    for o in &rig.ornaments {
        assert!(o.node.unwrap().position.is_finite());
    }
    for s in &rig.sparkles {
        assert!(s.brightness.is_finite());
    }
}

#[test]
fn group_rotation_approaches_target_without_overshoot() {
    let mut rig = mounted_rig();
    let mut t = 0.0;
    let mut prev = 0.0;
    while t < 5.0 {
        t += FRAME;
        rig.animate(&input(t, 0.0, false));
        let rot = rig.group.unwrap().rotation.y;
        let target = group_target_rotation(t, 0.0);
        // target rises monotonically on [0, 5] so the smoothed value trails it
        assert!(rot >= prev - 1e-6);
        assert!(rot >= 0.0 && rot <= target + 1e-6, "t={} rot={} target={}", t, rot, target);
        prev = rot;
    }
    let final_target = (5.0_f32 * GROUP_SWAY_RATE).sin() * GROUP_SWAY_AMPLITUDE;
    let rot = rig.group.unwrap().rotation.y;
    assert!((rot - final_target).abs() < 0.015, "rot={} target={}", rot, final_target);
}

#[test]
fn pointer_pulls_the_group_toward_it() {
    let mut left = mounted_rig();
    let mut right = mounted_rig();
    for i in 1..=120 {
        let t = i as f32 * FRAME;
        left.animate(&input(t, -1.0, false));
        right.animate(&input(t, 1.0, false));
    }
    assert!(right.group.unwrap().rotation.y > left.group.unwrap().rotation.y);
}

#[test]
fn hovered_ornament_is_lifted() {
    let mut rig = mounted_rig();
    rig.ornaments[0].hovered = true;
    rig.animate(&input(2.0, 0.0, false));
    let base = rig.ornaments[0].data.position.y;
    let y = rig.ornaments[0].node.unwrap().position.y;
    assert!((y - (base + ORNAMENT_HOVER_LIFT)).abs() < 1e-6);
    let other = &rig.ornaments[1];
    assert_eq!(other.node.unwrap().position.y, other.data.position.y);
}

#[test]
fn ornaments_pulse_only_while_star_is_lit() {
    assert_eq!(ornament_lift(1.3, 0.5, false, false), 0.0);
    let lit = ornament_lift(1.3, 0.5, false, true);
    assert!(lit.abs() <= ORNAMENT_PULSE_AMPLITUDE);
    assert!(lit != 0.0);
}

#[test]
fn unmounted_rig_is_left_untouched() {
    let config = SceneConfig::christmas();
    let layout = SceneLayout::generate(&mut StdRng::seed_from_u64(6));
    let mut rig = TreeRig::new(&config, &layout);
    rig.animate(&input(3.0, 0.7, true));
    assert!(rig.group.is_none());
    assert!(rig.star.node.is_none());
    assert!(rig.layers.iter().all(|l| l.node.is_none()));
    assert!(rig.ornaments.iter().all(|o| o.node.is_none()));
    assert!(rig.sparkles.iter().all(|s| s.node.is_none() && s.brightness == 0.0));
}

#[test]
fn sparkles_twinkle_within_opacity() {
    let mut rig = mounted_rig();
    for i in 0..200 {
        rig.animate(&input(i as f32 * 0.05, 0.0, false));
        for s in &rig.sparkles {
            assert!(s.brightness >= 0.0 && s.brightness <= SPARKLE_OPACITY + 1e-6);
            let dy = s.node.unwrap().position.y - s.data.position.y;
            assert!(dy.abs() <= SPARKLE_DRIFT + 1e-5);
        }
    }
}
