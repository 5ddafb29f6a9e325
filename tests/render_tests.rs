// Host-side tests for mesh generation and per-frame instance batching.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
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
    pub use animate::*;
    pub use params::*;
    pub use scene::*;
}
mod render {
    pub mod mesh {
        include!("../src/render/mesh.rs");
    }
    pub mod instances {
        include!("../src/render/instances.rs");
    }
}

use crate::constants::MAX_INSTANCES;
use crate::core::{FrameInput, Material, SceneConfig, SceneLayout, TreeRig};
use crate::render::instances::*;
use glam::{Mat4, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mounted_rig(config: &SceneConfig) -> TreeRig {
    let layout = SceneLayout::generate(&mut StdRng::seed_from_u64(21));
    let mut rig = TreeRig::new(config, &layout);
    rig.mount(config);
    rig.animate(&FrameInput {
        t: 1.5,
        pointer: Vec2::ZERO,
        star_active: false,
    });
    rig
}

fn plain_instance() -> InstanceData {
    InstanceData::new(Mat4::IDENTITY, &Material::metal(0xffffff, 0.0, 1.0), 0.0)
}

#[test]
fn mounted_rig_fits_the_instance_buffer() {
    let config = SceneConfig::christmas();
    let rig = mounted_rig(&config);
    let frame = collect(&rig, &config, false);

    let expected = config.fixtures.len()
        + config.layers.len()
        + 1
        + rig.ornaments.len()
        + rig.sparkles.len();
    assert_eq!(frame.instances.len(), expected);
    assert!(frame.instances.len() <= MAX_INSTANCES);

    // every fixture and layer has its own mesh; ornaments and sparkles share one
    assert_eq!(frame.batches.len(), config.fixtures.len() + config.layers.len() + 2);
    let last = frame.batches.last().expect("sphere batch");
    assert_eq!(last.mesh, MeshSlot::Sphere);
    assert_eq!(
        (last.instances.end - last.instances.start) as usize,
        rig.ornaments.len() + rig.sparkles.len()
    );
}

#[test]
fn unmounted_rig_draws_only_fixtures() {
    let config = SceneConfig::christmas();
    let layout = SceneLayout::generate(&mut StdRng::seed_from_u64(3));
    let rig = TreeRig::new(&config, &layout);
    let frame = collect(&rig, &config, false);
    assert_eq!(frame.instances.len(), config.fixtures.len());
}

#[test]
fn lit_star_glows_brighter() {
    let config = SceneConfig::christmas();
    let rig = mounted_rig(&config);
    let star_emissive = |active: bool| {
        let frame = collect(&rig, &config, active);
        let batch = frame
            .batches
            .iter()
            .find(|b| b.mesh == MeshSlot::Star)
            .expect("star batch")
            .clone();
        let e = frame.instances[batch.instances.start as usize].emissive;
        e[0] + e[1] + e[2]
    };
    assert!(star_emissive(true) > star_emissive(false));
}

#[test]
fn push_merges_contiguous_meshes() {
    let mut frame = FrameInstances::default();
    assert!(frame.push(MeshSlot::Sphere, plain_instance()));
    assert!(frame.push(MeshSlot::Sphere, plain_instance()));
    assert!(frame.push(MeshSlot::Star, plain_instance()));
    assert!(frame.push(MeshSlot::Sphere, plain_instance()));
    let spans: Vec<_> = frame
        .batches
        .iter()
        .map(|b| (b.mesh, b.instances.clone()))
        .collect();
    assert_eq!(
        spans,
        vec![
            (MeshSlot::Sphere, 0..2),
            (MeshSlot::Star, 2..3),
            (MeshSlot::Sphere, 3..4),
        ]
    );
}

#[test]
fn push_stops_at_capacity() {
    let mut frame = FrameInstances::default();
    for _ in 0..MAX_INSTANCES {
        assert!(frame.push(MeshSlot::Sphere, plain_instance()));
    }
    assert!(!frame.push(MeshSlot::Sphere, plain_instance()));
    assert_eq!(frame.instances.len(), MAX_INSTANCES);
    assert_eq!(frame.batches.len(), 1);
}

#[test]
fn sparkle_opacity_follows_brightness() {
    let config = SceneConfig::christmas();
    let rig = mounted_rig(&config);
    let frame = collect(&rig, &config, false);
    let start = frame.instances.len() - rig.sparkles.len();
    for (inst, s) in frame.instances[start..].iter().zip(&rig.sparkles) {
        assert!((inst.color[3] - s.brightness).abs() < 1e-6);
    }
}
