// Per-frame instance list built from the animated rig.

use crate::constants::{MAX_INSTANCES, SPARKLE_WORLD_RADIUS_PER_SIZE};
use crate::core::{srgb_to_linear, Material, SceneConfig, StarRig, TreeRig};
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::ops::Range;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],    // linear rgb, opacity
    pub emissive: [f32; 4], // linear rgb premultiplied by intensity
    pub material: [f32; 4], // metalness, roughness
}

impl InstanceData {
    pub fn new(model: Mat4, material: &Material, emissive_intensity: f32) -> Self {
        let [r, g, b] = srgb_to_linear(material.color);
        let [er, eg, eb] = srgb_to_linear(material.emissive);
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            emissive: [
                er * emissive_intensity,
                eg * emissive_intensity,
                eb * emissive_intensity,
                0.0,
            ],
            material: [material.metalness, material.roughness, 0.0, 0.0],
        }
    }
}

/// Which GPU mesh a batch draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshSlot {
    Fixture(usize),
    Layer(usize),
    Star,
    Sphere,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawBatch {
    pub mesh: MeshSlot,
    pub instances: Range<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct FrameInstances {
    pub instances: Vec<InstanceData>,
    pub batches: SmallVec<[DrawBatch; 12]>,
}

impl FrameInstances {
    /// Append one instance, extending the previous batch when it draws the
    /// same mesh. Returns false once the instance buffer is full.
    pub fn push(&mut self, mesh: MeshSlot, instance: InstanceData) -> bool {
        if self.instances.len() >= MAX_INSTANCES {
            return false;
        }
        let index = self.instances.len() as u32;
        self.instances.push(instance);
        match self.batches.last_mut() {
            Some(last) if last.mesh == mesh && last.instances.end == index => {
                last.instances.end = index + 1;
            }
            _ => self.batches.push(DrawBatch {
                mesh,
                instances: index..index + 1,
            }),
        }
        true
    }
}

/// World radius of a sparkle quad-sphere for its per-particle scale.
#[inline]
pub fn sparkle_radius(config: &SceneConfig, size_scale: f32) -> f32 {
    size_scale * config.sparkles.size * SPARKLE_WORLD_RADIUS_PER_SIZE
}

/// Flatten the rig into draw batches. Fixtures, cones, star and ornaments
/// live under the tree group; sparkles are already in world space.
/// Unmounted handles are skipped.
pub fn collect(rig: &TreeRig, config: &SceneConfig, star_active: bool) -> FrameInstances {
    let mut out = FrameInstances::default();
    let group = rig.group_matrix();

    for (i, fixture) in config.fixtures.iter().enumerate() {
        let [rx, ry, rz] = fixture.rotation;
        let local = Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::from_array(fixture.position),
        );
        out.push(
            MeshSlot::Fixture(i),
            InstanceData::new(group * local, &fixture.material, fixture.material.emissive_intensity),
        );
    }

    let layer_mat = &config.layer_material;
    for (i, layer) in rig.layers.iter().enumerate() {
        if let Some(node) = layer.node {
            out.push(
                MeshSlot::Layer(i),
                InstanceData::new(group * node.matrix(), layer_mat, layer_mat.emissive_intensity),
            );
        }
    }

    if let Some(node) = rig.star.node {
        out.push(
            MeshSlot::Star,
            InstanceData::new(
                group * node.matrix(),
                &config.star_material,
                StarRig::emissive_intensity(star_active),
            ),
        );
    }

    for o in &rig.ornaments {
        let Some(node) = o.node else { continue };
        let material = Material::metal(o.data.color, config.ornament_metalness, config.ornament_roughness)
            .glowing(o.data.color, o.emissive_intensity());
        let model = group * node.matrix() * Mat4::from_scale(Vec3::splat(o.data.size));
        if !out.push(MeshSlot::Sphere, InstanceData::new(model, &material, material.emissive_intensity)) {
            log::warn!("[render] instance buffer full at ornaments");
            return out;
        }
    }

    let sparkle = &config.sparkles;
    for s in &rig.sparkles {
        let Some(node) = s.node else { continue };
        let material = Material {
            opacity: s.brightness,
            ..Material::metal(sparkle.color, 0.0, 1.0).glowing(sparkle.color, 1.0)
        };
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(sparkle_radius(config, s.data.size_scale)),
            Quat::IDENTITY,
            node.position,
        );
        if !out.push(MeshSlot::Sphere, InstanceData::new(model, &material, s.brightness)) {
            break;
        }
    }
    out
}
