// Per-frame animation of the retained tree rig.
//
// Every object is a `Transform` handle that lives for the whole scene and is
// mutated in place each frame. A handle that is not mounted yet (`None`) is
// simply skipped. All motion is closed-form trigonometry of elapsed time,
// plus exponential smoothing of the tree group toward a moving target.

use super::constants::*;
use super::params::{Ornament, SceneLayout, Sparkle};
use super::scene::SceneConfig;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3, // XYZ Euler angles, radians
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

/// Shared read-only parameters for one frame.
///
/// `star_active` is the one piece of interaction state that reaches more
/// than one object; everything reads it from here.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub t: f32,
    pub pointer: Vec2,
    pub star_active: bool,
}

/// Move `value` a fixed fraction of the way toward `target`.
#[inline]
pub fn approach(value: f32, target: f32, rate: f32) -> f32 {
    value + (target - value) * rate
}

#[inline]
pub fn group_target_rotation(t: f32, pointer_x: f32) -> f32 {
    (t * GROUP_SWAY_RATE).sin() * GROUP_SWAY_AMPLITUDE + pointer_x * GROUP_POINTER_GAIN
}

#[inline]
pub fn group_target_height(t: f32) -> f32 {
    GROUP_BOB_BASE + (t * GROUP_BOB_RATE).sin() * GROUP_BOB_AMPLITUDE
}

#[inline]
pub fn layer_swing(t: f32, y: f32) -> f32 {
    (t * LAYER_SWING_RATE + y).sin() * LAYER_SWING_AMPLITUDE
}

/// Vertical offset of the star above its base; exactly zero when idle.
#[inline]
pub fn star_bob(t: f32, active: bool) -> f32 {
    if active {
        (t * STAR_BOB_RATE).sin() * STAR_BOB_AMPLITUDE
    } else {
        0.0
    }
}

/// Ornament lift: hover offset plus the staggered pulse while the star is lit.
#[inline]
pub fn ornament_lift(t: f32, base_x: f32, hovered: bool, star_active: bool) -> f32 {
    let hover = if hovered { ORNAMENT_HOVER_LIFT } else { 0.0 };
    let pulse = if star_active {
        (t * ORNAMENT_PULSE_RATE + base_x * ORNAMENT_PULSE_STAGGER).sin() * ORNAMENT_PULSE_AMPLITUDE
    } else {
        0.0
    };
    hover + pulse
}

pub fn animate_group(node: Option<&mut Transform>, input: &FrameInput) {
    let Some(node) = node else {
        return;
    };
    let target_rot = group_target_rotation(input.t, input.pointer.x);
    node.rotation.y = approach(node.rotation.y, target_rot, GROUP_ROT_SMOOTHING);
    let target_y = group_target_height(input.t);
    node.position.y = approach(node.position.y, target_y, GROUP_Y_SMOOTHING);
}

#[derive(Clone, Debug)]
pub struct LayerRig {
    pub y: f32,
    pub node: Option<Transform>,
}

impl LayerRig {
    pub fn animate(&mut self, input: &FrameInput) {
        if let Some(node) = self.node.as_mut() {
            node.rotation.y = layer_swing(input.t, self.y);
        }
    }
}

#[derive(Clone, Debug)]
pub struct StarRig {
    pub base: Vec3,
    pub hovered: bool,
    pub node: Option<Transform>,
}

impl StarRig {
    pub fn animate(&mut self, input: &FrameInput) {
        if let Some(node) = self.node.as_mut() {
            node.rotation.y = input.t * STAR_SPIN_RATE;
            node.position.y = self.base.y + star_bob(input.t, input.star_active);
        }
    }

    pub fn emissive_intensity(star_active: bool) -> f32 {
        if star_active {
            STAR_EMISSIVE_ACTIVE
        } else {
            STAR_EMISSIVE_IDLE
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrnamentRig {
    pub data: Ornament,
    pub hovered: bool,
    pub node: Option<Transform>,
}

impl OrnamentRig {
    pub fn animate(&mut self, input: &FrameInput) {
        if let Some(node) = self.node.as_mut() {
            let base = self.data.position;
            let lift = ornament_lift(input.t, base.x, self.hovered, input.star_active);
            node.position = Vec3::new(base.x, base.y + lift, base.z);
        }
    }

    pub fn emissive_intensity(&self) -> f32 {
        if self.hovered {
            ORNAMENT_EMISSIVE_HOVER
        } else {
            ORNAMENT_EMISSIVE_IDLE
        }
    }
}

#[derive(Clone, Debug)]
pub struct SparkleRig {
    pub data: Sparkle,
    pub brightness: f32,
    pub node: Option<Transform>,
}

impl SparkleRig {
    pub fn animate(&mut self, input: &FrameInput) {
        let Some(node) = self.node.as_mut() else {
            return;
        };
        let phase = input.t * SPARKLE_SPEED + self.data.phase;
        node.position = self.data.position + Vec3::Y * phase.sin() * SPARKLE_DRIFT;
        let twinkle = 0.5 + 0.5 * (phase * SPARKLE_TWINKLE_RATE).sin();
        self.brightness = twinkle * SPARKLE_OPACITY;
    }
}

/// The whole animated tree: group, cones, star, ornaments and sparkles.
///
/// Children are expressed in group space; sparkles are in world space.
#[derive(Clone, Debug)]
pub struct TreeRig {
    pub group: Option<Transform>,
    pub layers: Vec<LayerRig>,
    pub star: StarRig,
    pub ornaments: Vec<OrnamentRig>,
    pub sparkles: Vec<SparkleRig>,
}

impl TreeRig {
    /// Build the rig with every handle unmounted.
    pub fn new(config: &SceneConfig, layout: &SceneLayout) -> Self {
        Self {
            group: None,
            layers: config
                .layers
                .iter()
                .map(|l| LayerRig { y: l.y, node: None })
                .collect(),
            star: StarRig {
                base: Vec3::from_array(config.star_position),
                hovered: false,
                node: None,
            },
            ornaments: layout
                .ornaments
                .iter()
                .map(|o| OrnamentRig {
                    data: o.clone(),
                    hovered: false,
                    node: None,
                })
                .collect(),
            sparkles: layout
                .sparkles
                .iter()
                .map(|s| SparkleRig {
                    data: s.clone(),
                    brightness: 0.0,
                    node: None,
                })
                .collect(),
        }
    }

    /// Attach a transform to every handle at its declared rest pose.
    pub fn mount(&mut self, config: &SceneConfig) {
        self.group = Some(Transform::at(Vec3::new(0.0, GROUP_INITIAL_Y, 0.0)));
        for (rig, decl) in self.layers.iter_mut().zip(config.layers.iter()) {
            rig.node = Some(Transform {
                position: Vec3::new(0.0, decl.y, 0.0),
                rotation: Vec3::new(decl.tilt, 0.0, -decl.tilt),
                scale: Vec3::ONE,
            });
        }
        self.star.node = Some(Transform::at(self.star.base));
        for o in &mut self.ornaments {
            o.node = Some(Transform::at(o.data.position));
        }
        for s in &mut self.sparkles {
            s.node = Some(Transform::at(s.data.position));
        }
    }

    pub fn animate(&mut self, input: &FrameInput) {
        animate_group(self.group.as_mut(), input);
        for layer in &mut self.layers {
            layer.animate(input);
        }
        self.star.animate(input);
        for o in &mut self.ornaments {
            o.animate(input);
        }
        for s in &mut self.sparkles {
            s.animate(input);
        }
    }

    /// World matrix of the tree group, identity while unmounted.
    pub fn group_matrix(&self) -> Mat4 {
        self.group.map(|g| g.matrix()).unwrap_or(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_never_overshoots_a_fixed_target() {
        let mut v = 0.0_f32;
        for _ in 0..500 {
            let next = approach(v, 1.0, GROUP_ROT_SMOOTHING);
            assert!(next >= v && next <= 1.0);
            v = next;
        }
        assert!(1.0 - v < 1e-6);
    }

    #[test]
    fn layer_swing_is_out_of_phase_between_layers() {
        let t = 2.0;
        assert_ne!(layer_swing(t, 1.3), layer_swing(t, 1.9));
        assert!(layer_swing(t, 1.3).abs() <= LAYER_SWING_AMPLITUDE);
    }

    #[test]
    fn unmounted_handles_are_skipped() {
        let input = FrameInput {
            t: 1.0,
            pointer: Vec2::new(0.5, 0.0),
            star_active: true,
        };
        animate_group(None, &input);
        let mut layer = LayerRig { y: 1.3, node: None };
        layer.animate(&input);
        assert!(layer.node.is_none());
    }
}
