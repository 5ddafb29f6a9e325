// Static scene composition: background, lights, tree geometry, sparkles,
// camera framing and the post-processing chain.
//
// Nothing here changes at runtime. The renderer and the camera read these
// values once at startup; the animator only moves the handles built from
// them.

use super::constants::{SPARKLE_BOX, SPARKLE_COUNT, SPARKLE_OPACITY, SPARKLE_SPEED, STAR_BASE};

pub const GOLD: u32 = 0xfacc15;
pub const EMERALD: u32 = 0x065f46;
pub const EMERALD_DARK: u32 = 0x022c22;
pub const NIGHT: u32 = 0x020617;

/// Convert a packed `0xRRGGBB` sRGB color into linear RGB.
pub fn srgb_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Disc { radius: f32, segments: u32 },
    Frustum { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    OpenCone { radius: f32, height: f32, segments: u32 },
    Sphere { radius: f32, segments: u32 },
    Octahedron { radius: f32, detail: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
}

impl Material {
    pub fn metal(color: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            emissive: 0x000000,
            emissive_intensity: 0.0,
            metalness,
            roughness,
            opacity: 1.0,
        }
    }

    pub fn glowing(mut self, emissive: u32, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }
}

/// A mesh fixed in tree-group space (podium, base, trunk).
#[derive(Clone, Copy, Debug)]
pub struct MeshDecl {
    pub label: &'static str,
    pub shape: Shape,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub material: Material,
}

/// One emerald cone of the tree. `y` is also the phase of its swing.
#[derive(Clone, Copy, Debug)]
pub struct TreeLayerDecl {
    pub y: f32,
    pub radius: f32,
    pub height: f32,
    pub tilt: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SpotLight {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    pub angle: f32,
    pub penumbra: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

/// Stand-in for an HDR light probe: a hemisphere of sky and ground light.
#[derive(Clone, Copy, Debug)]
pub struct EnvironmentProbe {
    pub preset: &'static str,
    pub sky: u32,
    pub ground: u32,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Fog {
    pub color: u32,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SparkleConfig {
    pub count: usize,
    pub speed: f32,
    pub opacity: f32,
    pub scale: [f32; 3],
    pub size: f32,
    pub color: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct OrbitLimits {
    pub target: [f32; 3],
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct BloomConfig {
    pub intensity: f32,
    pub luminance_threshold: f32,
    pub luminance_smoothing: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct VignetteConfig {
    pub offset: f32,
    pub darkness: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PostConfig {
    pub bloom: BloomConfig,
    pub vignette: VignetteConfig,
}

#[derive(Clone, Copy, Debug)]
pub struct HudText {
    pub brand: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub background: u32,
    pub fog: Fog,
    pub ambient: f32,
    pub key_light: SpotLight,
    pub fill_light: SpotLight,
    pub top_light: DirectionalLight,
    pub environment: EnvironmentProbe,
    pub fixtures: [MeshDecl; 4],
    pub layers: [TreeLayerDecl; 4],
    pub layer_material: Material,
    pub star_shape: Shape,
    pub star_position: [f32; 3],
    pub star_material: Material,
    pub ornament_segments: u32,
    pub ornament_metalness: f32,
    pub ornament_roughness: f32,
    pub sparkles: SparkleConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitLimits,
    pub post: PostConfig,
    pub hud: HudText,
}

impl SceneConfig {
    pub fn christmas() -> Self {
        Self {
            background: NIGHT,
            fog: Fog {
                color: NIGHT,
                near: 12.0,
                far: 40.0,
            },
            ambient: 0.15,
            key_light: SpotLight {
                color: GOLD,
                intensity: 1.5,
                position: [6.0, 10.0, 6.0],
                angle: 0.6,
                penumbra: 0.6,
            },
            fill_light: SpotLight {
                color: 0x22c55e,
                intensity: 0.9,
                position: [-5.0, 7.0, -4.0],
                angle: 0.7,
                penumbra: 0.8,
            },
            top_light: DirectionalLight {
                color: 0xfefce8,
                intensity: 0.25,
                position: [0.0, 6.0, 0.0],
            },
            environment: EnvironmentProbe {
                preset: "studio",
                sky: 0xe2e8f0,
                ground: 0x1e293b,
                intensity: 0.35,
            },
            fixtures: [
                MeshDecl {
                    label: "podium",
                    shape: Shape::Disc {
                        radius: 4.0,
                        segments: 64,
                    },
                    position: [0.0, -0.01, 0.0],
                    rotation: [-std::f32::consts::FRAC_PI_2, 0.0, 0.0],
                    material: Material::metal(EMERALD_DARK, 0.8, 0.2),
                },
                MeshDecl {
                    label: "base",
                    shape: Shape::Frustum {
                        radius_top: 1.6,
                        radius_bottom: 1.8,
                        height: 0.25,
                        segments: 64,
                    },
                    position: [0.0, 0.0, 0.0],
                    rotation: [0.0; 3],
                    material: Material::metal(EMERALD_DARK, 0.9, 0.25).glowing(EMERALD_DARK, 0.3),
                },
                MeshDecl {
                    label: "plinth",
                    shape: Shape::Frustum {
                        radius_top: 1.4,
                        radius_bottom: 1.6,
                        height: 0.18,
                        segments: 64,
                    },
                    position: [0.0, 0.25, 0.0],
                    rotation: [0.0; 3],
                    material: Material::metal(GOLD, 1.0, 0.18).glowing(GOLD, 0.25),
                },
                MeshDecl {
                    label: "trunk",
                    shape: Shape::Frustum {
                        radius_top: 0.18,
                        radius_bottom: 0.24,
                        height: 0.9,
                        segments: 32,
                    },
                    position: [0.0, 0.7, 0.0],
                    rotation: [0.0; 3],
                    material: Material::metal(0x78350f, 0.9, 0.35).glowing(0x451a03, 0.3),
                },
            ],
            layers: [
                TreeLayerDecl {
                    y: 1.3,
                    radius: 1.25,
                    height: 1.2,
                    tilt: 0.02,
                },
                TreeLayerDecl {
                    y: 1.9,
                    radius: 1.0,
                    height: 1.0,
                    tilt: -0.025,
                },
                TreeLayerDecl {
                    y: 2.4,
                    radius: 0.8,
                    height: 0.8,
                    tilt: 0.03,
                },
                TreeLayerDecl {
                    y: 2.8,
                    radius: 0.55,
                    height: 0.7,
                    tilt: -0.02,
                },
            ],
            layer_material: Material {
                opacity: 0.96,
                ..Material::metal(EMERALD, 0.7, 0.25).glowing(EMERALD, 0.35)
            },
            star_shape: Shape::Octahedron {
                radius: 0.32,
                detail: 1,
            },
            star_position: STAR_BASE,
            star_material: Material::metal(GOLD, 1.0, 0.1).glowing(GOLD, 0.6),
            ornament_segments: 32,
            ornament_metalness: 1.0,
            ornament_roughness: 0.15,
            sparkles: SparkleConfig {
                count: SPARKLE_COUNT,
                speed: SPARKLE_SPEED,
                opacity: SPARKLE_OPACITY,
                scale: SPARKLE_BOX,
                size: 3.0,
                color: GOLD,
            },
            camera: CameraConfig {
                eye: [0.0, 2.4, 7.0],
                fov_deg: 40.0,
                znear: 0.1,
                zfar: 100.0,
            },
            orbit: OrbitLimits {
                target: [0.0, 1.7, 0.0],
                enable_pan: false,
                min_distance: 4.0,
                max_distance: 10.0,
                max_polar: std::f32::consts::PI / 1.9,
            },
            post: PostConfig {
                bloom: BloomConfig {
                    intensity: 0.7,
                    luminance_threshold: 0.6,
                    luminance_smoothing: 0.2,
                    radius: 0.6,
                },
                vignette: VignetteConfig {
                    offset: 0.3,
                    darkness: 0.7,
                },
            },
            hud: HudText {
                brand: "Winter Workshop",
                title: "Merry Christmas",
                subtitle: "Warm lights and warmer wishes for the season",
            },
        }
    }
}
