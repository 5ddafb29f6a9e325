// Procedural geometry for the scene's primitive shapes.
//
// Conventions: triangles wind counter-clockwise seen from outside, round
// shapes sweep `theta` with `x = r·sin θ`, `z = r·cos θ`, and frusta/cones
// are centred on the origin along Y. The disc lies in the XY plane facing
// +Z, so it must be rotated to lie flat.

use crate::core::scene::Shape;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, pos: Vec3, normal: Vec3) -> u32 {
        self.vertices.push(Vertex {
            pos: pos.to_array(),
            normal: normal.to_array(),
        });
        (self.vertices.len() - 1) as u32
    }

    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

pub fn build(shape: &Shape) -> MeshData {
    match *shape {
        Shape::Disc { radius, segments } => disc(radius, segments),
        Shape::Frustum {
            radius_top,
            radius_bottom,
            height,
            segments,
        } => frustum(radius_top, radius_bottom, height, segments, true),
        Shape::OpenCone {
            radius,
            height,
            segments,
        } => frustum(0.0, radius, height, segments, false),
        Shape::Sphere { radius, segments } => sphere(radius, segments),
        Shape::Octahedron { radius, detail } => octahedron(radius, detail),
    }
}

#[inline]
fn ring(theta: f32) -> Vec3 {
    Vec3::new(theta.sin(), 0.0, theta.cos())
}

fn disc(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut m = MeshData::default();
    let center = m.push(Vec3::ZERO, Vec3::Z);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        m.push(
            Vec3::new(theta.cos(), theta.sin(), 0.0) * radius,
            Vec3::Z,
        );
    }
    for i in 0..segments {
        m.tri(center, 1 + i, 2 + i);
    }
    m
}

fn frustum(radius_top: f32, radius_bottom: f32, height: f32, segments: u32, capped: bool) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(1e-6);
    let mut m = MeshData::default();

    let mut bottom = Vec::with_capacity(segments as usize + 1);
    let mut top = Vec::with_capacity(segments as usize + 1);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let dir = ring(theta);
        let normal = Vec3::new(dir.x, slope, dir.z).normalize();
        bottom.push(m.push(dir * radius_bottom + Vec3::Y * -half, normal));
        top.push(m.push(dir * radius_top + Vec3::Y * half, normal));
    }
    for i in 0..segments as usize {
        m.tri(bottom[i], bottom[i + 1], top[i + 1]);
        m.tri(bottom[i], top[i + 1], top[i]);
    }

    if capped {
        for (y, radius, normal) in [(half, radius_top, Vec3::Y), (-half, radius_bottom, Vec3::NEG_Y)] {
            if radius <= 0.0 {
                continue;
            }
            let center = m.push(Vec3::Y * y, normal);
            let first = m.vertices.len() as u32;
            for i in 0..=segments {
                let theta = i as f32 / segments as f32 * TAU;
                m.push(ring(theta) * radius + Vec3::Y * y, normal);
            }
            for i in 0..segments {
                if normal.y > 0.0 {
                    m.tri(center, first + i, first + i + 1);
                } else {
                    m.tri(center, first + i + 1, first + i);
                }
            }
        }
    }
    m
}

fn sphere(radius: f32, segments: u32) -> MeshData {
    let cols = segments.max(3);
    let rows = (segments / 2).max(2);
    let mut m = MeshData::default();
    for r in 0..=rows {
        let phi = r as f32 / rows as f32 * PI;
        for c in 0..=cols {
            let theta = c as f32 / cols as f32 * TAU;
            let n = Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());
            m.push(n * radius, n);
        }
    }
    let stride = cols + 1;
    for r in 0..rows {
        for c in 0..cols {
            let a = r * stride + c;
            let b = a + 1;
            let below = a + stride;
            let below_b = below + 1;
            if r != 0 {
                m.tri(a, below, below_b);
            }
            if r != rows - 1 {
                m.tri(a, below_b, b);
            }
        }
    }
    m
}

/// Octahedron with each face split `detail` times and pushed onto the
/// sphere. Facets keep flat normals so the star reads as cut glass.
fn octahedron(radius: f32, detail: u32) -> MeshData {
    let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let mut faces: Vec<[Vec3; 3]> = Vec::with_capacity(8);
    for &y in &axes[2..4] {
        for (a, b) in [(0, 4), (4, 1), (1, 5), (5, 0)] {
            faces.push(outward([y, axes[a], axes[b]]));
        }
    }
    for _ in 0..detail {
        faces = faces
            .into_iter()
            .flat_map(|[a, b, c]| {
                let ab = (a + b).normalize();
                let bc = (b + c).normalize();
                let ca = (c + a).normalize();
                [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]]
            })
            .collect();
    }
    let mut m = MeshData::default();
    for [a, b, c] in faces {
        let n = (b - a).cross(c - a).normalize();
        let ia = m.push(a * radius, n);
        let ib = m.push(b * radius, n);
        let ic = m.push(c * radius, n);
        m.tri(ia, ib, ic);
    }
    m
}

/// Reorder a triangle around the origin so it winds counter-clockwise
/// seen from outside.
fn outward([a, b, c]: [Vec3; 3]) -> [Vec3; 3] {
    let n = (b - a).cross(c - a);
    if n.dot(a + b + c) >= 0.0 {
        [a, b, c]
    } else {
        [a, c, b]
    }
}
