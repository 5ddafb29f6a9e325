use super::helpers;
use super::instances::{FrameInstances, InstanceData, MeshSlot};
use super::mesh::{self, Vertex};
use super::targets::RenderTargets;
use crate::constants::MAX_INSTANCES;
use crate::core::{srgb_to_linear, SceneConfig, Shape, SpotLight};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    sky: [f32; 4],
    ground: [f32; 4],
    key_pos: [f32; 4],
    key_color: [f32; 4], // w = cos(inner cone)
    key_dir: [f32; 4],   // w = cos(outer cone)
    fill_pos: [f32; 4],
    fill_color: [f32; 4],
    fill_dir: [f32; 4],
    top_dir: [f32; 4],
    top_color: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4], // near, far
}

fn rgb_scaled(hex: u32, k: f32, w: f32) -> [f32; 4] {
    let [r, g, b] = srgb_to_linear(hex);
    [r * k, g * k, b * k, w]
}

/// Spot lights aim at the origin.
fn pack_spot(light: &SpotLight) -> ([f32; 4], [f32; 4], [f32; 4]) {
    let pos = Vec3::from_array(light.position);
    let dir = (-pos).normalize_or_zero();
    let cos_outer = light.angle.cos();
    let cos_inner = (light.angle * (1.0 - light.penumbra)).cos().max(cos_outer + 1e-3);
    (
        pos.extend(1.0).to_array(),
        rgb_scaled(light.color, light.intensity, cos_inner),
        dir.extend(cos_outer).to_array(),
    )
}

pub(crate) fn scene_uniforms(config: &SceneConfig, view_proj: Mat4, eye: Vec3) -> SceneUniforms {
    let (key_pos, key_color, key_dir) = pack_spot(&config.key_light);
    let (fill_pos, fill_color, fill_dir) = pack_spot(&config.fill_light);
    let top = &config.top_light;
    let env = &config.environment;
    SceneUniforms {
        view_proj: view_proj.to_cols_array_2d(),
        eye: eye.extend(1.0).to_array(),
        ambient: [config.ambient, config.ambient, config.ambient, 0.0],
        sky: rgb_scaled(env.sky, env.intensity, 0.0),
        ground: rgb_scaled(env.ground, env.intensity, 0.0),
        key_pos,
        key_color,
        key_dir,
        fill_pos,
        fill_color,
        fill_dir,
        top_dir: Vec3::from_array(top.position)
            .normalize_or_zero()
            .extend(0.0)
            .to_array(),
        top_color: rgb_scaled(top.color, top.intensity, 0.0),
        fog_color: rgb_scaled(config.fog.color, 1.0, 0.0),
        fog_range: [config.fog.near, config.fog.far, 0.0, 0.0],
    }
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, shape: &Shape) -> Self {
        let data = mesh::build(shape);
        Self {
            vertex_buffer: helpers::create_vertex_buffer(device, label, &data.vertices),
            index_buffer: helpers::create_index_buffer(device, label, &data.indices),
            index_count: data.indices.len() as u32,
        }
    }
}

pub(crate) struct ScenePass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    fixtures: Vec<GpuMesh>,
    layers: Vec<GpuMesh>,
    star: GpuMesh,
    sphere: GpuMesh,
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
];

const fn vec4_attr(index: u64, shader_location: u32) -> wgpu::VertexAttribute {
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: index * 16,
        shader_location,
    }
}

// model columns, color, emissive, material
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 7] = [
    vec4_attr(0, 2),
    vec4_attr(1, 3),
    vec4_attr(2, 4),
    vec4_attr(3, 5),
    vec4_attr(4, 6),
    vec4_attr(5, 7),
    vec4_attr(6, 8),
];

pub(crate) fn create_scene_pass(device: &wgpu::Device, config: &SceneConfig) -> ScenePass {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instances"),
        size: (MAX_INSTANCES * std::mem::size_of::<InstanceData>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRIBUTES,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // open cones and the podium are seen from both sides
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: super::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: super::HDR_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let fixtures = config
        .fixtures
        .iter()
        .map(|f| GpuMesh::upload(device, f.label, &f.shape))
        .collect();
    let layers = config
        .layers
        .iter()
        .map(|l| {
            GpuMesh::upload(
                device,
                "tree_layer",
                &Shape::OpenCone {
                    radius: l.radius,
                    height: l.height,
                    segments: 48,
                },
            )
        })
        .collect();
    let star = GpuMesh::upload(device, "star", &config.star_shape);
    let sphere = GpuMesh::upload(
        device,
        "sphere",
        &Shape::Sphere {
            radius: 1.0,
            segments: config.ornament_segments,
        },
    );

    ScenePass {
        pipeline,
        uniform_buffer,
        bind_group,
        instance_buffer,
        fixtures,
        layers,
        star,
        sphere,
    }
}

impl ScenePass {
    fn mesh(&self, slot: MeshSlot) -> Option<&GpuMesh> {
        match slot {
            MeshSlot::Fixture(i) => self.fixtures.get(i),
            MeshSlot::Layer(i) => self.layers.get(i),
            MeshSlot::Star => Some(&self.star),
            MeshSlot::Sphere => Some(&self.sphere),
        }
    }

    pub(crate) fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        clear: wgpu::Color,
        uniforms: &SceneUniforms,
        frame: &FrameInstances,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        if !frame.instances.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&frame.instances),
            );
        }

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &targets.hdr_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        for batch in &frame.batches {
            let Some(mesh) = self.mesh(batch.mesh) else {
                continue;
            };
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
        }
    }
}
