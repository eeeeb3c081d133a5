//! Forward render pipeline for the scene
//!
//! Three pipelines share one shader and one uniform bind group:
//! opaque triangles (depth write), translucent triangles (alpha blend,
//! depth test only), and helper lines. Everything is drawn double-sided.
//! Each geometry layer owns its own vertex buffers, so re-uploading the
//! animated layer leaves the static buffers alone.

use wgpu::util::DeviceExt;

use super::types::{SceneUniforms, Vertex3D};
use crate::renderable::{GeometryLayer, RenderableGeometry};

/// Depth buffer format
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Which of the three passes a pipeline is built for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PassKind {
    Opaque,
    Transparent,
    Lines,
}

impl PassKind {
    fn label(self) -> &'static str {
        match self {
            PassKind::Opaque => "Opaque Pipeline",
            PassKind::Transparent => "Transparent Pipeline",
            PassKind::Lines => "Line Pipeline",
        }
    }

    fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PassKind::Lines => wgpu::PrimitiveTopology::LineList,
            _ => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn blend(self) -> Option<wgpu::BlendState> {
        match self {
            PassKind::Transparent => Some(wgpu::BlendState::ALPHA_BLENDING),
            _ => Some(wgpu::BlendState::REPLACE),
        }
    }

    fn depth_write(self) -> bool {
        self != PassKind::Transparent
    }
}

/// A vertex buffer that grows as needed
struct GpuBatch {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    count: u32,
}

impl GpuBatch {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
            count: 0,
        }
    }

    /// Upload vertices, reallocating only when they no longer fit
    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex3D]) {
        self.count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }
        match &self.buffer {
            Some(buffer) if vertices.len() <= self.capacity => {
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
            }
            _ => {
                self.buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(self.label),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                }));
                self.capacity = vertices.len();
            }
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        let Some(buffer) = &self.buffer else { return };
        if self.count > 0 {
            pass.set_pipeline(pipeline);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..self.count, 0..1);
        }
    }
}

/// Vertex label for one pass of one layer
fn batch_label(layer: GeometryLayer, pass: PassKind) -> &'static str {
    match (layer, pass) {
        (GeometryLayer::Static, PassKind::Opaque) => "Static Opaque Vertex Buffer",
        (GeometryLayer::Static, PassKind::Transparent) => "Static Transparent Vertex Buffer",
        (GeometryLayer::Static, PassKind::Lines) => "Static Line Vertex Buffer",
        (GeometryLayer::Animated, PassKind::Opaque) => "Animated Opaque Vertex Buffer",
        (GeometryLayer::Animated, PassKind::Transparent) => "Animated Transparent Vertex Buffer",
        (GeometryLayer::Animated, PassKind::Lines) => "Animated Line Vertex Buffer",
    }
}

/// The three vertex batches of one geometry layer
struct LayerBatches {
    opaque: GpuBatch,
    transparent: GpuBatch,
    lines: GpuBatch,
}

impl LayerBatches {
    fn new(layer: GeometryLayer) -> Self {
        Self {
            opaque: GpuBatch::new(batch_label(layer, PassKind::Opaque)),
            transparent: GpuBatch::new(batch_label(layer, PassKind::Transparent)),
            lines: GpuBatch::new(batch_label(layer, PassKind::Lines)),
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, geometry: &RenderableGeometry) {
        self.opaque.upload(device, queue, &geometry.opaque);
        self.transparent.upload(device, queue, &geometry.transparent);
        self.lines.upload(device, queue, &geometry.lines);
    }
}

/// Render pipeline for the scene
pub struct ScenePipeline {
    opaque: wgpu::RenderPipeline,
    transparent: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    /// Uniform buffer
    uniform_buffer: wgpu::Buffer,
    /// Bind group for uniforms
    bind_group: wgpu::BindGroup,
    static_batches: LayerBatches,
    animated_batches: LayerBatches,
    /// Depth texture
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl ScenePipeline {
    /// Create the pipelines and a depth texture of the given size
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });

        let build = |kind: PassKind| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(kind.label()),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Self::vertex_buffer_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: kind.blend(),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: kind.topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: kind.depth_write(),
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let opaque = build(PassKind::Opaque);
        let transparent = build(PassKind::Transparent);
        let lines = build(PassKind::Lines);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let (width, height) = (width.max(1), height.max(1));
        Self {
            opaque,
            transparent,
            lines,
            uniform_buffer,
            bind_group,
            static_batches: LayerBatches::new(GeometryLayer::Static),
            animated_batches: LayerBatches::new(GeometryLayer::Animated),
            depth_view: Self::create_depth_view(device, width, height),
            depth_size: (width, height),
        }
    }

    /// Get the vertex buffer layout for Vertex3D
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2,
                },
                // lit: f32
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 40,
                    shader_location: 3,
                },
            ],
        }
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreate the depth texture if the size changed
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let size = (width.max(1), height.max(1));
        if self.depth_size != size {
            self.depth_view = Self::create_depth_view(device, size.0, size.1);
            self.depth_size = size;
        }
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    fn batches(&self, layer: GeometryLayer) -> &LayerBatches {
        match layer {
            GeometryLayer::Static => &self.static_batches,
            GeometryLayer::Animated => &self.animated_batches,
        }
    }

    /// Replace one layer's vertex batches
    pub fn upload_geometry(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layer: GeometryLayer,
        geometry: &RenderableGeometry,
    ) {
        let batches = match layer {
            GeometryLayer::Static => &mut self.static_batches,
            GeometryLayer::Animated => &mut self.animated_batches,
        };
        batches.upload(device, queue, geometry);
    }

    /// Vertex counts currently on the GPU as (opaque, transparent, lines),
    /// summed over both layers
    pub fn vertex_counts(&self) -> (u32, u32, u32) {
        GeometryLayer::ALL.iter().fold((0, 0, 0), |(o, t, l), &layer| {
            let b = self.batches(layer);
            (o + b.opaque.count, t + b.transparent.count, l + b.lines.count)
        })
    }

    /// Clear the target and draw opaque, line, then translucent geometry
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, clear_color: wgpu::Color) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.bind_group, &[]);
        for layer in GeometryLayer::ALL {
            self.batches(layer).opaque.draw(&mut render_pass, &self.opaque);
        }
        for layer in GeometryLayer::ALL {
            self.batches(layer).lines.draw(&mut render_pass, &self.lines);
        }
        for layer in GeometryLayer::ALL {
            self.batches(layer).transparent.draw(&mut render_pass, &self.transparent);
        }
    }
}
