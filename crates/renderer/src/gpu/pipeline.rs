use wgpu::naga::ShaderStage;
use wgpu::util::DeviceExt;

use crate::compile::{self, compile_shader};
use crate::geometry::{QuadVertex, RingVertex, QUAD_VERTICES};
use crate::gpu::uniforms::{BackgroundUniforms, CircleUniforms};
use crate::types::{RendererError, ShaderCompiler};

/// Bind-group layout shared by both effect programs: a single std140
/// uniform block visible to both stages.
pub(crate) struct PipelineLayouts {
    pub uniform_layout: wgpu::BindGroupLayout,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        Self { uniform_layout }
    }
}

/// One compiled effect program together with the GPU objects it draws from.
///
/// This is the counterpart of a linked GL program plus its resolved
/// uniform/attribute handles: the binding layout is fixed at creation, so
/// activating the effect is just `set_pipeline` + `set_bind_group`.
pub(crate) struct EffectPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl EffectPipeline {
    #[allow(clippy::too_many_arguments)]
    fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        label: &'static str,
        vertex_source: &str,
        fragment_source: &str,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        vertex_data: &[u8],
        vertex_count: u32,
        uniform_contents: &[u8],
        compiler: ShaderCompiler,
    ) -> Result<Self, RendererError> {
        let vertex_module =
            compile_shader(device, vertex_source, ShaderStage::Vertex, label, compiler)?;
        let fragment_module =
            compile_shader(device, fragment_source, ShaderStage::Fragment, label, compiler)?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: vertex_data,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: uniform_contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&layouts.uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_count,
            uniform_buffer,
            bind_group,
        })
    }

    /// Builds the background gradient program over the full-screen quad.
    pub fn background(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        compiler: ShaderCompiler,
    ) -> Result<Self, RendererError> {
        Self::new(
            device,
            layouts,
            surface_format,
            sample_count,
            "background",
            compile::BACKGROUND_VERTEX,
            compile::BACKGROUND_FRAGMENT,
            QuadVertex::layout(),
            bytemuck::cast_slice(&QUAD_VERTICES),
            QUAD_VERTICES.len() as u32,
            bytemuck::bytes_of(&BackgroundUniforms::new()),
            compiler,
        )
    }

    /// Builds the ring program over the generated strip geometry.
    pub fn circle(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        ring: &[RingVertex],
        uniforms: &CircleUniforms,
        compiler: ShaderCompiler,
    ) -> Result<Self, RendererError> {
        Self::new(
            device,
            layouts,
            surface_format,
            sample_count,
            "circle",
            compile::CIRCLE_VERTEX,
            compile::CIRCLE_FRAGMENT,
            RingVertex::layout(),
            bytemuck::cast_slice(ring),
            ring.len() as u32,
            bytemuck::bytes_of(uniforms),
            compiler,
        )
    }
}
