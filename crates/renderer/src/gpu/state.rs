use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::geometry;
use crate::gpu::context::GpuContext;
use crate::gpu::pipeline::{EffectPipeline, PipelineLayouts};
use crate::gpu::uniforms::CircleUniforms;
use crate::runtime::TimeSample;
use crate::scene;
use crate::types::{RendererConfig, RendererError, ShaderCompiler};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Scene resources that exist once both programs compiled.
struct ScenePipelines {
    background: EffectPipeline,
    circle: EffectPipeline,
    circle_uniforms: CircleUniforms,
}

/// Whether the surface ever became drawable.
///
/// `Degraded` is terminal: it is entered when the build carries no shader
/// backend or when program setup fails, and every frame from then on only
/// clears the surface.
enum ScenePhase {
    Ready(ScenePipelines),
    Degraded(RendererError),
}

/// Aggregates every GPU resource needed to present a frame.
pub(crate) struct GpuState {
    context: GpuContext,
    multisample_target: Option<MultisampleTarget>,
    phase: ScenePhase,
}

impl GpuState {
    /// Creates the GPU state for the supplied surface target.
    ///
    /// Environment failures (no adapter, no device) abort with an error;
    /// missing shader support and compilation failures instead produce a
    /// degraded state so the window still opens and presents cleared
    /// frames, mirroring how the effect behaves on unsupported hardware.
    pub(crate) fn new<T>(
        target: &T,
        size: PhysicalSize<u32>,
        config: &RendererConfig,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, size, config.antialiasing)?;

        let phase = match config.shader_compiler.or_else(ShaderCompiler::detect) {
            None => ScenePhase::Degraded(RendererError::UnsupportedCapability),
            Some(compiler) => match Self::build_scene(&context, config, compiler) {
                Ok(scene) => ScenePhase::Ready(scene),
                Err(err) => ScenePhase::Degraded(err),
            },
        };

        let multisample_target = (context.sample_count > 1).then(|| {
            MultisampleTarget::new(
                &context.device,
                context.surface_format,
                context.size,
                context.sample_count,
            )
        });

        Ok(Self {
            context,
            multisample_target,
            phase,
        })
    }

    fn build_scene(
        context: &GpuContext,
        config: &RendererConfig,
        compiler: ShaderCompiler,
    ) -> Result<ScenePipelines, RendererError> {
        let layouts = PipelineLayouts::new(&context.device);
        let mut rng = match config.geometry_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ring = geometry::generate_ring(&mut rng);
        let circle_uniforms = CircleUniforms::new(context.size.width, context.size.height);

        let background = EffectPipeline::background(
            &context.device,
            &layouts,
            context.surface_format,
            context.sample_count,
            compiler,
        )?;
        let circle = EffectPipeline::circle(
            &context.device,
            &layouts,
            context.surface_format,
            context.sample_count,
            &ring,
            &circle_uniforms,
            compiler,
        )?;

        debug!(
            ring_vertices = ring.len(),
            %compiler,
            "scene pipelines ready"
        );

        Ok(ScenePipelines {
            background,
            circle,
            circle_uniforms,
        })
    }

    /// The error that forced the degraded state, if any.
    pub(crate) fn capability_error(&self) -> Option<&RendererError> {
        match &self.phase {
            ScenePhase::Degraded(err) => Some(err),
            ScenePhase::Ready(_) => None,
        }
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reconfigures the swapchain and refreshes the aspect-ratio uniform so
    /// rings stay circular under the new viewport.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.context.resize(new_size);
        if self.context.sample_count > 1 {
            self.multisample_target = Some(MultisampleTarget::new(
                &self.context.device,
                self.context.surface_format,
                self.context.size,
                self.context.sample_count,
            ));
        }

        if let ScenePhase::Ready(scene) = &mut self.phase {
            scene
                .circle_uniforms
                .set_aspect_ratio(self.context.size.width, self.context.size.height);
            self.context.queue.write_buffer(
                &scene.circle.uniform_buffer,
                0,
                bytemuck::bytes_of(&scene.circle_uniforms),
            );
        }
    }

    /// Records and submits one frame.
    ///
    /// Ready surfaces advance the ring offsets from the time sample and
    /// draw the background quad plus five ring instances; degraded surfaces
    /// only clear.
    pub(crate) fn render(&mut self, sample: TimeSample) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        if let ScenePhase::Ready(scene) = &mut self.phase {
            let angle = scene::cycle_angle(sample.seconds);
            scene
                .circle_uniforms
                .set_offsets(scene::ring_offsets(angle));
            self.context.queue.write_buffer(
                &scene.circle.uniform_buffer,
                0,
                bytemuck::bytes_of(&scene.circle_uniforms),
            );
        }

        let (attachment_view, resolve_target) = match self.multisample_target.as_ref() {
            Some(msaa) => (&msaa.view, Some(&view)),
            None => (&view, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let ScenePhase::Ready(scene) = &self.phase {
                render_pass.set_pipeline(&scene.background.pipeline);
                render_pass.set_bind_group(0, &scene.background.bind_group, &[]);
                render_pass.set_vertex_buffer(0, scene.background.vertex_buffer.slice(..));
                render_pass.draw(0..scene.background.vertex_count, 0..1);

                render_pass.set_pipeline(&scene.circle.pipeline);
                render_pass.set_bind_group(0, &scene.circle.bind_group, &[]);
                render_pass.set_vertex_buffer(0, scene.circle.vertex_buffer.slice(..));
                render_pass.draw(0..scene.circle.vertex_count, 0..scene::RING_INSTANCES as u32);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

struct MultisampleTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl MultisampleTarget {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa color"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}
