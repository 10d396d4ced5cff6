use anyhow::{bail, Result};

use crate::render::{DrawParams, GeometryBuffer, RenderCtx, RenderTarget};
use crate::shader::ShaderProgram;

/// Draws a [`GeometryBuffer`] with one linked shader program.
///
/// The pipeline is built once for the surface format it was created with;
/// there is no per-frame state besides the render pass.
pub struct SpiralRenderer {
    pipeline: wgpu::RenderPipeline,
}

impl SpiralRenderer {
    /// Builds the render pipeline for `program`.
    ///
    /// Pipeline validation runs inside an error scope, so a program the device
    /// rejects comes back as an error instead of reaching the uncaptured-error
    /// handler.
    pub fn new(ctx: &RenderCtx<'_>, program: &ShaderProgram, params: &DrawParams) -> Result<Self> {
        for note in params.unsupported() {
            log::debug!("unsupported draw state: {note}");
        }

        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spiral vertex shader"),
            source: wgpu::ShaderSource::Wgsl(program.vertex().code.clone()),
        });
        let fragment_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spiral fragment shader"),
            source: wgpu::ShaderSource::Wgsl(program.fragment().code.clone()),
        });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("spiral pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(program.name()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(program.vertex().entry_point.as_ref()),
                compilation_options: Default::default(),
                buffers: &[GeometryBuffer::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(program.fragment().entry_point.as_ref()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: params.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Stage modules are only needed while the pipeline is created.
        drop(vertex_module);
        drop(fragment_module);

        if let Some(err) = pollster::block_on(scope.pop()) {
            bail!("render pipeline for `{}` rejected by the device: {err}", program.name());
        }

        Ok(Self { pipeline })
    }

    /// Records one draw of every vertex in `geometry` on top of the cleared target.
    pub fn render(&self, target: &mut RenderTarget<'_>, geometry: &GeometryBuffer) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("spiral pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, geometry.slice());
        rpass.draw(0..geometry.vertex_count(), 0..1);
    }
}
