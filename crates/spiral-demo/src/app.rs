use anyhow::Result;

use spiral_engine::core::{App, AppControl, FrameCtx, StartCtx};
use spiral_engine::geometry::{build_spiral, SpiralParams};
use spiral_engine::render::{DrawParams, GeometryBuffer, RenderCtx, SpiralRenderer};
use spiral_engine::shader::{ShaderProgram, ShaderSource};

/// GPU objects that exist between `on_start` and `on_exit`.
struct Scene {
    renderer: SpiralRenderer,
    geometry: GeometryBuffer,
}

/// One shader program, one spiral, one line-strip draw per frame.
pub struct SpiralApp {
    shader: ShaderSource,
    spiral: SpiralParams,
    draw: DrawParams,
    scene: Option<Scene>,
}

impl Default for SpiralApp {
    fn default() -> Self {
        Self::new(ShaderSource::spiral(), SpiralParams::default(), DrawParams::default())
    }
}

impl SpiralApp {
    pub fn new(shader: ShaderSource, spiral: SpiralParams, draw: DrawParams) -> Self {
        Self {
            shader,
            spiral,
            draw,
            scene: None,
        }
    }

    /// Builds the program, uploads the spiral and creates the pipeline.
    fn prepare(&mut self, rctx: &RenderCtx<'_>) -> Result<()> {
        let program = ShaderProgram::build(&self.shader)?;

        let vertices = build_spiral(&self.spiral);
        let geometry = GeometryBuffer::upload(rctx.device, "spiral vertices", &vertices);
        let renderer = SpiralRenderer::new(rctx, &program, &self.draw)?;

        log::info!(
            "spiral ready: {} vertices, shader `{}`",
            geometry.vertex_count(),
            program.name()
        );

        self.scene = Some(Scene { renderer, geometry });
        Ok(())
    }
}

impl App for SpiralApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<()> {
        self.prepare(&ctx.render_ctx())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_ref() else {
            return AppControl::Skip;
        };

        ctx.render(self.draw.clear, |_rctx, target| {
            scene.renderer.render(target, &scene.geometry);
        })
    }

    fn on_exit(&mut self) {
        if let Some(Scene { renderer, geometry }) = self.scene.take() {
            geometry.release();
            drop(renderer);
        }
    }
}
