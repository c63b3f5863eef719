//! Rotating textured cube demo.
//!
//! Builds all GPU resources once at startup (shader program from a combined
//! asset, interleaved vertex buffer + layout, index buffer, texture), then
//! redraws the cube every frame with updated transform uniforms until the
//! window closes.

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use glint_engine::buffer::{IndexBuffer, VertexArray, VertexBuffer};
use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::device::{GlContext, GlHandle};
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::render::Renderer;
use glint_engine::shader::{MarkerPolicy, Program, parse_shader_asset};
use glint_engine::texture::Texture2d;
use glint_engine::window::{Runtime, RuntimeConfig};

mod mesh;

/// Combined vertex + fragment source, split at startup.
const SHADER_ASSET: &str = include_str!("../res/shaders/basic.shader");

const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/textures/checker.png");

/// GPU resources built in `on_ready`, drawn every frame.
struct Scene {
    renderer: Renderer,
    program: Program,
    vertex_array: VertexArray,
    indices: IndexBuffer,
    texture: Option<Texture2d>,
    /// The vertex array references this buffer's memory; it must outlive
    /// every draw.
    _vertices: VertexBuffer,
}

#[derive(Default)]
struct CubeApp {
    scene: Option<Scene>,
    angle: f32,
}

impl App for CubeApp {
    fn on_ready(&mut self, ctx: &GlContext) -> Result<()> {
        let gl = ctx.gl();

        let sources = parse_shader_asset(SHADER_ASSET, MarkerPolicy::Reject)
            .context("bad shader asset")?;
        let program = Program::build(gl, &sources).context("shader program build failed")?;

        let vertices =
            VertexBuffer::from_slice(gl, &mesh::VERTICES).context("vertex upload failed")?;
        let mut vertex_array = VertexArray::new(gl).context("vertex array creation failed")?;
        vertex_array
            .attach(&vertices, &mesh::layout())
            .context("attribute setup failed")?;
        let indices = IndexBuffer::new(gl, &mesh::INDICES).context("index upload failed")?;

        // Texture load failure is soft: the cube renders untextured.
        let texture = match load_texture(gl, TEXTURE_PATH) {
            Ok(texture) => Some(texture),
            Err(err) => {
                log::warn!("texture load failed, continuing untextured: {err:#}");
                None
            }
        };

        let renderer = Renderer::new(gl);
        renderer.enable_depth_test();
        renderer.set_clear_color(0.08, 0.08, 0.10, 1.0);

        program.set_i32("u_texture", 0);

        self.scene = Some(Scene {
            renderer,
            program,
            vertex_array,
            indices,
            texture,
            _vertices: vertices,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = self.scene.as_ref() else {
            return AppControl::Continue;
        };

        self.angle += ctx.time.dt;

        scene.renderer.clear();

        let proj = Mat4::perspective_rh_gl(45f32.to_radians(), ctx.aspect_ratio(), 0.1, 100.0);
        let model = Mat4::from_axis_angle(Vec3::ONE.normalize(), self.angle);
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));

        scene.program.set_f32("scale", 1.0);
        scene.program.set_mat4("proj", &proj);
        scene.program.set_mat4("model", &model);
        scene.program.set_mat4("view", &view);

        if let Some(texture) = &scene.texture {
            texture.bind(0);
        }

        // A draw error is diagnostic, not fatal; keep rendering.
        if let Err(err) = scene
            .renderer
            .draw(&scene.vertex_array, &scene.indices, &scene.program)
        {
            log::error!("draw failed: {err}");
        }

        AppControl::Continue
    }
}

fn load_texture(gl: &GlHandle, path: &str) -> Result<Texture2d> {
    let image = image::open(path)
        .with_context(|| format!("failed to open {path}"))?
        .flipv()
        .to_rgb8();
    let (width, height) = image.dimensions();
    Texture2d::from_rgb(gl, width, height, image.as_raw()).context("texture upload failed")
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "glint cube".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, CubeApp::default())
}
