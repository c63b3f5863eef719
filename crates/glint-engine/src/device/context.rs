use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::GlHandle;

/// Initialization parameters for the GL layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when
/// a concrete platform requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested core context version.
    pub gl_version: (u8, u8),

    /// Depth buffer bits requested from the config template.
    pub depth_bits: u8,

    /// Block buffer swaps on vertical sync.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            gl_version: (3, 3),
            depth_bits: 24,
            vsync: true,
        }
    }
}

/// Owns the GL display, surface, and current context for one window.
///
/// The context is thread-affine: it is created on the main thread and every
/// GL command is issued from there. Nothing in this type is `Send`.
pub struct GlContext {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: GlHandle,
    size: PhysicalSize<u32>,
}

impl GlContext {
    /// Creates the window together with a current GL context.
    ///
    /// glutin requires config selection and window creation to happen in one
    /// step; the window is handed back to the runtime, which keeps it alive
    /// for the lifetime of this context.
    pub fn create(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        init: &GlInit,
    ) -> Result<(Window, Self)> {
        let template = ConfigTemplateBuilder::new().with_depth_size(init.depth_bits);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |mut configs| {
                // The template already constrains depth/surface support;
                // the first match is good enough for a single-window app.
                configs.next().expect("glutin produced no matching GL configs")
            })
            .map_err(|e| anyhow!("failed to create window and pick a GL config: {e}"))?;
        let window = window.ok_or_else(|| anyhow!("display builder returned no window"))?;

        let raw_handle = window
            .window_handle()
            .map_err(|e| anyhow!("window has no native handle: {e}"))?
            .as_raw();
        let display = gl_config.display();

        let (major, minor) = init.gl_version;
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_handle));

        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .map_err(|e| anyhow!("failed to create GL context: {e}"))?;

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| anyhow!("failed to build surface attributes: {e}"))?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(|e| anyhow!("failed to create GL surface: {e}"))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| anyhow!("failed to make GL context current: {e}"))?;

        let gl =
            unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        log::info!("GL ready: {}", unsafe {
            gl.get_parameter_string(glow::VERSION)
        });

        let size = window.inner_size();
        let this = Self {
            surface,
            context,
            gl: Rc::new(gl),
            size,
        };
        unsafe {
            this.gl
                .viewport(0, 0, size.width.max(1) as i32, size.height.max(1) as i32)
        };

        Ok((window, this))
    }

    /// Shared glow function table, handed to GL resource types.
    pub fn gl(&self) -> &GlHandle {
        &self.gl
    }

    /// Current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the drawable and the GL viewport.
    ///
    /// A zero-sized drawable (minimized window) only updates internal state;
    /// surface resize is deferred until the window has area again.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        let (Some(w), Some(h)) = (
            NonZeroU32::new(new_size.width),
            NonZeroU32::new(new_size.height),
        ) else {
            return;
        };

        self.surface.resize(&self.context, w, h);
        unsafe {
            self.gl
                .viewport(0, 0, new_size.width as i32, new_size.height as i32)
        };
    }

    /// Presents the back buffer.
    ///
    /// Under vsync this call blocks until the next vertical blank.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| anyhow!("buffer swap failed: {e}"))
    }
}
