use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::GlContext;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary crate.
pub trait App {
    /// Called once, after the window and GL context exist.
    ///
    /// Build GPU resources (programs, buffers, textures) here. An error
    /// aborts startup: a broken shader program is not worth a black window.
    fn on_ready(&mut self, ctx: &GlContext) -> Result<()>;

    /// Called for window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame. The runtime swaps buffers after this
    /// returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
