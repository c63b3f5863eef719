use winit::window::Window;

use crate::device::GlContext;
use crate::time::FrameTime;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub gl: &'a GlContext,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    /// Drawable aspect ratio (width / height), guarded against a zero-height
    /// drawable while minimized.
    pub fn aspect_ratio(&self) -> f32 {
        let size = self.gl.size();
        size.width.max(1) as f32 / size.height.max(1) as f32
    }
}
