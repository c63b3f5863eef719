use std::rc::Rc;

use glow::HasContext;

use crate::buffer::{IndexBuffer, VertexArray};
use crate::device::error::gl_check;
use crate::device::{GlHandle, GpuError};
use crate::shader::Program;

/// Issues clear and indexed draw calls.
pub struct Renderer {
    gl: GlHandle,
}

impl Renderer {
    pub fn new(gl: &GlHandle) -> Self {
        Self { gl: Rc::clone(gl) }
    }

    pub fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) };
    }

    pub fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) };
    }

    /// Clears the color and depth buffers.
    pub fn clear(&self) {
        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT)
        };
    }

    /// Draws `indices.count()` indices as triangles with `program`.
    ///
    /// Binds the program, the vertex array, and the index buffer before
    /// issuing the call; a driver-reported error comes back annotated with
    /// the call site, and the caller decides whether it is fatal.
    pub fn draw(
        &self,
        vertices: &VertexArray,
        indices: &IndexBuffer,
        program: &Program,
    ) -> Result<(), GpuError> {
        program.bind();
        vertices.bind();
        let _bound = indices.bind_scoped();

        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                indices.count() as i32,
                glow::UNSIGNED_INT,
                0,
            );
        }
        gl_check!(&self.gl, "glDrawElements(GL_TRIANGLES)")
    }
}
