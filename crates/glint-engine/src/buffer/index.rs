use std::rc::Rc;

use glow::HasContext;

use crate::device::error::{gl_alloc_err, gl_check};
use crate::device::{GlHandle, GpuError};

/// GPU-resident copy of a `u32` index list.
///
/// Write-once, like [`VertexBuffer`](super::VertexBuffer). Index values are
/// not validated against any vertex buffer here; the mesh that owns both is
/// responsible for keeping every index below its vertex record count.
pub struct IndexBuffer {
    gl: GlHandle,
    raw: glow::NativeBuffer,
    count: usize,
}

impl IndexBuffer {
    /// Uploads `indices` into a new STATIC_DRAW element buffer.
    pub fn new(gl: &GlHandle, indices: &[u32]) -> Result<Self, GpuError> {
        let raw = unsafe { gl.create_buffer() }.map_err(|_| gl_alloc_err!(gl, "glGenBuffers"))?;
        unsafe {
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(raw));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
        }
        let upload = gl_check!(gl, "glBufferData(GL_ELEMENT_ARRAY_BUFFER)");
        unsafe { gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None) };

        match upload {
            Ok(()) => Ok(Self {
                gl: Rc::clone(gl),
                raw,
                count: indices.len(),
            }),
            Err(err) => {
                unsafe { gl.delete_buffer(raw) };
                Err(err)
            }
        }
    }

    /// Number of indices uploaded; the draw call consumes all of them.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Makes this buffer the active ELEMENT_ARRAY_BUFFER target. Idempotent.
    pub fn bind(&self) {
        unsafe {
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.raw))
        };
    }

    /// Restores the no-buffer-active state.
    pub fn unbind(&self) {
        unsafe { self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None) };
    }

    /// Binds for the lifetime of the returned guard; unbinds on drop.
    pub fn bind_scoped(&self) -> BoundIndexBuffer<'_> {
        self.bind();
        BoundIndexBuffer { buffer: self }
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.raw) };
    }
}

/// RAII guard keeping an [`IndexBuffer`] bound.
pub struct BoundIndexBuffer<'a> {
    buffer: &'a IndexBuffer,
}

impl Drop for BoundIndexBuffer<'_> {
    fn drop(&mut self) {
        self.buffer.unbind();
    }
}
