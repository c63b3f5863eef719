use std::rc::Rc;

use glow::HasContext;

use crate::device::error::{gl_alloc_err, gl_check};
use crate::device::{GlHandle, GpuError};

/// GPU-resident copy of raw vertex data.
///
/// Write-once: the contents are uploaded at construction and never touched
/// again. The GL buffer object is deleted on `Drop`.
pub struct VertexBuffer {
    gl: GlHandle,
    raw: glow::NativeBuffer,
    len: usize,
}

impl VertexBuffer {
    /// Uploads `data` into a new STATIC_DRAW buffer.
    pub fn new(gl: &GlHandle, data: &[u8]) -> Result<Self, GpuError> {
        let raw = unsafe { gl.create_buffer() }.map_err(|_| gl_alloc_err!(gl, "glGenBuffers"))?;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(raw));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
        }
        let upload = gl_check!(gl, "glBufferData(GL_ARRAY_BUFFER)");
        unsafe { gl.bind_buffer(glow::ARRAY_BUFFER, None) };

        match upload {
            Ok(()) => Ok(Self {
                gl: Rc::clone(gl),
                raw,
                len: data.len(),
            }),
            Err(err) => {
                unsafe { gl.delete_buffer(raw) };
                Err(err)
            }
        }
    }

    /// Uploads a typed slice by reinterpreting it as bytes.
    pub fn from_slice<T: bytemuck::NoUninit>(gl: &GlHandle, data: &[T]) -> Result<Self, GpuError> {
        Self::new(gl, bytemuck::cast_slice(data))
    }

    /// Byte length of the uploaded data.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Makes this buffer the active ARRAY_BUFFER target. Idempotent.
    pub fn bind(&self) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.raw)) };
    }

    /// Restores the no-buffer-active state.
    pub fn unbind(&self) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, None) };
    }

    /// Binds for the lifetime of the returned guard; unbinds on drop.
    pub fn bind_scoped(&self) -> BoundVertexBuffer<'_> {
        self.bind();
        BoundVertexBuffer { buffer: self }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.raw) };
    }
}

/// RAII guard keeping a [`VertexBuffer`] bound.
pub struct BoundVertexBuffer<'a> {
    buffer: &'a VertexBuffer,
}

impl Drop for BoundVertexBuffer<'_> {
    fn drop(&mut self) {
        self.buffer.unbind();
    }
}
