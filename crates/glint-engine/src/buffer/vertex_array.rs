use std::rc::Rc;

use glow::HasContext;

use crate::device::error::{gl_alloc_err, gl_check};
use crate::device::{GlHandle, GpuError};

use super::layout::BufferLayout;
use super::vertex::VertexBuffer;

/// Binds a vertex buffer's layout to sequential shader input slots.
///
/// Owns the attribute configuration, not the vertex buffer's memory: the
/// buffer must stay alive for as long as this binding is drawn with.
pub struct VertexArray {
    gl: GlHandle,
    raw: glow::NativeVertexArray,
    attribute_count: u32,
}

impl VertexArray {
    pub fn new(gl: &GlHandle) -> Result<Self, GpuError> {
        let raw = unsafe { gl.create_vertex_array() }
            .map_err(|_| gl_alloc_err!(gl, "glGenVertexArrays"))?;
        Ok(Self {
            gl: Rc::clone(gl),
            raw,
            attribute_count: 0,
        })
    }

    /// Enables one attribute slot per layout element, in declaration order.
    ///
    /// Slot indices continue sequentially from any previously attached
    /// layout, starting at 0 with no gaps. Each slot is configured with the
    /// element's component count/type/normalize flag, the layout's stride,
    /// and the element's byte offset.
    pub fn attach(&mut self, buffer: &VertexBuffer, layout: &BufferLayout) -> Result<(), GpuError> {
        self.bind();

        let mut result = Ok(());
        {
            let _bound = buffer.bind_scoped();
            for (slot, element) in layout.elements().iter().enumerate() {
                let slot = self.attribute_count + slot as u32;
                unsafe {
                    self.gl.enable_vertex_attrib_array(slot);
                    self.gl.vertex_attrib_pointer_f32(
                        slot,
                        element.count as i32,
                        element.kind.gl_type(),
                        element.normalized,
                        layout.stride() as i32,
                        element.offset as i32,
                    );
                }
                if let Err(err) = gl_check!(&self.gl, "glVertexAttribPointer") {
                    result = Err(err);
                    break;
                }
            }
        }
        self.unbind();

        result?;
        self.attribute_count += layout.elements().len() as u32;
        Ok(())
    }

    /// Number of attribute slots enabled so far; equals the total element
    /// count of every attached layout.
    pub fn attribute_count(&self) -> u32 {
        self.attribute_count
    }

    /// Makes this array the active vertex-fetch configuration. Idempotent.
    pub fn bind(&self) {
        unsafe { self.gl.bind_vertex_array(Some(self.raw)) };
    }

    pub fn unbind(&self) {
        unsafe { self.gl.bind_vertex_array(None) };
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { self.gl.delete_vertex_array(self.raw) };
    }
}
