//! GL texture upload.
//!
//! Image decoding happens outside the engine (the `image` crate at the app
//! boundary); this module consumes a tightly packed RGB8 buffer plus its
//! dimensions.

use std::rc::Rc;

use glow::HasContext;

use crate::device::error::{gl_alloc_err, gl_check};
use crate::device::{GlHandle, GpuError};

/// An immutable 2D RGB texture with mipmaps.
pub struct Texture2d {
    gl: GlHandle,
    raw: glow::NativeTexture,
    width: u32,
    height: u32,
}

impl Texture2d {
    /// Uploads a tightly packed RGB8 image and generates mipmaps.
    ///
    /// Sampling: clamp-to-edge wrap, trilinear minification, linear
    /// magnification.
    pub fn from_rgb(
        gl: &GlHandle,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, GpuError> {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);

        let raw = unsafe { gl.create_texture() }.map_err(|_| gl_alloc_err!(gl, "glGenTextures"))?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            // RGB8 rows are not 4-byte aligned in general.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGB8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGB,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
        }
        let upload = gl_check!(gl, "glTexImage2D(GL_TEXTURE_2D)");
        unsafe { gl.bind_texture(glow::TEXTURE_2D, None) };

        match upload {
            Ok(()) => Ok(Self {
                gl: Rc::clone(gl),
                raw,
                width,
                height,
            }),
            Err(err) => {
                unsafe { gl.delete_texture(raw) };
                Err(err)
            }
        }
    }

    /// Binds this texture to texture unit `unit`.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.raw));
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture2d {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.raw) };
    }
}
