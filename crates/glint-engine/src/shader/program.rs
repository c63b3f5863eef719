use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

use crate::device::error::gl_check;
use crate::device::{GlHandle, GpuError};

use super::source::{ShaderKind, ShaderSources};

/// Error from building an executable shader program.
///
/// Compile and link failures carry the driver's full info log; both abort
/// startup when propagated from `App::on_ready`.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile {kind} shader:\n{log}")]
    Compile { kind: ShaderKind, log: String },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },

    #[error("GL shader object allocation failed: {0}")]
    Allocation(String),

    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// A compiled, not-yet-linked shader object.
///
/// Link-time input only; deleted as soon as the program links (or the link
/// fails).
struct CompiledShader {
    raw: glow::NativeShader,
}

fn compile(
    gl: &glow::Context,
    kind: ShaderKind,
    source: &str,
) -> Result<CompiledShader, ShaderError> {
    unsafe {
        let raw = gl
            .create_shader(kind.gl_type())
            .map_err(ShaderError::Allocation)?;
        gl.shader_source(raw, source);
        gl.compile_shader(raw);

        if !gl.get_shader_compile_status(raw) {
            let log = gl.get_shader_info_log(raw);
            gl.delete_shader(raw);
            return Err(ShaderError::Compile { kind, log });
        }

        Ok(CompiledShader { raw })
    }
}

/// A linked, executable GL program with a lazy uniform-location cache.
///
/// The location cache lives for the program's lifetime; missing uniform
/// names are cached too so the warning fires once per name. The GL object is
/// deleted on `Drop`.
pub struct Program {
    gl: GlHandle,
    raw: glow::NativeProgram,
    uniforms: RefCell<HashMap<String, Option<glow::NativeUniformLocation>>>,
}

impl Program {
    /// Compiles both stages and links them into a program.
    ///
    /// Short-circuits: if either stage fails to compile, no link call is
    /// issued and the surviving stage's object is released. Link status is
    /// checked explicitly. The intermediate shader objects are detached and
    /// deleted whether the link succeeds or not.
    pub fn build(gl: &GlHandle, sources: &ShaderSources) -> Result<Self, ShaderError> {
        let vs = compile(gl, ShaderKind::Vertex, &sources.vertex)?;
        let fs = match compile(gl, ShaderKind::Fragment, &sources.fragment) {
            Ok(fs) => fs,
            Err(err) => {
                unsafe { gl.delete_shader(vs.raw) };
                return Err(err);
            }
        };

        link(gl, vs, fs)
    }

    pub fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.raw)) };
    }

    pub fn unbind(&self) {
        unsafe { self.gl.use_program(None) };
    }

    /// Looks up (and caches) a uniform location.
    ///
    /// glow reports a missing uniform as `None` (the driver's -1 sentinel).
    fn location(&self, name: &str) -> Option<glow::NativeUniformLocation> {
        let mut cache = self.uniforms.borrow_mut();
        if let Some(cached) = cache.get(name) {
            return cached.clone();
        }

        let location = unsafe { self.gl.get_uniform_location(self.raw, name) };
        if location.is_none() {
            log::warn!("uniform {name:?} not found in program; values set for it are discarded");
        }
        cache.insert(name.to_string(), location.clone());
        location
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        if let Some(loc) = self.location(name) {
            self.bind();
            unsafe { self.gl.uniform_1_f32(Some(&loc), value) };
        }
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        if let Some(loc) = self.location(name) {
            self.bind();
            unsafe { self.gl.uniform_1_i32(Some(&loc), value) };
        }
    }

    pub fn set_mat4(&self, name: &str, value: &glam::Mat4) {
        if let Some(loc) = self.location(name) {
            self.bind();
            unsafe {
                self.gl
                    .uniform_matrix_4_f32_slice(Some(&loc), false, &value.to_cols_array())
            };
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.raw) };
    }
}

fn link(gl: &GlHandle, vs: CompiledShader, fs: CompiledShader) -> Result<Program, ShaderError> {
    unsafe {
        let raw = match gl.create_program() {
            Ok(raw) => raw,
            Err(msg) => {
                gl.delete_shader(vs.raw);
                gl.delete_shader(fs.raw);
                return Err(ShaderError::Allocation(msg));
            }
        };

        gl.attach_shader(raw, vs.raw);
        gl.attach_shader(raw, fs.raw);
        gl.link_program(raw);

        let linked = gl.get_program_link_status(raw);
        let log = if linked {
            String::new()
        } else {
            gl.get_program_info_log(raw)
        };

        // Shader objects are link-time inputs only.
        for stage in [vs, fs] {
            gl.detach_shader(raw, stage.raw);
            gl.delete_shader(stage.raw);
        }

        if !linked {
            gl.delete_program(raw);
            return Err(ShaderError::Link { log });
        }

        if let Err(err) = gl_check!(gl, "glLinkProgram") {
            gl.delete_program(raw);
            return Err(err.into());
        }

        Ok(Program {
            gl: Rc::clone(gl),
            raw,
            uniforms: RefCell::new(HashMap::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let err = ShaderError::Compile {
            kind: ShaderKind::Fragment,
            log: "0:3(1): error: syntax error, unexpected ';'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn link_error_carries_the_log() {
        let err = ShaderError::Link {
            log: "error: vertex shader output not read".to_string(),
        };
        assert!(err.to_string().contains("vertex shader output not read"));
    }
}
