use std::fmt;

use glow::HasContext;

/// A GL error captured immediately after a state-mutating call.
///
/// `call` is the textual form of the call that was checked; `file`/`line`
/// locate the checkpoint in engine source. Callers decide whether to
/// log-and-continue (per-frame draws) or propagate (startup paths).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuError {
    /// Raw `glGetError` code, or `GL_NO_ERROR` when an object allocation
    /// failed without the driver queueing a code.
    pub code: u32,
    pub call: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl GpuError {
    /// Name of the GL error constant.
    pub fn code_name(&self) -> &'static str {
        match self.code {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            _ => "GL_UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code == glow::NO_ERROR {
            write!(
                f,
                "GL object allocation failed in {} at {}:{} (no error queued)",
                self.call, self.file, self.line
            )
        } else {
            write!(
                f,
                "{} (0x{:04x}) after {} at {}:{}",
                self.code_name(),
                self.code,
                self.call,
                self.file,
                self.line
            )
        }
    }
}

impl std::error::Error for GpuError {}

/// Drains the GL error queue.
///
/// Returns the first pending error annotated with the call text and call
/// site. Drivers may queue several codes; the rest are logged and discarded
/// so the next checkpoint starts clean.
pub fn check(
    gl: &glow::Context,
    call: &'static str,
    file: &'static str,
    line: u32,
) -> Result<(), GpuError> {
    let code = unsafe { gl.get_error() };
    if code == glow::NO_ERROR {
        return Ok(());
    }
    loop {
        let extra = unsafe { gl.get_error() };
        if extra == glow::NO_ERROR {
            break;
        }
        log::debug!("additional GL error 0x{extra:04x} queued after {call}");
    }
    Err(GpuError { code, call, file, line })
}

/// Converts a failed `create_*` call into a [`GpuError`], preferring
/// whatever code the driver queued.
pub(crate) fn allocation_failed(
    gl: &glow::Context,
    call: &'static str,
    file: &'static str,
    line: u32,
) -> GpuError {
    match check(gl, call, file, line) {
        Err(err) => err,
        Ok(()) => GpuError {
            code: glow::NO_ERROR,
            call,
            file,
            line,
        },
    }
}

/// Checks the GL error queue after a state-mutating call, capturing the
/// call site.
macro_rules! gl_check {
    ($gl:expr, $call:literal) => {
        $crate::device::error::check($gl, $call, file!(), line!())
    };
}

/// Builds a [`GpuError`] for a failed GL object allocation.
macro_rules! gl_alloc_err {
    ($gl:expr, $call:literal) => {
        $crate::device::error::allocation_failed($gl, $call, file!(), line!())
    };
}

pub(crate) use {gl_alloc_err, gl_check};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_code_and_site() {
        let err = GpuError {
            code: glow::INVALID_OPERATION,
            call: "glDrawElements(GL_TRIANGLES)",
            file: "renderer.rs",
            line: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("GL_INVALID_OPERATION"));
        assert!(msg.contains("glDrawElements(GL_TRIANGLES)"));
        assert!(msg.contains("renderer.rs:42"));
    }

    #[test]
    fn allocation_failure_display() {
        let err = GpuError {
            code: glow::NO_ERROR,
            call: "glGenBuffers",
            file: "vertex.rs",
            line: 7,
        };
        assert!(err.to_string().contains("allocation failed"));
    }

    #[test]
    fn unknown_code_has_fallback_name() {
        let err = GpuError {
            code: 0xdead,
            call: "glFrobnicate",
            file: "x.rs",
            line: 1,
        };
        assert_eq!(err.code_name(), "GL_UNKNOWN_ERROR");
    }
}
