//! GL device + surface management.
//!
//! This module is responsible for:
//! - creating the glutin display/surface/context against a winit window
//! - loading the glow function table and sharing it with resource types
//! - presenting frames (buffer swap) and resizing the drawable
//! - the result-returning GL error checkpoint used by all resource types

mod context;
pub mod error;

pub use context::{GlContext, GlInit};
pub use error::GpuError;

/// Shared handle to the loaded GL function table.
///
/// The GL context is thread-affine and all commands are issued from the main
/// thread, so a plain `Rc` is the right ownership model. Resource types keep
/// a clone so they can release their GL object on `Drop`.
pub type GlHandle = std::rc::Rc<glow::Context>;
