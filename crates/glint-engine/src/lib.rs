//! Glint engine crate.
//!
//! This crate owns the platform + GL runtime pieces used by applications:
//! window/context creation, the shader build pipeline, and the vertex/index
//! buffer abstraction that feeds draw calls.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod shader;
pub mod buffer;
pub mod texture;
pub mod render;
