//! Draw-call issue layer.
//!
//! The renderer takes every input to a draw explicitly; nothing relies on
//! whatever happens to be bound from a previous call.

mod renderer;

pub use renderer::Renderer;
