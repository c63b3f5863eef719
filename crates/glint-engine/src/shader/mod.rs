//! Shader asset parsing and program building.
//!
//! A combined `.shader` asset carries one vertex and one fragment section;
//! [`parse_shader_asset`] splits it into per-stage sources and
//! [`Program::build`] compiles and links them into an executable program.

mod program;
mod source;

pub use program::{Program, ShaderError};
pub use source::{MarkerPolicy, ShaderAssetError, ShaderKind, ShaderSources, parse_shader_asset};
