//! GPU buffer abstraction layer.
//!
//! Raw mesh arrays become GPU-resident vertex/index buffers; a
//! [`BufferLayout`] describes the shape of one vertex record, and a
//! [`VertexArray`] binds that layout to sequential shader input slots.
//!
//! Buffers are write-once: data is uploaded at construction and never
//! re-uploaded. Binds are explicit and idempotent; the `bind_scoped`
//! variants return RAII guards that unbind on drop.

mod index;
mod layout;
mod vertex;
mod vertex_array;

pub use index::{BoundIndexBuffer, IndexBuffer};
pub use layout::{AttributeKind, BufferElement, BufferLayout};
pub use vertex::{BoundVertexBuffer, VertexBuffer};
pub use vertex_array::VertexArray;
