//! GPU resource ownership: device/surface context, typed buffers, and
//! the depth attachment.

pub mod geometry_buffer;
pub mod render_context;
pub mod texture;
