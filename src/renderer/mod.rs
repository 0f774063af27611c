//! Draw-side abstractions: render pipeline construction and the models
//! that bundle pipelines with their GPU buffers.

pub mod model;
pub mod pipeline;
