//! GPU-accelerated real-time plotter for parametric polar curves.
//!
//! Curvescope renders three curve families as indexed line strips on
//! the GPU: the Archimedean spiral, the two-branch Fermat spiral, and
//! the Bernoulli lemniscate. Curves regenerate on parameter edits and
//! the vertex buffers are updated in place wherever the new geometry
//! fits, reallocating only on growth.
//!
//! # Key entry points
//!
//! - [`scene::Scene`] - owns the models and runs the per-frame sequence
//! - [`scene::SceneState`] / [`scene::SceneEdit`] - explicit UI state
//!   and the edits that mutate it
//! - [`geometry::CurveSpec`] - tagged curve parameters plus generation
//! - [`gpu::geometry_buffer::GpuBuffer`] - growable typed GPU buffer
//! - [`options::Options`] - runtime configuration
//!
//! # Architecture
//!
//! Curve generation is pure CPU math ([`geometry`]) and fully testable
//! without a GPU. The [`scene`] layer consumes queued [`scene::SceneEdit`]
//! values strictly between frames, regenerates exactly the affected
//! model, then records one render pass: clear, grids, active curve,
//! present. Resource failures in one model are quarantined to that
//! model and logged; the rest of the scene keeps rendering.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;
