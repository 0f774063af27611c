//! Pure geometry: vertex layouts, curve parameter types, and the
//! generators that turn scalar parameters into line-strip vertices.
//!
//! Nothing in this module touches the GPU; generation is deterministic
//! and side-effect-free so regenerating with identical inputs yields
//! bit-for-bit identical output.

pub mod curves;
pub mod grid;

use std::f32::consts::PI;

/// Common per-vertex data for curve models.
///
/// The texture coordinate is unused by flat-colored curve rendering but
/// kept so the layout matches textured pipelines sharing the same shader
/// interface. Field order must agree with [`Vertex::LAYOUT`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position.
    pub position: [f32; 3],
    /// RGBA color, each channel in [0, 1].
    pub color: [f32; 4],
    /// Texture coordinate (unused by curve rendering).
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Vertex buffer layout matching the `curve.wgsl` shader inputs.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x4,
                2 => Float32x2,
            ],
        };

    /// Vertex at `position` with the given color and zeroed texcoord.
    #[must_use]
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            color,
            tex_coord: [0.0, 0.0],
        }
    }
}

/// Per-vertex data for gridline models (position + RGB color only).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// RGB color, each channel in [0, 1].
    pub color: [f32; 3],
}

impl GridVertex {
    /// Vertex buffer layout matching the `grid.wgsl` shader inputs.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
            ],
        };

    /// Vertex at `position` with the given color.
    #[must_use]
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// The selectable curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// No curve drawn.
    None,
    /// Archimedean spiral, `r = a * phi`.
    #[default]
    Archimedean,
    /// Fermat spiral, `r = +/- a * sqrt(phi)` (two branches).
    Fermat,
    /// Lemniscate of Bernoulli, `r^2 = a^2 * cos(scale * phi)`.
    Bernoulli,
}

/// Parameters for the Archimedean spiral `r = a * phi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchimedeanParams {
    /// Lower bound of the sampled angle domain.
    pub phi_min: f32,
    /// Upper bound of the sampled angle domain.
    pub phi_max: f32,
    /// Radial scale coefficient.
    pub a: f32,
    /// Uniform vertex color.
    pub color: [f32; 4],
    /// Z coordinate applied to every vertex.
    pub z_offset: f32,
}

impl Default for ArchimedeanParams {
    fn default() -> Self {
        Self {
            phi_min: 0.0,
            phi_max: PI * 10.0,
            a: 0.33,
            color: [1.0, 1.0, 1.0, 1.0],
            z_offset: 0.0,
        }
    }
}

/// Parameters for the Fermat spiral `r = +/- a * sqrt(phi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FermatParams {
    /// Lower bound of the sampled angle domain (non-negative).
    pub phi_min: f32,
    /// Upper bound of the sampled angle domain.
    pub phi_max: f32,
    /// Radial scale coefficient.
    pub a: f32,
    /// Uniform vertex color.
    pub color: [f32; 4],
    /// Z coordinate applied to every vertex.
    pub z_offset: f32,
}

impl Default for FermatParams {
    fn default() -> Self {
        Self {
            phi_min: 0.0,
            phi_max: PI * 10.0,
            a: 2.5,
            color: [1.0, 1.0, 1.0, 1.0],
            z_offset: 0.0,
        }
    }
}

/// Parameters for the lemniscate of Bernoulli
/// `r^2 = a^2 * cos(scale * phi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliParams {
    /// Lower bound of the sampled angle domain.
    pub phi_min: f32,
    /// Upper bound of the sampled angle domain.
    pub phi_max: f32,
    /// Radial scale coefficient.
    pub a: f32,
    /// Integer harmonic multiplying the angle inside the cosine.
    pub scale: i32,
    /// Uniform vertex color.
    pub color: [f32; 4],
    /// Z coordinate applied to every vertex.
    pub z_offset: f32,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            phi_min: -PI,
            phi_max: PI,
            a: 5.0,
            scale: 2,
            color: [1.0, 1.0, 1.0, 1.0],
            z_offset: 0.0,
        }
    }
}

/// A curve family tagged with its own parameter struct.
///
/// Single dispatch point for generation: everything downstream works in
/// terms of `CurveSpec` rather than matching on [`CurveKind`] per call
/// site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveSpec {
    /// Archimedean spiral.
    Archimedean(ArchimedeanParams),
    /// Fermat spiral.
    Fermat(FermatParams),
    /// Lemniscate of Bernoulli.
    Bernoulli(BernoulliParams),
}

impl CurveSpec {
    /// The kind tag for this spec.
    #[must_use]
    pub const fn kind(&self) -> CurveKind {
        match self {
            Self::Archimedean(_) => CurveKind::Archimedean,
            Self::Fermat(_) => CurveKind::Fermat,
            Self::Bernoulli(_) => CurveKind::Bernoulli,
        }
    }

    /// Generate `samples` vertices for this curve.
    #[must_use]
    pub fn generate(&self, samples: usize) -> Vec<Vertex> {
        match self {
            Self::Archimedean(p) => curves::archimedean(p, samples),
            Self::Fermat(p) => curves::fermat(p, samples),
            Self::Bernoulli(p) => curves::bernoulli(p, samples),
        }
    }
}
