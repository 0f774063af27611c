//! Line models: a pipeline reference plus the vertex, index, and
//! constant buffers it draws with.
//!
//! A [`CurveModel`] owns per-draw state (transform, spherical-projection
//! flag) and is regenerated in place when parameters change. A
//! [`GridModel`] is static after construction and binds the scene's
//! shared view-projection uniform instead of owning one.

use std::sync::Arc;

use glam::Mat4;

use crate::camera::Camera;
use crate::error::ResourceError;
use crate::geometry::{GridVertex, Vertex};
use crate::gpu::geometry_buffer::GpuBuffer;
use crate::renderer::pipeline;

/// Per-draw constant buffer contents for curve models.
///
/// Layout must match the `ModelUniform` struct in `curve.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Combined world-view-projection matrix, column-major.
    pub wvp: [[f32; 4]; 4],
    /// Nonzero enables the spherical-projection mapping in the vertex
    /// shader.
    pub enable_spherical: u32,
    /// Padding for 16-byte uniform alignment.
    pub _pad: [u32; 3],
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self {
            wvp: Mat4::IDENTITY.to_cols_array_2d(),
            enable_spherical: 0,
            _pad: [0; 3],
        }
    }
}

/// Identity index sequence `0, 1, .., count-1`.
///
/// Generated curves never share vertices, so indices are always the
/// identity permutation over the vertex sequence.
#[must_use]
pub fn identity_indices(count: usize) -> Vec<u32> {
    (0..count as u32).collect()
}

/// A drawable parametric curve: pipeline reference, transform, and its
/// three GPU buffers (vertices, indices, per-draw constants).
pub struct CurveModel {
    label: String,
    pipeline: Arc<wgpu::RenderPipeline>,
    transform: Mat4,
    enable_spherical: bool,
    vertices: GpuBuffer<Vertex>,
    indices: GpuBuffer<u32>,
    uniform: GpuBuffer<ModelUniform>,
    bind_group: wgpu::BindGroup,
    /// Set when a resource operation failed; the model is skipped until
    /// a later rebuild succeeds.
    poisoned: bool,
}

impl CurveModel {
    /// Create a model from initial vertices, with identity indices and
    /// an identity transform.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if any of the three buffer allocations
    /// is rejected by the device.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        pipeline: Arc<wgpu::RenderPipeline>,
        bind_layout: &wgpu::BindGroupLayout,
        vertices: &[Vertex],
    ) -> Result<Self, ResourceError> {
        let vertex_buffer = GpuBuffer::new(
            device,
            &format!("{label} Vertices"),
            vertices,
            wgpu::BufferUsages::VERTEX,
        )?;
        let index_buffer = GpuBuffer::new(
            device,
            &format!("{label} Indices"),
            &identity_indices(vertices.len()),
            wgpu::BufferUsages::INDEX,
        )?;
        let uniform = GpuBuffer::new(
            device,
            &format!("{label} Constants"),
            &[ModelUniform::default()],
            wgpu::BufferUsages::UNIFORM,
        )?;
        let bind_group = pipeline::uniform_bind_group(
            device,
            &format!("{label} Bind Group"),
            bind_layout,
            uniform.buffer(),
        );

        Ok(Self {
            label: label.to_owned(),
            pipeline,
            transform: Mat4::IDENTITY,
            enable_spherical: false,
            vertices: vertex_buffer,
            indices: index_buffer,
            uniform,
            bind_group,
            poisoned: false,
        })
    }

    /// Replace the model's geometry with a freshly generated vertex
    /// sequence.
    ///
    /// The vertex buffer is rewritten in place when the new count fits
    /// the existing capacity and reallocated otherwise; the index buffer
    /// is rebuilt as the identity sequence only when the count changed.
    /// A successful rebuild clears any earlier poisoned state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a reallocation is rejected; the
    /// model is then skipped by `draw` until a later rebuild succeeds.
    pub fn rebuild(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[Vertex],
    ) -> Result<(), ResourceError> {
        let count_changed = vertices.len() != self.vertices.len();

        if let Err(e) = self.vertices.update(device, queue, vertices) {
            self.poisoned = true;
            return Err(e);
        }
        if count_changed {
            let indices = identity_indices(vertices.len());
            if let Err(e) = self.indices.update(device, queue, &indices) {
                self.poisoned = true;
                return Err(e);
            }
        }

        self.poisoned = false;
        Ok(())
    }

    /// Set the spherical-projection flag written to the constant buffer
    /// on the next draw.
    pub fn set_spherical(&mut self, enabled: bool) {
        self.enable_spherical = enabled;
    }

    /// The model's world transform.
    #[must_use]
    pub const fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Current logical vertex count.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Write the per-draw constants and issue one indexed draw over the
    /// index buffer's current element count.
    ///
    /// Must be called from the rendering thread only: the constant
    /// buffer write and the draw are ordered by the single frame
    /// submission. Skipped while the model is poisoned by an earlier
    /// resource failure.
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        camera: &Camera,
    ) {
        if self.poisoned || self.indices.is_empty() {
            return;
        }

        let wvp = camera.projection_matrix()
            * camera.view_matrix()
            * self.transform;
        let constants = ModelUniform {
            wvp: wvp.to_cols_array_2d(),
            enable_spherical: u32::from(self.enable_spherical),
            _pad: [0; 3],
        };
        queue.write_buffer(
            self.uniform.buffer(),
            0,
            bytemuck::bytes_of(&constants),
        );

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        render_pass.set_index_buffer(
            self.indices.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);

        log::trace!(
            "drew {} ({} indices)",
            self.label,
            self.indices.len()
        );
    }
}

/// A static gridline model sharing the scene's view-projection uniform.
pub struct GridModel {
    pipeline: Arc<wgpu::RenderPipeline>,
    vertices: GpuBuffer<GridVertex>,
    indices: GpuBuffer<u32>,
}

impl GridModel {
    /// Create a grid model from its (static) line-list vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a buffer allocation is rejected by
    /// the device.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        pipeline: Arc<wgpu::RenderPipeline>,
        vertices: &[GridVertex],
    ) -> Result<Self, ResourceError> {
        let vertex_buffer = GpuBuffer::new(
            device,
            &format!("{label} Vertices"),
            vertices,
            wgpu::BufferUsages::VERTEX,
        )?;
        let index_buffer = GpuBuffer::new(
            device,
            &format!("{label} Indices"),
            &identity_indices(vertices.len()),
            wgpu::BufferUsages::INDEX,
        )?;
        Ok(Self {
            pipeline,
            vertices: vertex_buffer,
            indices: index_buffer,
        })
    }

    /// Issue one indexed draw with the scene's shared bind group.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        shared_bind_group: &wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, shared_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        render_pass.set_index_buffer(
            self.indices.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_indices_match_position() {
        let indices = identity_indices(5);
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        for (position, index) in identity_indices(1000).iter().enumerate() {
            assert_eq!(*index as usize, position);
        }
    }

    #[test]
    fn identity_indices_empty() {
        assert!(identity_indices(0).is_empty());
    }

    #[test]
    fn model_uniform_is_gpu_sized() {
        // mat4 + u32 flag + padding = 80 bytes, 16-byte aligned.
        assert_eq!(std::mem::size_of::<ModelUniform>(), 80);
        assert_eq!(std::mem::size_of::<ModelUniform>() % 16, 0);
    }
}
