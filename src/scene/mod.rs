//! Scene orchestration: owns the fixed set of models and runs the
//! per-frame clear, update, draw, present sequence.
//!
//! Per frame, strictly ordered: pending edits are consumed first (never
//! mid-draw), then one render pass clears color and depth, draws the
//! enabled grid models, draws the active curve model, and presents.
//! A resource failure in one model is logged and quarantined to that
//! model; the rest of the scene keeps rendering.

mod state;

use std::sync::Arc;

use glam::Mat4;
pub use state::{SceneEdit, SceneState};

use crate::camera::Camera;
use crate::error::ResourceError;
use crate::geometry::{grid, CurveKind, GridVertex, Vertex};
use crate::gpu::geometry_buffer::GpuBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::options::Options;
use crate::renderer::model::{CurveModel, GridModel};
use crate::renderer::pipeline;

/// Shared per-frame constant buffer contents (grid models).
///
/// Layout must match the `SceneUniform` struct in `grid.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniform {
    /// Combined view-projection matrix, column-major.
    view_proj: [[f32; 4]; 4],
}

/// The scene: grid models, the three curve models, the shared per-frame
/// constant buffer, and the current [`SceneState`].
pub struct Scene {
    state: SceneState,
    samples: usize,
    background: wgpu::Color,
    shared_uniform: GpuBuffer<SceneUniform>,
    shared_bind_group: wgpu::BindGroup,
    grid_xy: GridModel,
    grid_xz: GridModel,
    archimedean: CurveModel,
    fermat: CurveModel,
    bernoulli: CurveModel,
    depth: DepthTexture,
}

impl Scene {
    /// Build the static grid models and the three curve models at their
    /// default parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if any initial buffer allocation is
    /// rejected; startup allocation failures are structural, so this is
    /// fatal to the whole scene rather than one model.
    pub fn new(
        context: &RenderContext,
        options: &Options,
    ) -> Result<Self, ResourceError> {
        let device = &context.device;
        let state = SceneState::default();
        let samples = options.render.samples;

        let curve_shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Curve Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/curve.wgsl").into(),
                ),
            });
        let grid_shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Grid Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/grid.wgsl").into(),
                ),
            });

        let model_layout = pipeline::uniform_bind_group_layout(
            device,
            "Model Bind Group Layout",
        );
        let shared_layout = pipeline::uniform_bind_group_layout(
            device,
            "Scene Bind Group Layout",
        );

        let curve_pipeline = Arc::new(pipeline::create_line_pipeline(
            device,
            "Curve Pipeline",
            &curve_shader,
            context.format(),
            wgpu::PrimitiveTopology::LineStrip,
            Vertex::LAYOUT,
            &[&model_layout],
        ));
        let grid_pipeline = Arc::new(pipeline::create_line_pipeline(
            device,
            "Grid Pipeline",
            &grid_shader,
            context.format(),
            wgpu::PrimitiveTopology::LineList,
            GridVertex::LAYOUT,
            &[&shared_layout],
        ));

        let shared_uniform = GpuBuffer::new(
            device,
            "Scene Constants",
            &[SceneUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }],
            wgpu::BufferUsages::UNIFORM,
        )?;
        let shared_bind_group = pipeline::uniform_bind_group(
            device,
            "Scene Bind Group",
            &shared_layout,
            shared_uniform.buffer(),
        );

        let grid_xy = GridModel::new(
            device,
            "XY Grid",
            Arc::clone(&grid_pipeline),
            &grid::xy_grid(options.render.grid_extent, options.render.grid_step),
        )?;
        let grid_xz = GridModel::new(
            device,
            "XZ Reference Grid",
            Arc::clone(&grid_pipeline),
            &grid::xz_reference_grid(options.render.grid_extent, 25),
        )?;

        let new_curve = |kind: CurveKind, label: &str| {
            let vertices = state
                .spec_for(kind)
                .map_or_else(Vec::new, |spec| spec.generate(samples));
            CurveModel::new(
                device,
                label,
                Arc::clone(&curve_pipeline),
                &model_layout,
                &vertices,
            )
        };
        let archimedean =
            new_curve(CurveKind::Archimedean, "Archimedean Spiral")?;
        let fermat = new_curve(CurveKind::Fermat, "Fermat Spiral")?;
        let bernoulli =
            new_curve(CurveKind::Bernoulli, "Bernoulli Lemniscate")?;

        let depth = DepthTexture::new(
            device,
            context.config.width,
            context.config.height,
        );

        let [br, bg, bb, ba] = options.render.background;
        Ok(Self {
            state,
            samples,
            background: wgpu::Color {
                r: f64::from(br),
                g: f64::from(bg),
                b: f64::from(bb),
                a: f64::from(ba),
            },
            shared_uniform,
            shared_bind_group,
            grid_xy,
            grid_xz,
            archimedean,
            fermat,
            bernoulli,
            depth,
        })
    }

    /// Read access to the current state (for the UI collaborator).
    #[must_use]
    pub const fn state(&self) -> &SceneState {
        &self.state
    }

    fn model_mut(&mut self, kind: CurveKind) -> Option<&mut CurveModel> {
        match kind {
            CurveKind::None => None,
            CurveKind::Archimedean => Some(&mut self.archimedean),
            CurveKind::Fermat => Some(&mut self.fermat),
            CurveKind::Bernoulli => Some(&mut self.bernoulli),
        }
    }

    /// Consume UI edits between frames.
    ///
    /// `Apply*` edits regenerate exactly one model's vertex buffer in
    /// place (reallocating only on growth); selection and toggle edits
    /// never touch buffers. A model whose regeneration fails is logged
    /// and skipped until a later edit succeeds.
    pub fn apply_edits(
        &mut self,
        context: &RenderContext,
        edits: impl IntoIterator<Item = SceneEdit>,
    ) {
        for edit in edits {
            if let Some(kind) = self.state.apply(&edit) {
                self.regenerate(context, kind);
            }
        }
        // Spherical flags are plain per-draw constants; sync them
        // without touching geometry.
        let flags = [
            CurveKind::Archimedean,
            CurveKind::Fermat,
            CurveKind::Bernoulli,
        ]
        .map(|kind| (kind, self.state.spherical_for(kind)));
        for (kind, enabled) in flags {
            if let Some(model) = self.model_mut(kind) {
                model.set_spherical(enabled);
            }
        }
    }

    /// Regenerate one curve model from the current state.
    ///
    /// Resource failures are contained here: the error is logged with
    /// the model and operation and the frame goes on without that curve.
    fn regenerate(&mut self, context: &RenderContext, kind: CurveKind) {
        let Some(spec) = self.state.spec_for(kind) else {
            return;
        };
        let vertices = spec.generate(self.samples);
        let device = &context.device;
        let queue = &context.queue;
        if let Some(model) = self.model_mut(kind) {
            match model.rebuild(device, queue, &vertices) {
                Ok(()) => log::debug!(
                    "regenerated {kind:?} with {} vertices",
                    vertices.len()
                ),
                Err(e) => {
                    log::error!("rebuild failed for {kind:?}: {e}");
                }
            }
        }
    }

    /// Recreate the depth attachment after a surface resize.
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth = DepthTexture::new(
            &context.device,
            context.config.width,
            context.config.height,
        );
    }

    /// Render one frame: clear, draw grids and the active curve, present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; the caller decides whether to reconfigure or bail.
    pub fn render(
        &mut self,
        context: &RenderContext,
        camera: &Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = camera.projection_matrix() * camera.view_matrix();
        context.queue.write_buffer(
            self.shared_uniform.buffer(),
            0,
            bytemuck::bytes_of(&SceneUniform {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );

        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.background),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            if self.state.show_grid_xz {
                self.grid_xz.draw(&mut pass, &self.shared_bind_group);
            }
            if self.state.show_grid_xy {
                self.grid_xy.draw(&mut pass, &self.shared_bind_group);
            }

            match self.state.active {
                CurveKind::None => {}
                CurveKind::Archimedean => {
                    self.archimedean.draw(&context.queue, &mut pass, camera);
                }
                CurveKind::Fermat => {
                    self.fermat.draw(&context.queue, &mut pass, camera);
                }
                CurveKind::Bernoulli => {
                    self.bernoulli.draw(&context.queue, &mut pass, camera);
                }
            }
        }

        context.submit(encoder);
        frame.present();
        Ok(())
    }
}
