//! Standalone winit viewer: drives the scene once per frame and maps
//! input to camera motion and scene edits.
//!
//! The parameter-editing UI proper is an external collaborator; this
//! viewer stands in as the producer of [`SceneEdit`] events. Keys:
//! `0`-`3` select the curve family, `G`/`H` toggle the grid planes,
//! `[`/`]` nudge the shared z offset, `S` toggles spherical projection
//! for the active curve, `R` re-applies the active curve's parameters.
//! Hold the right mouse button to orbit, scroll to zoom.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::OrbitController;
use crate::error::CurvescopeError;
use crate::geometry::CurveKind;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::scene::{Scene, SceneEdit};

/// Step applied to the shared z offset by the bracket keys.
const Z_OFFSET_STEP: f32 = 0.5;

struct App {
    options: Options,
    window: Option<Arc<Window>>,
    context: Option<RenderContext>,
    scene: Option<Scene>,
    controller: Option<OrbitController>,
    pending_edits: Vec<SceneEdit>,
    last_mouse_pos: (f32, f32),
    rotating: bool,
    last_frame_time: Instant,
    frame_count: u32,
    frame_accum: f32,
    init_error: Option<CurvescopeError>,
}

impl App {
    fn new(options: Options) -> Self {
        Self {
            options,
            window: None,
            context: None,
            scene: None,
            controller: None,
            pending_edits: Vec::new(),
            last_mouse_pos: (0.0, 0.0),
            rotating: false,
            last_frame_time: Instant::now(),
            frame_count: 0,
            frame_accum: 0.0,
            init_error: None,
        }
    }

    fn initialize(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(), CurvescopeError> {
        let attrs = Window::default_attributes()
            .with_title(self.options.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.window.width,
                self.options.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| CurvescopeError::Viewer(e.to_string()))?,
        );

        let size = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            (size.width, size.height),
        ))?;
        let scene = Scene::new(&context, &self.options)?;
        let aspect = size.width as f32 / size.height.max(1) as f32;
        let controller = OrbitController::new(
            self.options.camera.distance,
            aspect,
            self.options.camera.fovy,
        );

        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
        self.scene = Some(scene);
        self.controller = Some(controller);
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        let Some(scene) = &self.scene else { return };
        let state = scene.state();
        let edit = match code {
            KeyCode::Digit0 => Some(SceneEdit::SelectCurve(CurveKind::None)),
            KeyCode::Digit1 => {
                Some(SceneEdit::SelectCurve(CurveKind::Archimedean))
            }
            KeyCode::Digit2 => Some(SceneEdit::SelectCurve(CurveKind::Fermat)),
            KeyCode::Digit3 => {
                Some(SceneEdit::SelectCurve(CurveKind::Bernoulli))
            }
            KeyCode::KeyG => {
                Some(SceneEdit::ToggleGridXy(!state.show_grid_xy))
            }
            KeyCode::KeyH => {
                Some(SceneEdit::ToggleGridXz(!state.show_grid_xz))
            }
            KeyCode::KeyR => Some(SceneEdit::ReapplyActive),
            KeyCode::KeyS => Some(SceneEdit::SetSpherical(
                state.active,
                !state.spherical_for(state.active),
            )),
            KeyCode::BracketLeft => {
                self.pending_edits.push(SceneEdit::SetZOffset(
                    state.z_offset - Z_OFFSET_STEP,
                ));
                Some(SceneEdit::ReapplyActive)
            }
            KeyCode::BracketRight => {
                self.pending_edits.push(SceneEdit::SetZOffset(
                    state.z_offset + Z_OFFSET_STEP,
                ));
                Some(SceneEdit::ReapplyActive)
            }
            _ => None,
        };
        if let Some(edit) = edit {
            self.pending_edits.push(edit);
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(context), Some(scene), Some(controller)) = (
            &self.window,
            &mut self.context,
            &mut self.scene,
            &mut self.controller,
        ) else {
            return;
        };

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.frame_count += 1;
        self.frame_accum += dt;
        if self.frame_accum >= 1.0 {
            log::debug!(
                "{:.1} fps ({:.2} ms/frame)",
                f64::from(self.frame_count) / f64::from(self.frame_accum),
                f64::from(self.frame_accum) * 1000.0
                    / f64::from(self.frame_count),
            );
            self.frame_count = 0;
            self.frame_accum = 0.0;
        }

        // Edits are consumed between frames, never mid-draw.
        scene.apply_edits(context, self.pending_edits.drain(..));

        match scene.render(context, &controller.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let inner = window.inner_size();
                context.resize(inner.width, inner.height);
                scene.resize(context);
                controller.resize(inner.width, inner.height);
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                log::error!("viewer initialization failed: {e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let (Some(context), Some(scene), Some(controller)) = (
                    &mut self.context,
                    &mut self.scene,
                    &mut self.controller,
                ) {
                    context.resize(size.width, size.height);
                    scene.resize(context);
                    controller.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                if button == MouseButton::Right {
                    self.rotating = state == ElementState::Pressed;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let delta = Vec2::new(
                    position.x as f32 - self.last_mouse_pos.0,
                    position.y as f32 - self.last_mouse_pos.1,
                );
                self.last_mouse_pos = (position.x as f32, position.y as f32);
                if self.rotating {
                    if let Some(controller) = &mut self.controller {
                        controller.rotate(delta);
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(controller) = &mut self.controller {
                    controller.zoom(amount);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.handle_key(code);
                    }
                }
            }

            _ => (),
        }
    }
}

/// Run the viewer until the window closes.
///
/// # Errors
///
/// Returns [`CurvescopeError::Viewer`] if the event loop fails and any
/// initialization error (GPU context, scene resources) encountered on
/// startup.
pub fn run(options: Options) -> Result<(), CurvescopeError> {
    let event_loop = EventLoop::new()
        .map_err(|e| CurvescopeError::Viewer(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop
        .run_app(&mut app)
        .map_err(|e| CurvescopeError::Viewer(e.to_string()))?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
