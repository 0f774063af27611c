//! Perspective camera and orbit controller.
//!
//! The renderer only consumes the camera through its two matrices; the
//! controller exists so the viewer has something to drive with mouse
//! input.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// The view matrix (world to camera space).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// The projection matrix.
    ///
    /// `perspective_rh` already uses the [0,1] depth range (wgpu/Vulkan
    /// convention).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

/// Mouse-driven orbit/zoom controller around a focus point.
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    rotate_speed: f32,
    zoom_speed: f32,
    /// The camera this controller positions.
    pub camera: Camera,
}

impl OrbitController {
    /// Controller looking at the origin from `distance` along -Z-facing
    /// view, with the given projection parameters.
    #[must_use]
    pub fn new(distance: f32, aspect: f32, fovy: f32) -> Self {
        let focus_point = Vec3::ZERO;
        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect,
            fovy,
            znear: 0.1,
            zfar: 1000.0,
        };
        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point,
            rotate_speed: 0.01,
            zoom_speed: 0.05,
            camera,
        }
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;
        self.camera.eye = self.focus_point + dir * self.distance;
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Update the aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit around the focus point by a mouse-drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        let right = self.orientation * Vec3::X;
        let vertical =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = vertical * self.orientation;

        self.update_camera_pos();
    }

    /// Zoom toward/away from the focus point by a scroll delta.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(1.0, 500.0);
        self.update_camera_pos();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrices_are_finite_and_invertible() {
        let controller = OrbitController::new(20.0, 1.6, 60.0);
        let view = controller.camera.view_matrix();
        let proj = controller.camera.projection_matrix();
        assert!(view.determinant().abs() > 1e-6);
        assert!((proj * view)
            .to_cols_array()
            .iter()
            .all(|v| v.is_finite()));
    }

    #[test]
    fn zoom_clamps_distance() {
        let mut controller = OrbitController::new(20.0, 1.6, 60.0);
        for _ in 0..1000 {
            controller.zoom(5.0);
        }
        assert!(controller.camera.eye.distance(controller.camera.target) >= 1.0);
        for _ in 0..1000 {
            controller.zoom(-5.0);
        }
        assert!(
            controller.camera.eye.distance(controller.camera.target) <= 500.1
        );
    }
}
