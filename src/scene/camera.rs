use crate::core::math::transform::TransformFactory;
use crate::ui::input::InputState;
use log::warn;
use nalgebra::{Matrix4, Point3, Vector3};

/// Keyboard translation speed (units per second).
const KEYBOARD_SPEED: f32 = 15.0;
/// Mouse drag translation speed (units per pixel per second).
const MOUSE_MOVEMENT_SPEED: f32 = 5.0;

/// Fly/orbit camera in a Left-Handed world (+Y up, looks down +Z by default).
///
/// The basis is rebuilt from `forward` and world up on every update:
/// `right = up_world x forward`, `up = forward x right`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,

    /// Accumulated rotation from right-drag, in radians.
    pub total_pitch: f32,
    pub total_yaw: f32,

    pub near: f32,
    pub far: f32,

    fov_angle: f32,
    /// tan(fov / 2)
    fov: f32,
    aspect_ratio: f32,

    // --- Cached Matrices ---
    inv_view_matrix: Matrix4<f32>,
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
    projection_dirty: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(90.0, Point3::origin(), 1.0)
    }
}

impl Camera {
    pub fn new(fov_angle_degrees: f32, origin: Point3<f32>, aspect_ratio: f32) -> Self {
        let mut cam = Self {
            origin,
            forward: Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            total_pitch: 0.0,
            total_yaw: 0.0,
            near: 0.1,
            far: 100.0,
            fov_angle: fov_angle_degrees,
            fov: (fov_angle_degrees.to_radians() / 2.0).tan(),
            aspect_ratio,
            inv_view_matrix: Matrix4::identity(),
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
            projection_dirty: true,
        };
        cam.calculate_view_matrix();
        cam.calculate_projection_matrix();
        cam
    }

    pub fn with_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self.projection_dirty = true;
        self.calculate_projection_matrix();
        self
    }

    pub fn fov_angle(&self) -> f32 {
        self.fov_angle
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio != self.aspect_ratio {
            self.aspect_ratio = aspect_ratio;
            self.projection_dirty = true;
        }
    }

    /// Applies one frame of keyboard/mouse input, then refreshes the matrices.
    pub fn update(&mut self, delta_time: f32, input: &InputState) {
        self.keyboard_input(delta_time, input);
        self.mouse_input(delta_time, input);

        self.calculate_view_matrix();
        self.calculate_projection_matrix();
    }

    fn keyboard_input(&mut self, delta_time: f32, input: &InputState) {
        // W/D pull the camera along -up/-right, so the scene appears to move with the key.
        let step = KEYBOARD_SPEED * delta_time;
        if input.move_up {
            self.origin -= self.up * step;
        }
        if input.move_down {
            self.origin += self.up * step;
        }
        if input.move_right {
            self.origin -= self.right * step;
        }
        if input.move_left {
            self.origin += self.right * step;
        }
    }

    fn mouse_input(&mut self, delta_time: f32, input: &InputState) {
        let (dx, dy) = input.mouse_delta;

        if input.left_mouse {
            if input.right_mouse {
                // Both buttons: vertical dolly
                self.origin -= self.up * (dy * MOUSE_MOVEMENT_SPEED * delta_time);
            } else {
                self.origin -= self.forward * (dy * MOUSE_MOVEMENT_SPEED * delta_time);
                self.origin -= self.right * (dx * MOUSE_MOVEMENT_SPEED * delta_time);
            }
        } else if input.right_mouse {
            self.total_yaw += delta_time * dx;
            self.total_pitch += delta_time * dy;

            let rotation = TransformFactory::rotation_pitch_yaw(self.total_pitch, self.total_yaw);
            self.forward = rotation.transform_vector(&Vector3::z());
        }
    }

    /// Rebuilds the orthonormal basis and the view matrix (inverse of basis + origin).
    pub fn calculate_view_matrix(&mut self) {
        self.forward = self.forward.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z);

        // Looking straight up or down makes the cross product vanish; keep the previous right.
        self.right = Vector3::y()
            .cross(&self.forward)
            .try_normalize(1e-6)
            .unwrap_or(self.right);
        self.up = self.forward.cross(&self.right);

        self.inv_view_matrix =
            TransformFactory::basis(&self.right, &self.up, &self.forward, &self.origin.coords);

        match self.inv_view_matrix.try_inverse() {
            Some(view) => self.view_matrix = view,
            None => warn!("Camera basis is singular, keeping previous view matrix"),
        }
    }

    /// Rebuilds the projection only when FOV or aspect ratio changed.
    pub fn calculate_projection_matrix(&mut self) {
        if !self.projection_dirty {
            return;
        }
        self.projection_matrix =
            TransformFactory::perspective_lh(self.fov, self.aspect_ratio, self.near, self.far);
        self.projection_dirty = false;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn inv_view_matrix(&self) -> Matrix4<f32> {
        self.inv_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}
