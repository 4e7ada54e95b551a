use glam::{Mat3, Mat4, Quat, Vec3};

use crate::Ray;

/// Pinhole camera description.
///
/// The camera looks down its local -Z axis; `orientation` rotates view-space
/// directions into world space. `near`/`far` are only used by the
/// projection matrix handed to a display front end, never by the tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov_y: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a camera at `position` with the given orientation.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            ..Default::default()
        }
    }

    /// Create a camera at `position` looking at `target`.
    ///
    /// Falls back to the identity orientation when `position == target` or
    /// `up` is parallel to the view direction.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let orientation = (position - target)
            .try_normalize()
            .and_then(|w| up.cross(w).try_normalize().map(|u| (u, w)))
            .map(|(u, w)| Quat::from_mat3(&Mat3::from_cols(u, w.cross(u), w)))
            .unwrap_or(Quat::IDENTITY);

        Self::new(position, orientation)
    }

    /// Builder method to set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Builder method to set the aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Builder method to set the near/far clip distances.
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Generate a primary ray through image-plane coordinates (u, v) in [0,1]².
    ///
    /// u grows to the right and v grows upward; (0.5, 0.5) is the view axis.
    pub fn generate_ray(&self, u: f32, v: f32) -> Ray {
        let half_height = (self.fov_y.to_radians() / 2.0).tan();
        let x = (2.0 * u - 1.0) * half_height * self.aspect;
        let y = (2.0 * v - 1.0) * half_height;
        let direction = self.orientation * Vec3::new(x, y, -1.0).normalize();

        Ray::new(self.position, direction)
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }
}
