//! # Studio Camera
//!
//! First-person camera driven by Euler angles, with lazily cached view and
//! projection matrices.
//!
//! ## Caching Contract
//! Every mutating operation only raises a dirty flag. [`Camera::view_matrix`]
//! and [`Camera::projection_matrix`] rebuild their matrix when the matching
//! flag is raised and otherwise hand back the cached value unchanged, so
//! repeated reads between mutations are bit-identical.
//!
//! ## Basis
//! `front`, `right` and `up` are rebuilt together from yaw and pitch after
//! every orientation or position change:
//! - `front = normalize(cos(yaw)cos(pitch), sin(pitch), sin(yaw)cos(pitch))`
//! - `right = normalize(front x world_up)`
//! - `up = normalize(right x front)`
//!
//! Degenerate input (a target equal to the position, or a world-up parallel
//! to the gaze) is not checked and propagates NaN.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Yaw that points the default camera down +Z
pub const DEFAULT_YAW: f32 = 90.0;
/// Level pitch
pub const DEFAULT_PITCH: f32 = 0.0;
/// Keyboard speed in units per second
pub const DEFAULT_SPEED: f32 = 10.0;
/// Mouse sensitivity in degrees per pixel
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

/// Pitch limit applied when constraining, in degrees
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view reachable by scrolling, in degrees
pub const MIN_FOV: f32 = 1.0;
/// Widest field of view reachable by scrolling, in degrees
pub const MAX_FOV: f32 = 45.0;

/// Keyboard movement directions
///
/// Only `Forward` and `Backward` move the camera. Strafing is accepted as
/// input and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along `front`
    Forward,
    /// Against `front`
    Backward,
    /// Strafe left (ignored)
    Left,
    /// Strafe right (ignored)
    Right,
}

/// Projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// No frustum configured yet; projection is identity
    None,
    /// Perspective projection from the frustum
    Perspective,
}

/// Viewing frustum parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
            fov: MAX_FOV,
            aspect: 1.0,
        }
    }
}

/// Euler-angle camera with cached matrices
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,

    frustum: Frustum,
    mode: ProjectionMode,

    view_dirty: bool,
    proj_dirty: bool,
    view: Mat4,
    proj: Mat4,
}

impl Camera {
    /// Create a camera at `position` looking at `target`
    pub fn new(position: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let mut camera = Self {
            position,
            target,
            front: Vec3::z(),
            up: Vec3::y(),
            right: -Vec3::x(),
            world_up,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            frustum: Frustum::default(),
            mode: ProjectionMode::None,
            view_dirty: true,
            proj_dirty: true,
            view: Mat4::identity(),
            proj: Mat4::identity(),
        };
        camera.look_at(position, target, world_up);
        camera
    }

    /// Set movement speed (units per second)
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set mouse sensitivity (degrees per pixel)
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Point the camera from `position` at `target`
    ///
    /// Yaw and pitch are derived from the gaze so later mouse input continues
    /// from the requested orientation.
    pub fn look_at(&mut self, position: Vec3, target: Vec3, world_up: Vec3) {
        self.position = position;
        self.target = target;
        self.world_up = world_up;
        self.front = (target - position).normalize();
        self.sync_angles_from_front();
        self.update_basis();
        log::trace!("Camera look_at - position: {:?}, target: {:?}", position, target);
    }

    /// Translate position and target together, keeping the gaze direction
    pub fn shift(&mut self, movement: Vec3) {
        self.position += movement;
        self.target += movement;
        self.front = (self.target - self.position).normalize();
        self.sync_angles_from_front();
        self.update_basis();
    }

    /// Move along the gaze by `speed * dt`
    ///
    /// The target travels with the camera so the gaze is preserved.
    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.speed * dt;
        let step = match direction {
            CameraMovement::Forward => self.front * velocity,
            CameraMovement::Backward => -self.front * velocity,
            CameraMovement::Left | CameraMovement::Right => return,
        };
        self.position += step;
        self.target += step;
        self.update_basis();
    }

    /// Turn the camera by raw cursor deltas
    ///
    /// Zero deltas leave the basis and the cached view untouched.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;

        if constrain_pitch {
            self.pitch = utils::clamp(self.pitch, -PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_basis();
        let distance = (self.target - self.position).norm().max(1.0);
        self.target = self.position + self.front * distance;
    }

    /// Zoom by narrowing or widening the field of view
    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.frustum.fov = utils::clamp(self.frustum.fov - dy, MIN_FOV, MAX_FOV);
        self.proj_dirty = true;
    }

    /// Configure a perspective frustum
    pub fn set_viewing_frustum(&mut self, near: f32, far: f32, fov: f32, aspect: f32) {
        self.frustum = Frustum { near, far, fov, aspect };
        self.mode = ProjectionMode::Perspective;
        self.proj_dirty = true;
        log::debug!(
            "Camera frustum set - near: {}, far: {}, fov: {}, aspect: {:.3}",
            near,
            far,
            fov,
            aspect
        );
    }

    /// Update the aspect ratio after a viewport resize
    ///
    /// Only logs changes above 0.01 to keep resize drags quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.frustum.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.frustum.aspect, aspect);
        }
        self.frustum.aspect = aspect;
        self.proj_dirty = true;
    }

    /// World-to-view matrix, rebuilt only when stale
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            let (r, u, f) = (self.right, self.up, self.front);
            let rotation = Mat4::new(
                r.x, r.y, r.z, 0.0,
                u.x, u.y, u.z, 0.0,
                -f.x, -f.y, -f.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            );
            self.view = rotation * Mat4::translation_matrix(-self.position);
            self.view_dirty = false;
        }
        self.view
    }

    /// View-to-clip matrix, rebuilt only when stale
    ///
    /// With `f = 1 / tan(fov / 2)`, `Sz = (far + near) / (near - far)` and
    /// `Pz = 2 far near / (near - far)`:
    ///
    /// ```text
    /// | f/aspect  0   0   0  |
    /// |    0      f   0   0  |
    /// |    0      0   Sz  Pz |
    /// |    0      0   -1  0  |
    /// ```
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.proj_dirty {
            self.proj = match self.mode {
                ProjectionMode::Perspective => perspective(&self.frustum),
                ProjectionMode::None => Mat4::identity(),
            };
            self.proj_dirty = false;
        }
        self.proj
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current look-at point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Gaze direction (unit length)
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Camera up (unit length)
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Camera right (unit length)
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees
    pub fn fov(&self) -> f32 {
        self.frustum.fov
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.frustum.aspect
    }

    /// Current frustum
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Current projection mode
    pub fn projection_mode(&self) -> ProjectionMode {
        self.mode
    }

    fn sync_angles_from_front(&mut self) {
        self.pitch = utils::rad_to_deg(self.front.y.clamp(-1.0, 1.0).asin());
        self.yaw = utils::rad_to_deg(self.front.z.atan2(self.front.x));
    }

    fn update_basis(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
        self.view_dirty = true;
    }
}

impl Default for Camera {
    /// Camera at the origin looking down +Z
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::z(), Vec3::y())
    }
}

fn perspective(frustum: &Frustum) -> Mat4 {
    let f = 1.0 / (utils::deg_to_rad(frustum.fov) / 2.0).tan();
    let sz = (frustum.far + frustum.near) / (frustum.near - frustum.far);
    let pz = (2.0 * frustum.far * frustum.near) / (frustum.near - frustum.far);

    Mat4::new(
        f / frustum.aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, sz, pz,
        0.0, 0.0, -1.0, 0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn studio_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -25.0), Vec3::zeros(), Vec3::y())
    }

    #[test]
    fn test_front_is_unit_across_pitch_range() {
        let mut camera = Camera::default();
        for yaw_step in -8..=8 {
            for pitch_step in -89..=89 {
                let yaw = yaw_step as f32 * 45.0;
                let pitch = pitch_step as f32;
                let dx = (yaw - camera.yaw()) / camera.sensitivity;
                let dy = (pitch - camera.pitch()) / camera.sensitivity;
                camera.process_mouse_movement(dx, dy, true);
                assert_relative_eq!(camera.front().norm(), 1.0, epsilon = EPSILON);
                assert_relative_eq!(camera.front().dot(&camera.right()), 0.0, epsilon = EPSILON);
                assert_relative_eq!(camera.front().dot(&camera.up()), 0.0, epsilon = EPSILON);
                assert_relative_eq!(camera.right().dot(&camera.up()), 0.0, epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn test_look_at_derives_euler_angles() {
        let camera = studio_camera();
        assert_relative_eq!(camera.yaw(), 90.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.front(), Vec3::z(), epsilon = EPSILON);
    }

    #[test]
    fn test_matrices_are_cached_until_mutation() {
        let mut camera = studio_camera();
        camera.set_viewing_frustum(0.1, 200.0, 45.0, 16.0 / 9.0);

        let view_a = camera.view_matrix();
        let view_b = camera.view_matrix();
        let proj_a = camera.projection_matrix();
        let proj_b = camera.projection_matrix();
        assert_eq!(view_a, view_b);
        assert_eq!(proj_a, proj_b);

        camera.process_mouse_movement(0.0, 0.0, true);
        assert_eq!(camera.view_matrix(), view_a);

        camera.process_mouse_movement(10.0, 0.0, true);
        assert_ne!(camera.view_matrix(), view_a);
        assert_eq!(camera.projection_matrix(), proj_a);
    }

    #[test]
    fn test_perspective_closed_form() {
        let (near, far, fov, aspect) = (0.1_f32, 200.0_f32, 45.0_f32, 16.0_f32 / 9.0);
        let mut camera = studio_camera();
        camera.set_viewing_frustum(near, far, fov, aspect);
        let proj = camera.projection_matrix();

        let f = 1.0 / (fov.to_radians() / 2.0).tan();
        assert_relative_eq!(proj[(0, 0)], f / aspect, epsilon = EPSILON);
        assert_relative_eq!(proj[(1, 1)], f, epsilon = EPSILON);
        assert_relative_eq!(proj[(2, 2)], (far + near) / (near - far), epsilon = EPSILON);
        assert_relative_eq!(proj[(2, 3)], 2.0 * far * near / (near - far), epsilon = EPSILON);
        assert_relative_eq!(proj[(3, 2)], -1.0, epsilon = EPSILON);
        assert_relative_eq!(proj[(3, 3)], 0.0, epsilon = EPSILON);
        assert_relative_eq!(proj[(0, 1)], 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_projection_identity_without_frustum() {
        let mut camera = studio_camera();
        assert_eq!(camera.projection_mode(), ProjectionMode::None);
        assert_eq!(camera.projection_matrix(), Mat4::identity());
    }

    #[test]
    fn test_view_maps_target_onto_negative_z() {
        let mut camera = studio_camera();
        let view = camera.view_matrix();
        let target = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(target.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(target.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(target.z, -25.0, epsilon = 1e-4);
    }

    #[test]
    fn test_keyboard_moves_along_front_only() {
        let mut camera = studio_camera();
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, -20.0), epsilon = 1e-4);
        camera.process_keyboard(CameraMovement::Backward, 0.1);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, -21.0), epsilon = 1e-4);
        camera.process_keyboard(CameraMovement::Left, 1.0);
        camera.process_keyboard(CameraMovement::Right, 1.0);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, -21.0), epsilon = 1e-4);
    }

    #[test]
    fn test_shift_keeps_gaze() {
        let mut camera = studio_camera();
        let front = camera.front();
        camera.shift(Vec3::new(3.0, -2.0, 1.0));
        assert_relative_eq!(camera.position(), Vec3::new(3.0, -2.0, -24.0), epsilon = EPSILON);
        assert_relative_eq!(camera.target(), Vec3::new(3.0, -2.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(camera.front(), front, epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_constrained() {
        let mut camera = studio_camera();
        camera.process_mouse_movement(0.0, 10_000.0, true);
        assert_relative_eq!(camera.pitch(), PITCH_LIMIT);
        camera.process_mouse_movement(0.0, -50_000.0, true);
        assert_relative_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_scroll_clamps_fov() {
        let mut camera = studio_camera();
        camera.set_viewing_frustum(0.1, 200.0, 67.0, 1.0);
        camera.process_mouse_scroll(1.0);
        assert_relative_eq!(camera.fov(), MAX_FOV);
        camera.process_mouse_scroll(100.0);
        assert_relative_eq!(camera.fov(), MIN_FOV);
        camera.process_mouse_scroll(-3.0);
        assert_relative_eq!(camera.fov(), 4.0);
    }

    #[test]
    fn test_aspect_marks_projection_dirty() {
        let mut camera = studio_camera();
        camera.set_viewing_frustum(0.1, 200.0, 45.0, 1.0);
        let before = camera.projection_matrix();
        camera.set_aspect_ratio(2.0);
        let after = camera.projection_matrix();
        assert_relative_eq!(after[(0, 0)], before[(0, 0)] / 2.0, epsilon = EPSILON);
    }
}
