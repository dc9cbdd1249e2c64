//! Math utilities and types
//!
//! Column-vector conventions throughout: a point is transformed as `M * p`,
//! translations live in the last column and `T * R * S` applies scale first.

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }
}

/// Extension trait for Mat4 with the handful of builders the studio needs
pub trait Mat4Ext {
    /// Pure translation matrix
    fn translation_matrix(t: Vec3) -> Mat4;

    /// Pure (non-uniform) scale matrix
    fn scale_matrix(s: Vec3) -> Mat4;

    /// Rotation about +Y by `angle` radians
    fn y_rotation(angle: f32) -> Mat4;

    /// Rotation about an arbitrary axis by `angle` radians
    fn axis_rotation(axis: Vec3, angle: f32) -> Mat4;

    /// Orthographic projection covering `[left, right] x [bottom, top]` with
    /// depth range `[-1, 1]`
    fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4;

    /// World position held in the translation column
    fn translation_part(&self) -> Vec3;

    /// Normal matrix: inverse-transpose of the upper-left 3x3 block.
    /// Falls back to identity for a singular block.
    fn normal_matrix(&self) -> Mat3;
}

impl Mat4Ext for Mat4 {
    fn translation_matrix(t: Vec3) -> Mat4 {
        Mat4::new_translation(&t)
    }

    fn scale_matrix(s: Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(&s)
    }

    fn y_rotation(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn axis_rotation(axis: Vec3, angle: f32) -> Mat4 {
        match nalgebra::Unit::try_new(axis, f32::EPSILON) {
            Some(unit) => Mat4::from_axis_angle(&unit, angle),
            None => Mat4::identity(),
        }
    }

    fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4 {
        let mut result = Mat4::identity();
        result[(0, 0)] = 2.0 / (right - left);
        result[(1, 1)] = 2.0 / (top - bottom);
        result[(2, 2)] = -1.0;
        result[(0, 3)] = -(right + left) / (right - left);
        result[(1, 3)] = -(top + bottom) / (top - bottom);
        result
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)])
    }

    fn normal_matrix(&self) -> Mat3 {
        let upper: Mat3 = self.fixed_view::<3, 3>(0, 0).into_owned();
        upper
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_degree_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
        assert_relative_eq!(utils::rad_to_deg(constants::PI * 0.5), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_trs_applies_scale_first() {
        let t = Mat4::translation_matrix(Vec3::new(1.0, 2.0, 3.0));
        let s = Mat4::scale_matrix(Vec3::new(2.0, 2.0, 2.0));
        let model = t * s;
        let p = model.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(3.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(model.translation_part(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        // +X rotated a quarter turn about +Y lands on -Z in a right-handed frame
        let r = Mat4::y_rotation(constants::PI * 0.5);
        let v = r.transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_orthographic_maps_screen_corners() {
        let ortho = Mat4::ortho_2d(0.0, 960.0, 0.0, 540.0);
        let corner = ortho.transform_point(&nalgebra::Point3::new(960.0, 540.0, 0.0));
        assert_relative_eq!(corner.coords, Vec3::new(1.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale() {
        let model = Mat4::scale_matrix(Vec3::new(2.0, 2.0, 2.0));
        let normal = model.normal_matrix();
        assert_relative_eq!(normal, Mat3::identity() * 0.5, epsilon = EPSILON);
    }
}
