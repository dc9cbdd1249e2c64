//! Spinning primitive
//!
//! A flat triangle turning about +Y. Decorative only: it never intersects
//! rays and ignores resets.

use crate::assets::MeshData;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::render::backend::{RenderBackend, RenderError};
use crate::scene::geometry;
use crate::scene::object::{FrameContext, ObjectBase, ObjectType, SceneObject};

/// Spin rate in degrees per second
pub const SPIN_DEGREES_PER_SECOND: f64 = 50.0;

/// Rotation about +Y at `SPIN_DEGREES_PER_SECOND` for time `now`
#[allow(clippy::cast_possible_truncation)]
pub fn spin(now: f64) -> Mat4 {
    let degrees = (now * SPIN_DEGREES_PER_SECOND) % 360.0;
    Mat4::y_rotation(utils::deg_to_rad(degrees as f32))
}

/// Spinning primitive
#[derive(Debug, Clone)]
pub struct Primitive {
    base: ObjectBase,
}

impl Primitive {
    /// Triangle primitive in `color`
    pub fn triangle(color: Vec3) -> Self {
        Self::with_mesh(geometry::triangle(), color)
    }

    /// Primitive drawing arbitrary geometry
    pub fn with_mesh(mesh: MeshData, color: Vec3) -> Self {
        Self {
            base: ObjectBase::new(mesh, color),
        }
    }
}

impl SceneObject for Primitive {
    fn object_type(&self) -> ObjectType {
        ObjectType::Primitive
    }

    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn draw(
        &self,
        frame: &FrameContext<'_>,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let model = self.base.model_matrix(&spin(frame.now));
        backend.draw_object(&self.base.draw_params(ObjectType::Primitive, frame, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Ray;
    use crate::render::backend::HeadlessBackend;
    use crate::scene::environment::StudioEnvironment;
    use approx::assert_relative_eq;

    #[test]
    fn test_spin_quarter_turn() {
        // 1.8 s at 50 deg/s is 90 degrees: +X turns to -Z
        let rotated = spin(1.8).transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, -Vec3::z(), epsilon = 1e-5);
    }

    #[test]
    fn test_never_intersects() {
        let mut primitive = Primitive::triangle(Vec3::new(0.0, 1.0, 0.0));
        primitive.transform(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 5.0));
        assert!(primitive.intersect(&Ray::new(Vec3::zeros(), Vec3::z())).is_none());
    }

    #[test]
    fn test_draws_with_rotation_between_translation_and_scale() {
        let env = StudioEnvironment::default();
        let frame = FrameContext {
            now: 0.0,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            env: &env,
        };
        let mut primitive = Primitive::triangle(Vec3::new(0.0, 1.0, 0.0));
        primitive.transform(Vec3::new(2.0, 2.0, 2.0), Vec3::new(1.0, 0.0, 0.0));
        let mut backend = HeadlessBackend::new();
        primitive.draw(&frame, &mut backend).unwrap();
        let record = &backend.pending()[0];
        assert_eq!(record.object, ObjectType::Primitive);
        assert_relative_eq!(record.model[(0, 0)], 2.0, epsilon = 1e-6);
        assert_relative_eq!(record.model[(0, 3)], 1.0, epsilon = 1e-6);
    }
}
