//! Stage plane: the static floor under the arena

use crate::foundation::math::{Mat4, Vec3};
use crate::render::backend::{RenderBackend, RenderError};
use crate::scene::geometry;
use crate::scene::object::{FrameContext, ObjectBase, ObjectType, SceneObject};

/// Half-extent of the floor
pub const STAGE_EXTENT: f32 = 100.0;
/// Floor height
pub const STAGE_HEIGHT: f32 = -1.0;

/// Static ground plane
#[derive(Debug, Clone)]
pub struct StagePlane {
    base: ObjectBase,
}

impl StagePlane {
    /// Floor in `color`
    pub fn new(color: Vec3) -> Self {
        Self {
            base: ObjectBase::new(geometry::ground_plane(STAGE_EXTENT, STAGE_HEIGHT), color),
        }
    }
}

impl SceneObject for StagePlane {
    fn object_type(&self) -> ObjectType {
        ObjectType::Plane
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
        let model = self.base.model_matrix(&Mat4::identity());
        backend.draw_object(&self.base.draw_params(ObjectType::Plane, frame, model))
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
    fn test_draws_unrotated() {
        let env = StudioEnvironment::default();
        let frame = FrameContext {
            now: 3.0,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            env: &env,
        };
        let plane = StagePlane::new(Vec3::new(0.5, 0.5, 0.5));
        let mut backend = HeadlessBackend::new();
        plane.draw(&frame, &mut backend).unwrap();
        let record = &backend.pending()[0];
        assert_eq!(record.object, ObjectType::Plane);
        assert_relative_eq!(record.model, Mat4::identity());
    }

    #[test]
    fn test_never_intersects() {
        let plane = StagePlane::new(Vec3::zeros());
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::y());
        assert!(plane.intersect(&down).is_none());
    }

    #[test]
    fn test_reset_keeps_placement() {
        let mut plane = StagePlane::new(Vec3::zeros());
        plane.transform(Vec3::new(2.0, 1.0, 2.0), Vec3::new(0.0, -3.0, 0.0));
        let before = plane.base().model_matrix(&Mat4::identity());
        plane.reset(&StudioEnvironment::default(), 1.0);
        assert_relative_eq!(plane.base().model_matrix(&Mat4::identity()), before);
    }
}
