//! Model-driven mesh: the player adversary
//!
//! Spins about +Y and sweeps a spiral in the XY plane whose angular speed
//! grows with the stage. The pattern changes with `stage % 3`. Hits on it
//! drain enemy energy, so its hit sphere is twice its scale.

use crate::assets::MeshData;
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::{BoundingSphere, Ray};
use crate::render::backend::{RenderBackend, RenderError};
use crate::scene::environment::StudioEnvironment;
use crate::scene::object::{FrameContext, ObjectBase, ObjectType, SceneObject};
use crate::scene::primitive::spin;

/// Highlight duration, in seconds
pub const DEFAULT_FOCUS_TIMEOUT: f64 = 0.7;
/// Hit sphere radius relative to the scale
pub const HIT_RADIUS_FACTOR: f32 = 2.0;

/// Spiral position in the XY plane at time `now` for `stage`
#[allow(clippy::cast_possible_truncation)]
pub fn spiral(now: f64, stage: i32) -> Vec2 {
    let speed = (now * 30.0 * f64::from(stage)).to_radians();
    let reach = 10.0 * now.to_radians().sin();
    let rtan = speed.tan().min(100.0);
    let (sin, cos) = speed.sin_cos();

    let (x, y) = match stage.rem_euclid(3) {
        1 => (sin, cos),
        2 => (cos, sin),
        _ => (sin, sin),
    };
    Vec2::new(
        (x * rtan * reach + reach) as f32,
        (y * rtan * reach + reach) as f32,
    )
}

/// Player adversary mesh
#[derive(Debug, Clone)]
pub struct MeshObject {
    base: ObjectBase,
    focus_timeout: f64,
}

impl MeshObject {
    /// Mesh drawing `mesh` in `color`
    pub fn new(mesh: MeshData, color: Vec3) -> Self {
        Self {
            base: ObjectBase::new(mesh, color),
            focus_timeout: DEFAULT_FOCUS_TIMEOUT,
        }
    }

    /// Override the highlight duration
    pub fn with_focus_timeout(mut self, seconds: f64) -> Self {
        self.focus_timeout = seconds;
        self
    }
}

impl SceneObject for MeshObject {
    fn object_type(&self) -> ObjectType {
        ObjectType::Mesh
    }

    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn advance(&mut self, now: f64, env: &StudioEnvironment) {
        if self.base.focus.expired(now, self.focus_timeout) {
            self.base.focus = Default::default();
        }

        let xy = spiral(now, env.game_stage);
        let z = self.base.position.z;
        self.base.place(Vec3::new(xy.x, xy.y, z));
    }

    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let radius = self.base.scale_radius() * HIT_RADIUS_FACTOR;
        BoundingSphere::new(self.base.position, radius).cast(ray)
    }

    fn draw(
        &self,
        frame: &FrameContext<'_>,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let model = self.base.model_matrix(&spin(frame.now));
        let mut params = self.base.draw_params(ObjectType::Mesh, frame, model);
        if self.base.focus.active {
            // Focused meshes are lit in the highlight colour
            let c = self.base.focus.color;
            params.lighting.diffuse = [c.x, c.y, c.z, 0.0];
            params.lighting.specular = [c.x, c.y, c.z, 0.0];
        }
        backend.draw_object(&params)
    }
}
