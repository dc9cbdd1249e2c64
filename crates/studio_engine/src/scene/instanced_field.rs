//! Instanced scenery field
//!
//! A disc of small rocks generated once at construction: half of them on a
//! ring in the XZ plane, half on a perpendicular ring in the XY plane, each
//! band kept thin. All instances go to the backend in one submission.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::MeshData;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::render::backend::{InstancedDrawParams, RenderBackend, RenderError};
use crate::scene::object::{FrameContext, ObjectBase, ObjectType, SceneObject};

/// Axis every rock tumbles about
pub const TUMBLE_AXIS: [f32; 3] = [0.4, 0.6, 0.8];
/// Centre line of the thin dimension of each band
pub const BAND_CENTRE: f32 = -2.5;
/// How much of the displacement reaches the thin dimension
pub const BAND_SQUASH: f32 = 0.4;

/// Shape of the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLayout {
    /// Number of instances
    pub count: usize,
    /// Ring radius
    pub radius: f32,
    /// Maximum random displacement from the ring
    pub offset: f32,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            count: 150,
            radius: 50.0,
            offset: 30.0,
        }
    }
}

fn displacement(rng: &mut StdRng, offset: f32) -> f32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let span = ((2.0 * offset * 100.0) as u32).max(1);
    #[allow(clippy::cast_precision_loss)]
    let jitter = rng.gen_range(0..span) as f32 / 100.0;
    jitter - offset
}

/// Per-instance transforms for `layout`
#[allow(clippy::cast_precision_loss)]
pub fn generate_instances(layout: &FieldLayout, rng: &mut StdRng) -> Vec<Mat4> {
    let axis = Vec3::from(TUMBLE_AXIS);
    let first_band = layout.count / 2;
    let bands = [first_band, layout.count - first_band];

    let mut instances = Vec::with_capacity(layout.count);
    for (band, &amount) in bands.iter().enumerate() {
        for i in 0..amount {
            let angle = utils::deg_to_rad(i as f32 / amount as f32 * 360.0);
            let along = displacement(rng, layout.offset);
            let thin = BAND_CENTRE + displacement(rng, layout.offset) * BAND_SQUASH;
            let across = displacement(rng, layout.offset);

            let ring_a = angle.sin() * layout.radius + along;
            let ring_b = angle.cos() * layout.radius + across;
            let position = if band == 0 {
                Vec3::new(ring_a, thin, ring_b)
            } else {
                Vec3::new(ring_b, ring_a, thin)
            };

            let scale = rng.gen_range(0..20) as f32 / 100.0 + 0.05;
            let tumble = utils::deg_to_rad(rng.gen_range(0..360) as f32);

            instances.push(
                Mat4::translation_matrix(position)
                    * Mat4::axis_rotation(axis, tumble)
                    * Mat4::scale_matrix(Vec3::repeat(scale)),
            );
        }
    }
    instances
}

/// Field of instanced rocks
#[derive(Debug, Clone)]
pub struct InstancedField {
    base: ObjectBase,
    instances: Vec<Mat4>,
}

impl InstancedField {
    /// Generate a field of `mesh` copies from `seed`
    pub fn new(mesh: MeshData, layout: &FieldLayout, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let instances = generate_instances(layout, &mut rng);
        log::debug!("Generated {} field instances", instances.len());
        Self {
            base: ObjectBase::new(mesh, Vec3::new(1.0, 1.0, 1.0)),
            instances,
        }
    }

    /// Per-instance transforms
    pub fn instances(&self) -> &[Mat4] {
        &self.instances
    }
}

impl SceneObject for InstancedField {
    fn object_type(&self) -> ObjectType {
        ObjectType::InstancedField
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
        backend.draw_instanced(&InstancedDrawParams {
            object: ObjectType::InstancedField,
            mesh: &self.base.mesh,
            model: self.base.model_matrix(&Mat4::identity()),
            instances: &self.instances,
            view: frame.view,
            projection: frame.projection,
            lighting: frame.env.lighting_block(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Ray;
    use crate::render::backend::HeadlessBackend;
    use crate::scene::environment::StudioEnvironment;
    use crate::scene::geometry;
    use approx::assert_relative_eq;

    fn field(seed: u64) -> InstancedField {
        InstancedField::new(geometry::icosahedron(), &FieldLayout::default(), seed)
    }

    #[test]
    fn test_instance_count_and_bands() {
        let field = field(11);
        let instances = field.instances();
        assert_eq!(instances.len(), 150);

        let thin_limit = (BAND_CENTRE.abs() + 30.0 * BAND_SQUASH) + 1e-3;
        for (i, m) in instances.iter().enumerate() {
            let t = m.translation_part();
            let thin = if i < 75 { t.y } else { t.z };
            assert!(thin.abs() <= thin_limit, "instance {i} left its band: {t:?}");
            assert!(t.norm() <= 50.0 + 30.0 * 2.0);
        }
    }

    #[test]
    fn test_instance_scales_in_range() {
        for m in field(12).instances() {
            let scale = Vec3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]).norm();
            assert!((0.05 - 1e-5..=0.24 + 1e-5).contains(&scale), "scale {scale}");
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        assert_eq!(field(7).instances(), field(7).instances());
        assert_ne!(field(7).instances(), field(8).instances());
    }

    #[test]
    fn test_never_intersects() {
        let mut field = field(1);
        field.transform(Vec3::new(2.0, 2.0, 2.0), Vec3::new(0.0, 0.0, -30.0));
        assert!(field.intersect(&Ray::new(Vec3::zeros(), -Vec3::z())).is_none());
    }

    #[test]
    fn test_single_batched_draw() {
        let env = StudioEnvironment::default();
        let frame = FrameContext {
            now: 0.0,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            env: &env,
        };
        let mut backend = HeadlessBackend::new();
        field(3).draw(&frame, &mut backend).unwrap();
        assert_eq!(backend.pending().len(), 1);
        assert_eq!(backend.pending()[0].instances, 150);
        assert_relative_eq!(backend.pending()[0].model[(0, 0)], 1.0);
    }
}
