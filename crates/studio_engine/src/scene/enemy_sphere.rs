//! Enemy sphere
//!
//! Spawns at the player adversary, then flies a straight line toward the
//! camera by a fixed step each frame. It respawns once it passes behind the
//! camera, shortly after being targeted, or when its lifetime runs out.
//!
//! Each sphere owns a seeded generator so a run can be replayed exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::math::{utils, Mat4, Vec3};
use crate::physics::{BoundingSphere, Ray};
use crate::render::backend::{RenderBackend, RenderError};
use crate::scene::environment::StudioEnvironment;
use crate::scene::geometry;
use crate::scene::object::{FrameContext, ObjectBase, ObjectType, SceneObject};

/// Base distance covered per frame at stage 1
pub const DEFAULT_MOVING_DISTANCE: f32 = 0.1;
/// Respawn delay after being targeted, in seconds
pub const DEFAULT_FOCUS_TIMEOUT: f64 = 0.3;
/// Maximum flight time, in seconds
pub const DEFAULT_LIFETIME: f64 = 10.0;

/// Sphere flying at the camera
#[derive(Debug, Clone)]
pub struct EnemySphere {
    base: ObjectBase,
    origin: Vec3,
    movement: Vec3,
    step: Vec3,
    spawned_at: Option<f64>,
    rng: StdRng,
    focus_timeout: f64,
    lifetime: f64,
}

impl EnemySphere {
    /// Sphere whose flights are drawn from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            base: ObjectBase::new(geometry::icosahedron(), Vec3::zeros()),
            origin: Vec3::zeros(),
            movement: Vec3::zeros(),
            step: Vec3::zeros(),
            spawned_at: None,
            rng: StdRng::seed_from_u64(seed),
            focus_timeout: DEFAULT_FOCUS_TIMEOUT,
            lifetime: DEFAULT_LIFETIME,
        }
    }

    /// Override the respawn timings
    pub fn with_timing(mut self, focus_timeout: f64, lifetime: f64) -> Self {
        self.focus_timeout = focus_timeout;
        self.lifetime = lifetime;
        self
    }

    /// Per-frame displacement of the current flight
    pub fn step(&self) -> Vec3 {
        self.step
    }

    /// Where the current flight started
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// When the current flight started; `None` before the first update
    pub fn spawned_at(&self) -> Option<f64> {
        self.spawned_at
    }

    fn should_respawn(&self, now: f64, env: &StudioEnvironment) -> bool {
        let behind_camera = (self.base.position - env.view_position).dot(&env.front) < 0.0;
        let expired = self
            .spawned_at
            .is_some_and(|spawned| now - spawned > self.lifetime);
        behind_camera || self.base.focus.expired(now, self.focus_timeout) || expired
    }
}

/// Flight step and colour for one spawn, both derived from the draw `m`
#[allow(clippy::cast_precision_loss)]
fn flight(origin: Vec3, env: &StudioEnvironment, m: u32) -> (Vec3, Vec3) {
    let angle = utils::deg_to_rad(m as f32);
    let heading = (env.view_position - origin)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vec3::zeros);
    let step = heading * DEFAULT_MOVING_DISTANCE * env.game_stage as f32 * (angle.sin() + 1.5);
    let color = Vec3::new(
        angle.sin().max(0.0),
        angle.cos().max(0.0),
        angle.tan().clamp(0.0, 1.0),
    );
    (step, color)
}

impl SceneObject for EnemySphere {
    fn object_type(&self) -> ObjectType {
        ObjectType::EnemySphere
    }

    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn advance(&mut self, now: f64, env: &StudioEnvironment) {
        if self.spawned_at.is_none() {
            self.reset(env, now);
        }

        self.movement += self.step;
        self.base.place(self.origin + self.movement);

        if self.should_respawn(now, env) {
            self.reset(env, now);
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<f32> {
        BoundingSphere::new(self.base.position, self.base.scale_radius()).cast(ray)
    }

    fn reset(&mut self, env: &StudioEnvironment, now: f64) {
        let m = self.rng.gen_range(0..1000);
        let (step, color) = flight(env.player_position, env, m);

        self.origin = env.player_position;
        self.movement = Vec3::zeros();
        self.step = step;
        self.spawned_at = Some(now);
        self.base.focus = Default::default();
        self.base.color = color;
        self.base.place(self.origin);
        log::trace!("enemy sphere respawned at {:?} step {:?}", self.origin, self.step);
    }

    fn draw(
        &self,
        frame: &FrameContext<'_>,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let model = self.base.model_matrix(&Mat4::identity());
        backend.draw_object(&self.base.draw_params(ObjectType::EnemySphere, frame, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn env_with_camera(view: Vec3, front: Vec3) -> StudioEnvironment {
        StudioEnvironment {
            view_position: view,
            front,
            ..StudioEnvironment::default()
        }
    }

    fn sphere(seed: u64) -> EnemySphere {
        let mut sphere = EnemySphere::new(seed);
        sphere.transform(Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.0, 0.0, -2.0));
        sphere
    }

    #[test]
    fn test_resets_on_first_update() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let mut enemy = sphere(1);
        assert!(enemy.spawned_at().is_none());
        enemy.advance(3.0, &env);
        assert_eq!(enemy.spawned_at(), Some(3.0));
        assert_relative_eq!(enemy.origin(), env.player_position);
        assert_relative_eq!(enemy.describe().position, enemy.step(), epsilon = EPSILON);
    }

    #[test]
    fn test_flies_toward_camera() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let mut enemy = sphere(2);
        enemy.advance(0.0, &env);
        let step = enemy.step();
        assert!(step.z < 0.0);
        assert_relative_eq!(step.x, 0.0, epsilon = EPSILON);
        let magnitude = step.norm();
        assert!(magnitude >= 0.05 - EPSILON && magnitude <= 0.25 + EPSILON);

        for frame in 1..5 {
            enemy.advance(f64::from(frame) * 0.016, &env);
        }
        assert_relative_eq!(enemy.describe().position, step * 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_same_seed_same_flights() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let mut a = sphere(42);
        let mut b = sphere(42);
        for frame in 0..3 {
            let now = f64::from(frame);
            a.reset(&env, now);
            b.reset(&env, now);
            assert_eq!(a.step(), b.step());
            assert_eq!(a.describe().color, b.describe().color);
        }
    }

    #[test]
    fn test_step_scales_with_stage() {
        let mut env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let mut stage_one = sphere(9);
        stage_one.reset(&env, 0.0);
        env.game_stage = 2;
        let mut stage_two = sphere(9);
        stage_two.reset(&env, 0.0);
        assert_relative_eq!(stage_two.step(), stage_one.step() * 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_color_follows_draw() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let (_, color) = flight(Vec3::zeros(), &env, 30);
        assert_relative_eq!(color, Vec3::new(0.5, 0.75_f32.sqrt(), (1.0_f32 / 3.0).sqrt()), epsilon = EPSILON);
        let (_, color) = flight(Vec3::zeros(), &env, 200);
        assert_eq!(color.x, 0.0);
        assert_eq!(color.y, 0.0);
    }

    #[test]
    fn test_respawns_behind_camera() {
        // Camera looking away from the spawn point
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), -Vec3::z());
        let mut enemy = sphere(3);
        enemy.advance(0.0, &env);
        enemy.advance(1.0, &env);
        assert_eq!(enemy.spawned_at(), Some(1.0));
    }

    #[test]
    fn test_respawns_after_focus_timeout() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let mut enemy = sphere(4);
        enemy.advance(0.0, &env);
        enemy.set_focus(true, Vec3::x(), 1.0);
        enemy.advance(1.2, &env);
        assert!(enemy.is_focused());
        assert_eq!(enemy.spawned_at(), Some(0.0));
        enemy.advance(1.4, &env);
        assert!(!enemy.is_focused());
        assert_eq!(enemy.spawned_at(), Some(1.4));
    }

    #[test]
    fn test_respawns_after_lifetime() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -1000.0), Vec3::z());
        let mut enemy = sphere(5);
        enemy.advance(0.0, &env);
        enemy.advance(9.9, &env);
        assert_eq!(enemy.spawned_at(), Some(0.0));
        enemy.advance(10.5, &env);
        assert_eq!(enemy.spawned_at(), Some(10.5));
    }

    #[test]
    fn test_intersect_uses_scale_radius() {
        let env = env_with_camera(Vec3::new(0.0, 0.0, -25.0), Vec3::z());
        let mut enemy = sphere(6);
        enemy.reset(&env, 0.0);
        let origin = Vec3::new(0.0, 0.0, -10.0);
        let hit = enemy.intersect(&Ray::new(origin, Vec3::z()));
        assert_relative_eq!(hit.unwrap(), 10.0, epsilon = EPSILON);
        let miss = enemy.intersect(&Ray::new(Vec3::new(0.6, 0.0, -10.0), Vec3::z()));
        assert!(miss.is_none());
    }
}
