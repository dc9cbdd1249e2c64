//! Proximity damage
//!
//! Every frame, threats that come within reach of the camera hit the
//! player and respawn.

use crate::foundation::math::Vec3;
use crate::game::control::GameControl;
use crate::physics::BoundingSphere;
use crate::scene::environment::StudioEnvironment;
use crate::scene::object::{ObjectType, SceneObject};

/// Distance added to an object's radius when checking reach
pub const DEFAULT_PROXIMITY_MARGIN: f32 = 2.0;

/// Position of the first player-adversary mesh, if there is one
pub fn player_position<O: SceneObject>(objects: &[O]) -> Option<Vec3> {
    objects
        .iter()
        .map(SceneObject::describe)
        .find(|state| state.object_type == ObjectType::Mesh)
        .map(|state| state.position)
}

/// Run the proximity pass and return how many threats struck
///
/// Stores the player position in `env` first so respawning spheres start
/// from it. Each strike resets the object and costs one energy; strikes in
/// the same frame are not merged.
pub fn check_proximity<O: SceneObject>(
    objects: &mut [O],
    env: &mut StudioEnvironment,
    game: &mut GameControl,
    now: f64,
    margin: f32,
) -> usize {
    if let Some(position) = player_position(objects) {
        env.player_position = position;
    }

    let env = &*env;
    let mut strikes = 0;
    for object in objects.iter_mut() {
        let state = object.describe();
        if !state.object_type.is_threat() {
            continue;
        }
        let reach = BoundingSphere::new(state.position, state.radius);
        if reach.contains_with_margin(env.view_position, margin) {
            log::info!("Attacked by {}", state.object_type);
            object.reset(env, now);
            game.damaged(now);
            strikes += 1;
        }
    }
    strikes
}
