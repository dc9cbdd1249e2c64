//! Shot targeting
//!
//! Casts the aim ray against every object and keeps the nearest hit. After
//! a pass at most one object is focused.

use crate::foundation::math::Vec3;
use crate::game::control::GameControl;
use crate::physics::Ray;
use crate::scene::object::{ObjectType, SceneObject};

/// Highlight colour of the selected target
pub const TARGET_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Nearest object hit by a shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    /// Index into the object list
    pub index: usize,
    /// Distance from the ray origin to the object's centre
    pub distance: f32,
}

/// Cast `ray` against `objects` and focus the nearest hit
///
/// Hits at `max_distance` or beyond are ignored. Equal distances keep the
/// earlier object. Every newly selected mesh lands an attack on the
/// adversary. Objects that end up unselected lose their focus.
pub fn cast_targets<O: SceneObject>(
    objects: &mut [O],
    ray: &Ray,
    game: &mut GameControl,
    now: f64,
    max_distance: f32,
) -> Option<TargetHit> {
    let mut selected: Option<TargetHit> = None;
    let mut closest = max_distance;

    for index in 0..objects.len() {
        let hit = objects[index]
            .intersect(ray)
            .filter(|&distance| distance < closest);

        let Some(distance) = hit else {
            objects[index].set_focus(false, Vec3::zeros(), now);
            continue;
        };

        if let Some(previous) = selected {
            objects[previous.index].set_focus(false, Vec3::zeros(), now);
        }
        let object = &mut objects[index];
        object.set_focus(true, TARGET_COLOR, now);
        log::debug!("Target {} hit at {:.2}", object.object_type(), distance);
        if object.object_type() == ObjectType::Mesh {
            game.attack_enemy(now);
        }

        closest = distance;
        selected = Some(TargetHit { index, distance });
    }

    selected
}
