//! Per-frame passes over the object list

pub mod proximity;
pub mod targeting;

pub use proximity::{check_proximity, player_position, DEFAULT_PROXIMITY_MARGIN};
pub use targeting::{cast_targets, TargetHit, TARGET_COLOR};
