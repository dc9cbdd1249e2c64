//! Game rules and status display

pub mod control;
pub mod status;

pub use control::{GameControl, StatusWindows, BASE_ENEMY_ENERGY, PLAYER_ENERGY};
pub use status::{Headline, StatusDisplay, StatusText};
