//! # Studio Engine
//!
//! A camera-driven shooting studio: a free-look camera, a handful of scene
//! object kinds, ray targeting, proximity damage and stage progression,
//! advanced one frame at a time by [`Studio`].
//!
//! ## Features
//!
//! - **Lazy camera**: view and projection matrices are cached until a
//!   mutation marks them stale
//! - **Closed object set**: six scene object variants behind one
//!   [`scene::SceneObject`] capability trait
//! - **Time-windowed game state**: status predicates over explicit `now`
//!   timestamps, driven by a [`foundation::time::Clock`]
//! - **Headless by default**: rendering, text and input are traits with
//!   recording implementations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studio_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = StudioConfig::default();
//!     config.engine = config.engine.with_max_frames(600);
//!     let mut studio = Studio::new(config, &InMemoryLoader::new())?;
//!
//!     let clock = SystemClock::new();
//!     let mut input = ScriptedInput::new([InputFrame::idle(960, 540)]);
//!     let mut backend = HeadlessBackend::new();
//!     let mut overlay = LogTextOverlay::new();
//!     studio.run(&clock, &mut input, &mut backend, &mut overlay);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod game;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod systems;

mod studio;

#[cfg(test)]
mod tests;

pub use studio::{FrameReport, Studio, StudioError};

/// Common imports for studio users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetLoader, InMemoryLoader, MeshData},
        config::Config,
        core::config::StudioConfig,
        foundation::{
            math::{Mat4, Vec2, Vec3},
            time::{Clock, ManualClock, SystemClock, Timer},
        },
        game::{GameControl, Headline},
        input::{InputFrame, InputSource, Keys, ScriptedInput},
        render::{
            backend::{HeadlessBackend, RenderBackend, RenderError},
            camera::Camera,
            overlay::{LogTextOverlay, TextOverlay},
        },
        scene::{ObjectType, SceneObject, SceneObjectKind, StudioEnvironment},
        FrameReport, Studio, StudioError,
    };
}
