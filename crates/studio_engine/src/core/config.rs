//! # Studio Configuration
//!
//! All tunables for a studio session, grouped by subsystem. Every section
//! defaults to the values the shooting scene was balanced with, so a config
//! file only needs to name what it changes.
//!
//! ## Sections
//!
//! - **Window**: framebuffer size and title
//! - **Camera**: initial pose, frustum and input sensitivity
//! - **Lighting**: directional light terms and the point lights around enemies
//! - **Gameplay**: energies, status windows, collision margins
//! - **Scene**: object counts, placements and the random seed
//! - **Engine**: logging

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError};

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            title: "Shooting Studio".to_string(),
        }
    }
}

impl WindowConfig {
    /// Width over height
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Initial camera pose and viewing frustum
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// World up reference
    pub world_up: [f32; 3],
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Keyboard movement speed in units per second
    pub speed: f32,
    /// Mouse sensitivity in degrees per pixel
    pub sensitivity: f32,
    /// Clamp pitch to avoid flipping over the poles
    pub constrain_pitch: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -25.0],
            target: [0.0, 0.0, 0.0],
            world_up: [0.0, 1.0, 0.0],
            near: 0.1,
            far: 200.0,
            fov: 67.0,
            speed: 10.0,
            sensitivity: 0.1,
            constrain_pitch: true,
        }
    }
}

/// Lighting terms shared by all lit objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Directional light position
    pub position: [f32; 3],
    /// Ambient term
    pub ambient: [f32; 3],
    /// Diffuse term
    pub diffuse: [f32; 3],
    /// Specular term
    pub specular: [f32; 3],
    /// Point lights used when shading enemy spheres
    pub point_lights: Vec<[f32; 3]>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 10.0, 0.0],
            ambient: [0.05; 3],
            diffuse: [0.4; 3],
            specular: [0.5; 3],
            point_lights: vec![
                [20.0, 0.0, 0.0],
                [-20.0, 0.0, 0.0],
                [0.0, 20.0, 0.0],
                [0.0, -20.0, 0.0],
                [0.0, 0.0, 20.0],
                [0.0, 0.0, -20.0],
            ],
        }
    }
}

/// Game rules and collision tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Player energy at the start of every stage
    pub player_energy: i32,
    /// Enemy energy per stage level
    pub base_enemy_energy: i32,
    /// How long the shot marker stays up, in seconds
    pub shot_window: f64,
    /// How long the damaged banner stays up, in seconds
    pub damaged_window: f64,
    /// How long the stage banner stays up, in seconds
    pub stage_cleared_window: f64,
    /// Extra distance added to a threat's radius for the proximity test
    pub proximity_margin: f32,
    /// Hits farther than this are ignored by targeting
    pub max_target_distance: f32,
    /// Enemy spheres respawn this long after being targeted
    pub sphere_focus_timeout: f64,
    /// Enemy spheres respawn after this lifetime
    pub sphere_lifetime: f64,
    /// Player meshes drop focus after this long
    pub mesh_focus_timeout: f64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_energy: 5,
            base_enemy_energy: 30,
            shot_window: 0.15,
            damaged_window: 1.5,
            stage_cleared_window: 0.5,
            proximity_margin: 2.0,
            max_target_distance: 1000.0,
            sphere_focus_timeout: 0.3,
            sphere_lifetime: 10.0,
            mesh_focus_timeout: 0.7,
        }
    }
}

/// Scene population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of enemy spheres
    pub enemy_sphere_count: usize,
    /// Uniform scale of each enemy sphere
    pub sphere_scale: f32,
    /// Where enemy spheres are placed before their first reset
    pub sphere_spawn: [f32; 3],
    /// Model file for the player adversary; procedural geometry when absent
    pub player_model: Option<String>,
    /// Uniform scale of the player adversary
    pub player_scale: f32,
    /// Initial placement of the player adversary
    pub player_position: [f32; 3],
    /// Model file for instanced field members; procedural geometry when absent
    pub field_model: Option<String>,
    /// Uniform scale of the instanced field
    pub field_scale: f32,
    /// Centre of the instanced field
    pub field_position: [f32; 3],
    /// Number of instances in the field
    pub field_instances: usize,
    /// Ring radius of the field
    pub field_radius: f32,
    /// Random displacement range around the ring
    pub field_offset: f32,
    /// Seed for all per-object random generators
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            enemy_sphere_count: 10,
            sphere_scale: 0.5,
            sphere_spawn: [0.0, 0.0, -2.0],
            player_model: None,
            player_scale: 2.0,
            player_position: [0.0, 0.0, 0.0],
            field_model: None,
            field_scale: 2.0,
            field_position: [0.0, 0.0, -30.0],
            field_instances: 150,
            field_radius: 50.0,
            field_offset: 30.0,
            seed: 0x5eed,
        }
    }
}

/// # Engine Configuration
///
/// Core runtime behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Stop after this many frames; run until closed when unset
    pub max_frames: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frames: None,
        }
    }
}

impl EngineConfig {
    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Bound the session length
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }
}

/// # Complete Studio Configuration
///
/// Top-level configuration for one studio session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Lighting settings
    pub lighting: LightingConfig,
    /// Game rules
    pub gameplay: GameplayConfig,
    /// Scene population
    pub scene: SceneConfig,
    /// Runtime behaviour
    pub engine: EngineConfig,
}

impl StudioConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        let cam = &self.camera;
        if cam.near <= 0.0 {
            return invalid(format!("near plane must be positive, got {}", cam.near));
        }
        if cam.far <= cam.near {
            return invalid(format!("far plane {} must exceed near plane {}", cam.far, cam.near));
        }
        if !(cam.fov > 0.0 && cam.fov < 180.0) {
            return invalid(format!("field of view must be in (0, 180), got {}", cam.fov));
        }
        if (Vec3::from(cam.target) - Vec3::from(cam.position)).norm() <= f32::EPSILON {
            return invalid("camera position and target coincide".to_string());
        }

        let play = &self.gameplay;
        if play.player_energy <= 0 || play.base_enemy_energy <= 0 {
            return invalid("energies must be positive".to_string());
        }

        Ok(())
    }
}

impl Config for StudioConfig {}
