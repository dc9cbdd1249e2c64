//! Per-frame studio environment
//!
//! A [`StudioEnvironment`] is rebuilt by the orchestrator at the start of
//! every frame and passed by reference to the passes and draw calls that
//! need it. Nothing holds on to it between frames.

use crate::core::config::{LightingConfig, WindowConfig};
use crate::foundation::math::{Vec2, Vec3};

/// Number of point lights carried in the lighting block
pub const NUM_POINT_LIGHTS: usize = 6;

/// Directional light terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light position
    pub position: Vec3,
    /// Ambient term
    pub ambient: Vec3,
    /// Diffuse term
    pub diffuse: Vec3,
    /// Specular term
    pub specular: Vec3,
}

impl From<&LightingConfig> for Light {
    fn from(config: &LightingConfig) -> Self {
        Self {
            position: Vec3::from(config.position),
            ambient: Vec3::from(config.ambient),
            diffuse: Vec3::from(config.diffuse),
            specular: Vec3::from(config.specular),
        }
    }
}

/// Lighting uniform block as laid out for upload
///
/// Every member is padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingBlock {
    /// Light position (w unused)
    pub light_position: [f32; 4],
    /// Ambient term
    pub ambient: [f32; 4],
    /// Diffuse term
    pub diffuse: [f32; 4],
    /// Specular term
    pub specular: [f32; 4],
    /// Eye position
    pub view_position: [f32; 4],
    /// Point light positions
    pub point_lights: [[f32; 4]; NUM_POINT_LIGHTS],
}

impl LightingBlock {
    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn padded(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

/// Shared per-frame context
#[derive(Debug, Clone, PartialEq)]
pub struct StudioEnvironment {
    /// Directional light
    pub light: Light,
    /// Point light positions around the arena
    pub point_lights: [Vec3; NUM_POINT_LIGHTS],
    /// Camera position
    pub view_position: Vec3,
    /// Camera gaze direction
    pub front: Vec3,
    /// Position of the player adversary this frame
    pub player_position: Vec3,
    /// Framebuffer size in pixels
    pub screen_size: Vec2,
    /// Stage used for enemy speed
    pub game_stage: i32,
}

impl StudioEnvironment {
    /// Environment with lighting from `lighting` and a screen from `window`
    #[allow(clippy::cast_precision_loss)]
    pub fn new(lighting: &LightingConfig, window: &WindowConfig) -> Self {
        let mut point_lights = [Vec3::zeros(); NUM_POINT_LIGHTS];
        for (slot, position) in point_lights.iter_mut().zip(&lighting.point_lights) {
            *slot = Vec3::from(*position);
        }

        Self {
            light: Light::from(lighting),
            point_lights,
            view_position: Vec3::zeros(),
            front: Vec3::z(),
            player_position: Vec3::zeros(),
            screen_size: Vec2::new(window.width as f32, window.height as f32),
            game_stage: 1,
        }
    }

    /// Pack the lighting terms for a shader
    pub fn lighting_block(&self) -> LightingBlock {
        LightingBlock {
            light_position: padded(self.light.position),
            ambient: padded(self.light.ambient),
            diffuse: padded(self.light.diffuse),
            specular: padded(self.light.specular),
            view_position: padded(self.view_position),
            point_lights: self.point_lights.map(padded),
        }
    }
}

impl Default for StudioEnvironment {
    fn default() -> Self {
        Self::new(&LightingConfig::default(), &WindowConfig::default())
    }
}
