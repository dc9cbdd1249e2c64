//! # Core Module
//!
//! Shared configuration used by every studio subsystem.

pub mod config;

pub use config::{
    CameraConfig, Config, ConfigError, EngineConfig, GameplayConfig, LightingConfig, SceneConfig,
    StudioConfig, WindowConfig,
};
