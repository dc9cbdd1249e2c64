//! # Rendering Interface
//!
//! The studio never talks to a GPU directly. It computes camera matrices and
//! per-object draw parameters, then hands them to a [`RenderBackend`]. Text
//! goes through a [`TextOverlay`].

pub mod backend;
pub mod camera;
pub mod overlay;

pub use backend::{
    BackendResult, DrawParams, DrawRecord, HeadlessBackend, InstancedDrawParams, RenderBackend,
    RenderError,
};
pub use camera::{Camera, CameraMovement, Frustum, ProjectionMode};
pub use overlay::{LogTextOverlay, PrintedText, TextOverlay};
