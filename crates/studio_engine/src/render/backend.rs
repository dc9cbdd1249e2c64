//! Render backend interface
//!
//! GPU submission lives behind [`RenderBackend`]. Failures are reported per
//! draw; the frame loop logs them and moves on to the next object.

use thiserror::Error;

use crate::assets::MeshData;
use crate::foundation::math::{Mat3, Mat4, Vec4};
use crate::scene::environment::LightingBlock;
use crate::scene::object::ObjectType;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A shader parameter the draw expected does not exist
    #[error("Missing render binding: {0}")]
    MissingBinding(String),

    /// The backend failed to submit the draw
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Everything needed to draw one object
#[derive(Debug, Clone)]
pub struct DrawParams<'a> {
    /// Which variant is drawing
    pub object: ObjectType,
    /// Geometry
    pub mesh: &'a MeshData,
    /// Model matrix
    pub model: Mat4,
    /// View matrix
    pub view: Mat4,
    /// Projection matrix
    pub projection: Mat4,
    /// Inverse-transpose of the model's upper 3x3
    pub normal: Mat3,
    /// Colour with alpha
    pub color: Vec4,
    /// Whether the focus highlight is applied
    pub focused: bool,
    /// Lighting uniform block
    pub lighting: LightingBlock,
}

/// One batched submission of many copies of a mesh
#[derive(Debug, Clone)]
pub struct InstancedDrawParams<'a> {
    /// Which variant is drawing
    pub object: ObjectType,
    /// Geometry shared by every instance
    pub mesh: &'a MeshData,
    /// Transform applied to the whole field
    pub model: Mat4,
    /// Per-instance transforms
    pub instances: &'a [Mat4],
    /// View matrix
    pub view: Mat4,
    /// Projection matrix
    pub projection: Mat4,
    /// Lighting uniform block
    pub lighting: LightingBlock,
}

/// Main rendering backend trait
pub trait RenderBackend {
    /// Draw a single object
    fn draw_object(&mut self, params: &DrawParams<'_>) -> BackendResult<()>;

    /// Draw many instances with one submission
    fn draw_instanced(&mut self, params: &InstancedDrawParams<'_>) -> BackendResult<()>;

    /// Finish the frame; blocking here paces the loop
    fn present(&mut self);
}

/// What the headless backend saw for one draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Which variant drew
    pub object: ObjectType,
    /// Model matrix
    pub model: Mat4,
    /// Colour with alpha
    pub color: Vec4,
    /// Whether the highlight was on
    pub focused: bool,
    /// Instance count (1 for single draws)
    pub instances: usize,
    /// Triangles per instance
    pub triangles: usize,
}

/// Backend without a GPU that records and logs every draw
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frame: Vec<DrawRecord>,
    last_frame: Vec<DrawRecord>,
    frames_presented: u64,
    unbound: Vec<ObjectType>,
}

impl HeadlessBackend {
    /// Create a new backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject draws of `object` with [`RenderError::MissingBinding`]
    pub fn with_missing_binding(mut self, object: ObjectType) -> Self {
        self.unbound.push(object);
        self
    }

    /// Draws recorded since the last present
    pub fn pending(&self) -> &[DrawRecord] {
        &self.frame
    }

    /// Draws of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawRecord] {
        &self.last_frame
    }

    /// Number of presented frames
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn check_binding(&self, object: ObjectType) -> BackendResult<()> {
        if self.unbound.contains(&object) {
            return Err(RenderError::MissingBinding(format!("{object} uniforms")));
        }
        Ok(())
    }
}

impl RenderBackend for HeadlessBackend {
    fn draw_object(&mut self, params: &DrawParams<'_>) -> BackendResult<()> {
        self.check_binding(params.object)?;
        log::trace!(
            "draw {} at {:?} color {:?}",
            params.object,
            (params.model[(0, 3)], params.model[(1, 3)], params.model[(2, 3)]),
            params.color
        );
        self.frame.push(DrawRecord {
            object: params.object,
            model: params.model,
            color: params.color,
            focused: params.focused,
            instances: 1,
            triangles: params.mesh.triangle_count(),
        });
        Ok(())
    }

    fn draw_instanced(&mut self, params: &InstancedDrawParams<'_>) -> BackendResult<()> {
        self.check_binding(params.object)?;
        log::trace!("draw {} x{}", params.object, params.instances.len());
        self.frame.push(DrawRecord {
            object: params.object,
            model: params.model,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            focused: false,
            instances: params.instances.len(),
            triangles: params.mesh.triangle_count(),
        });
        Ok(())
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        log::trace!("frame {} presented with {} draws", self.frames_presented, self.frame.len());
        self.last_frame = std::mem::take(&mut self.frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::environment::StudioEnvironment;

    fn params(mesh: &MeshData, object: ObjectType) -> DrawParams<'_> {
        DrawParams {
            object,
            mesh,
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            normal: Mat3::identity(),
            color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            focused: false,
            lighting: StudioEnvironment::default().lighting_block(),
        }
    }

    #[test]
    fn test_records_until_present() {
        let mesh = MeshData::default();
        let mut backend = HeadlessBackend::new();
        backend.draw_object(&params(&mesh, ObjectType::Mesh)).unwrap();
        assert_eq!(backend.pending().len(), 1);
        backend.present();
        assert!(backend.pending().is_empty());
        assert_eq!(backend.last_frame().len(), 1);
        assert_eq!(backend.frames_presented(), 1);
    }

    #[test]
    fn test_missing_binding_is_reported() {
        let mesh = MeshData::default();
        let mut backend = HeadlessBackend::new().with_missing_binding(ObjectType::EnemySphere);
        let result = backend.draw_object(&params(&mesh, ObjectType::EnemySphere));
        assert!(matches!(result, Err(RenderError::MissingBinding(_))));
        assert!(backend.pending().is_empty());
    }
}
