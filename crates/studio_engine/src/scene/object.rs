//! Scene object capability set
//!
//! Every drawable in the studio implements [`SceneObject`]. The concrete
//! variants are gathered in the closed [`SceneObjectKind`] enum, which the
//! orchestrator stores in insertion order.

use std::fmt;

use crate::assets::MeshData;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4};
use crate::physics::Ray;
use crate::render::backend::{DrawParams, RenderBackend, RenderError};
use crate::scene::enemy_sphere::EnemySphere;
use crate::scene::environment::StudioEnvironment;
use crate::scene::instanced_field::InstancedField;
use crate::scene::mesh::MeshObject;
use crate::scene::overlay::OverlayRect;
use crate::scene::plane::StagePlane;
use crate::scene::primitive::Primitive;

/// Type tag reported by [`SceneObject::describe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Spinning primitive
    Primitive,
    /// Ground plane
    Plane,
    /// Screen-space overlay rectangle
    Overlay,
    /// Enemy sphere flying at the camera
    EnemySphere,
    /// Model-driven mesh; the player adversary
    Mesh,
    /// Instanced scenery field
    InstancedField,
}

impl ObjectType {
    /// Whether the proximity pass treats this type as a threat
    pub fn is_threat(self) -> bool {
        matches!(self, Self::EnemySphere | Self::Mesh)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primitive => "primitive",
            Self::Plane => "plane",
            Self::Overlay => "overlay",
            Self::EnemySphere => "enemy sphere",
            Self::Mesh => "mesh",
            Self::InstancedField => "instanced field",
        };
        f.write_str(name)
    }
}

/// Snapshot other subsystems read instead of digging into transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectState {
    /// Variant tag
    pub object_type: ObjectType,
    /// World position after the latest movement
    pub position: Vec3,
    /// Base colour
    pub color: Vec3,
    /// Radius proxy, the first diagonal term of the scale
    pub radius: f32,
}

/// Focus highlight state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Focus {
    /// Currently highlighted
    pub active: bool,
    /// Highlight colour
    pub color: Vec3,
    /// When the highlight started
    pub since: Option<f64>,
}

impl Focus {
    /// Whether the highlight has lasted longer than `timeout` seconds
    pub fn expired(&self, now: f64, timeout: f64) -> bool {
        self.active && self.since.is_some_and(|since| now - since > timeout)
    }
}

/// State shared by every variant
#[derive(Debug, Clone)]
pub struct ObjectBase {
    /// Translation part of the model matrix
    pub translate: Mat4,
    /// Scale part of the model matrix
    pub scale: Mat4,
    /// Current world position
    pub position: Vec3,
    /// Base colour
    pub color: Vec3,
    /// Highlight state
    pub focus: Focus,
    /// Geometry to draw
    pub mesh: MeshData,
}

impl ObjectBase {
    /// Untransformed object at the origin
    pub fn new(mesh: MeshData, color: Vec3) -> Self {
        Self {
            translate: Mat4::identity(),
            scale: Mat4::identity(),
            position: Vec3::zeros(),
            color,
            focus: Focus::default(),
            mesh,
        }
    }

    /// Store scale and translation; rotation is composed at draw time
    pub fn transform(&mut self, scale: Vec3, translate: Vec3) {
        self.scale = Mat4::scale_matrix(scale);
        self.translate = Mat4::translation_matrix(translate);
        self.position = translate;
    }

    /// Move the translation to `position`
    pub fn place(&mut self, position: Vec3) {
        self.translate = Mat4::translation_matrix(position);
        self.position = position;
    }

    /// Radius proxy taken from the scale matrix
    pub fn scale_radius(&self) -> f32 {
        self.scale[(0, 0)]
    }

    /// Set or clear the highlight
    pub fn set_focus(&mut self, focus: bool, color: Vec3, now: f64) {
        self.focus = if focus {
            Focus {
                active: true,
                color,
                since: Some(now),
            }
        } else {
            Focus::default()
        };
    }

    /// `T * R * S`
    pub fn model_matrix(&self, rotation: &Mat4) -> Mat4 {
        self.translate * rotation * self.scale
    }

    /// Colour to shade with, the highlight while focused
    pub fn shade_color(&self, alpha: f32) -> Vec4 {
        let rgb = if self.focus.active { self.focus.color } else { self.color };
        Vec4::new(rgb.x, rgb.y, rgb.z, alpha)
    }

    /// Draw parameters with the frame's camera and lighting filled in
    pub fn draw_params<'a>(
        &'a self,
        object: ObjectType,
        frame: &FrameContext<'_>,
        model: Mat4,
    ) -> DrawParams<'a> {
        DrawParams {
            object,
            mesh: &self.mesh,
            model,
            view: frame.view,
            projection: frame.projection,
            normal: model.normal_matrix(),
            color: self.shade_color(1.0),
            focused: self.focus.active,
            lighting: frame.env.lighting_block(),
        }
    }
}

/// Everything a draw call needs from the current frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Seconds since session start
    pub now: f64,
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// This frame's environment
    pub env: &'a StudioEnvironment,
}

/// Capabilities shared by all scene objects
pub trait SceneObject {
    /// Variant tag
    fn object_type(&self) -> ObjectType;

    /// Shared state
    fn base(&self) -> &ObjectBase;

    /// Shared state, mutably
    fn base_mut(&mut self) -> &mut ObjectBase;

    /// Set scale and translation
    fn transform(&mut self, scale: Vec3, translate: Vec3) {
        self.base_mut().transform(scale, translate);
    }

    /// Per-frame movement and lifecycle checks
    fn advance(&mut self, _now: f64, _env: &StudioEnvironment) {}

    /// Centre distance along `ray` if the ray hits the object
    fn intersect(&self, _ray: &Ray) -> Option<f32> {
        None
    }

    /// Set or clear the highlight
    fn set_focus(&mut self, focus: bool, color: Vec3, now: f64) {
        self.base_mut().set_focus(focus, color, now);
    }

    /// Whether the object is highlighted
    fn is_focused(&self) -> bool {
        self.base().focus.active
    }

    /// Change the base colour
    fn set_color(&mut self, color: Vec3) {
        self.base_mut().color = color;
    }

    /// Re-randomise relative to the player; static objects ignore it
    fn reset(&mut self, _env: &StudioEnvironment, _now: f64) {}

    /// Current snapshot
    fn describe(&self) -> ObjectState {
        let base = self.base();
        ObjectState {
            object_type: self.object_type(),
            position: base.position,
            color: base.color,
            radius: base.scale_radius(),
        }
    }

    /// Submit this object to the backend
    fn draw(
        &self,
        frame: &FrameContext<'_>,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError>;
}

/// Closed set of scene object variants
#[derive(Debug, Clone)]
pub enum SceneObjectKind {
    /// Spinning primitive
    Primitive(Primitive),
    /// Ground plane
    Plane(StagePlane),
    /// Screen-space overlay
    Overlay(OverlayRect),
    /// Enemy sphere
    EnemySphere(EnemySphere),
    /// Player adversary mesh
    Mesh(MeshObject),
    /// Instanced scenery
    InstancedField(InstancedField),
}

macro_rules! dispatch {
    ($value:expr, $object:ident => $body:expr) => {
        match $value {
            SceneObjectKind::Primitive($object) => $body,
            SceneObjectKind::Plane($object) => $body,
            SceneObjectKind::Overlay($object) => $body,
            SceneObjectKind::EnemySphere($object) => $body,
            SceneObjectKind::Mesh($object) => $body,
            SceneObjectKind::InstancedField($object) => $body,
        }
    };
}

impl SceneObject for SceneObjectKind {
    fn object_type(&self) -> ObjectType {
        dispatch!(self, object => object.object_type())
    }

    fn base(&self) -> &ObjectBase {
        dispatch!(self, object => object.base())
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        dispatch!(self, object => object.base_mut())
    }

    fn transform(&mut self, scale: Vec3, translate: Vec3) {
        dispatch!(self, object => object.transform(scale, translate));
    }

    fn advance(&mut self, now: f64, env: &StudioEnvironment) {
        dispatch!(self, object => object.advance(now, env));
    }

    fn intersect(&self, ray: &Ray) -> Option<f32> {
        dispatch!(self, object => object.intersect(ray))
    }

    fn set_focus(&mut self, focus: bool, color: Vec3, now: f64) {
        dispatch!(self, object => object.set_focus(focus, color, now));
    }

    fn is_focused(&self) -> bool {
        dispatch!(self, object => object.is_focused())
    }

    fn set_color(&mut self, color: Vec3) {
        dispatch!(self, object => object.set_color(color));
    }

    fn reset(&mut self, env: &StudioEnvironment, now: f64) {
        dispatch!(self, object => object.reset(env, now));
    }

    fn describe(&self) -> ObjectState {
        dispatch!(self, object => object.describe())
    }

    fn draw(
        &self,
        frame: &FrameContext<'_>,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        dispatch!(self, object => object.draw(frame, backend))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for SceneObjectKind {
                fn from(object: $ty) -> Self {
                    Self::$variant(object)
                }
            }
        )*
    };
}

impl_from_variant!(
    Primitive(Primitive),
    Plane(StagePlane),
    Overlay(OverlayRect),
    EnemySphere(EnemySphere),
    Mesh(MeshObject),
    InstancedField(InstancedField),
);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_sets_position_and_radius() {
        let mut base = ObjectBase::new(MeshData::default(), Vec3::new(1.0, 1.0, 1.0));
        base.transform(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(base.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(base.scale_radius(), 0.5);
        let model = base.model_matrix(&Mat4::identity());
        assert_relative_eq!(model.translation_part(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(model[(0, 0)], 0.5);
    }

    #[test]
    fn test_focus_timestamps() {
        let mut base = ObjectBase::new(MeshData::default(), Vec3::zeros());
        base.set_focus(true, Vec3::x(), 2.0);
        assert!(base.focus.active);
        assert_eq!(base.focus.since, Some(2.0));
        assert!(!base.focus.expired(2.5, 0.7));
        assert!(base.focus.expired(2.8, 0.7));
        assert_eq!(base.shade_color(0.3), Vec4::new(1.0, 0.0, 0.0, 0.3));

        base.set_focus(false, Vec3::x(), 3.0);
        assert!(!base.focus.active);
        assert_eq!(base.focus.since, None);
        assert!(!base.focus.expired(100.0, 0.7));
    }

    #[test]
    fn test_threat_types() {
        assert!(ObjectType::EnemySphere.is_threat());
        assert!(ObjectType::Mesh.is_threat());
        assert!(!ObjectType::InstancedField.is_threat());
        assert!(!ObjectType::Overlay.is_threat());
    }
}
