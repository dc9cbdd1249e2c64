//! Scene objects
//!
//! The studio's drawables and the per-frame environment they read.
//!
//! ## Variants
//!
//! | Variant | Moves | Intersects |
//! |---|---|---|
//! | [`Primitive`] | spins about +Y | never |
//! | [`StagePlane`] | static | never |
//! | [`OverlayRect`] | screen space | never |
//! | [`EnemySphere`] | flies at the camera | scale radius |
//! | [`MeshObject`] | spiral, spins | twice the scale radius |
//! | [`InstancedField`] | static | never |

pub mod enemy_sphere;
pub mod environment;
pub mod geometry;
pub mod instanced_field;
pub mod mesh;
pub mod object;
pub mod overlay;
pub mod plane;
pub mod primitive;

pub use enemy_sphere::EnemySphere;
pub use environment::{LightingBlock, StudioEnvironment};
pub use instanced_field::{FieldLayout, InstancedField};
pub use mesh::MeshObject;
pub use object::{FrameContext, ObjectState, ObjectType, SceneObject, SceneObjectKind};
pub use overlay::OverlayRect;
pub use plane::StagePlane;
pub use primitive::Primitive;
