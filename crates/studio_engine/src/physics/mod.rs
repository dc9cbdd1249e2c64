//! Physics module: the sphere approximations used for targeting and proximity

pub mod primitives;

pub use primitives::{BoundingSphere, Ray};
