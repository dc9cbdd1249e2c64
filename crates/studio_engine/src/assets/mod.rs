//! Asset interface
//!
//! Scene setup consumes model data through [`AssetLoader`]. Parsing model and
//! texture files happens outside the studio; loaders only hand over ready
//! vertex and index lists.

use std::collections::HashMap;

use thiserror::Error;

/// Interleaved vertex record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Texture role inside a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Base colour map
    Diffuse,
    /// Specular map
    Specular,
}

/// Reference to a texture the backend resolves on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    /// Texture role
    pub kind: TextureKind,
    /// Path as written in the model file
    pub path: String,
}

/// One drawable part of a loaded model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Part name
    pub name: String,
    /// Vertex records
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
    /// Textures used by this part
    pub textures: Vec<TextureRef>,
}

impl MeshData {
    /// Create a mesh without textures
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            textures: Vec::new(),
        }
    }

    /// Attach a texture reference
    pub fn with_texture(mut self, kind: TextureKind, path: impl Into<String>) -> Self {
        self.textures.push(TextureRef {
            kind,
            path: path.into(),
        });
        self
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Check that every index points at a vertex and the list is whole triangles
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::Parse(format!(
                "{}: index count {} is not a multiple of 3",
                self.name,
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= self.vertices.len()) {
            return Err(AssetError::Parse(format!(
                "{}: index {} out of range for {} vertices",
                self.name,
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Asset data could not be interpreted
    #[error("Failed to parse asset: {0}")]
    Parse(String),
}

/// Source of model data, consulted once during scene setup
pub trait AssetLoader {
    /// Load every part of the model at `path`
    fn load(&self, path: &str) -> Result<Vec<MeshData>, AssetError>;
}

/// Loader serving pre-built meshes from memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryLoader {
    models: HashMap<String, Vec<MeshData>>,
}

impl InMemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register model parts under `path`
    pub fn with_model(mut self, path: impl Into<String>, parts: Vec<MeshData>) -> Self {
        self.models.insert(path.into(), parts);
        self
    }
}

impl AssetLoader for InMemoryLoader {
    fn load(&self, path: &str) -> Result<Vec<MeshData>, AssetError> {
        let parts = self
            .models
            .get(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        for part in parts {
            part.validate()?;
        }
        log::debug!("Loaded {} mesh part(s) from {}", parts.len(), path);
        Ok(parts.clone())
    }
}
