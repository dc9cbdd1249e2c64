//! Procedural geometry
//!
//! Built-in meshes for the variants that ship their own shape, and the
//! fallbacks used when a model file is unavailable.

use crate::assets::{MeshData, Vertex};
use crate::foundation::math::{utils, Vec3};

fn flat_vertex(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Vertex {
    Vertex::new(position, normal, tex_coord)
}

/// Unit icosahedron: 12 vertices, 20 faces, normals pointing outward
///
/// Poles sit on the Z axis with two rings of five vertices at `z = +-0.447`,
/// the lower ring rotated by 36 degrees.
pub fn icosahedron() -> MeshData {
    let ring_z = 1.0 / 5.0_f32.sqrt();
    let ring_r = 2.0 * ring_z;

    let mut positions = Vec::with_capacity(12);
    positions.push(Vec3::new(0.0, 0.0, 1.0));
    for i in 0..5 {
        let angle = utils::deg_to_rad(72.0 * i as f32);
        positions.push(Vec3::new(ring_r * angle.cos(), ring_r * angle.sin(), ring_z));
    }
    for i in 0..5 {
        let angle = utils::deg_to_rad(36.0 + 72.0 * i as f32);
        positions.push(Vec3::new(ring_r * angle.cos(), ring_r * angle.sin(), -ring_z));
    }
    positions.push(Vec3::new(0.0, 0.0, -1.0));

    let vertices = positions
        .iter()
        .map(|p| {
            let u = 0.5 + p.y.atan2(p.x) / (2.0 * std::f32::consts::PI);
            let v = 0.5 + p.z * 0.25;
            flat_vertex([p.x, p.y, p.z], [p.x, p.y, p.z], [u, v])
        })
        .collect();

    let upper = |i: u32| 1 + i % 5;
    let lower = |i: u32| 6 + i % 5;
    let mut indices = Vec::with_capacity(60);
    for i in 0..5 {
        indices.extend_from_slice(&[upper(i), upper(i + 1), 0]);
    }
    for i in 0..5 {
        indices.extend_from_slice(&[11, lower(i + 1), lower(i)]);
    }
    for i in 0..5 {
        indices.extend_from_slice(&[upper(i), lower(i), upper(i + 1)]);
        indices.extend_from_slice(&[upper(i + 1), lower(i), lower(i + 1)]);
    }

    MeshData::new("icosahedron", vertices, indices)
}

/// Quad spanning `[-1, 1]` in X and Y
pub fn quad() -> MeshData {
    let n = [0.0, 0.0, 1.0];
    MeshData::new(
        "quad",
        vec![
            flat_vertex([-1.0, -1.0, 0.0], n, [0.0, 0.0]),
            flat_vertex([1.0, -1.0, 0.0], n, [2.0, 0.0]),
            flat_vertex([1.0, 1.0, 0.0], n, [2.0, 2.0]),
            flat_vertex([-1.0, 1.0, 0.0], n, [0.0, 2.0]),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// Ground plane of half-extent `extent` at height `height`
pub fn ground_plane(extent: f32, height: f32) -> MeshData {
    let n = [0.0, 1.0, 0.0];
    MeshData::new(
        "ground",
        vec![
            flat_vertex([-extent, height, -extent], n, [0.0, 0.0]),
            flat_vertex([-extent, height, extent], n, [0.0, 1.0]),
            flat_vertex([extent, height, extent], n, [1.0, 1.0]),
            flat_vertex([extent, height, -extent], n, [1.0, 0.0]),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// Single triangle in the XY plane
pub fn triangle() -> MeshData {
    let n = [0.0, 0.0, 1.0];
    MeshData::new(
        "triangle",
        vec![
            flat_vertex([-0.5, -0.5, 0.0], n, [0.0, 0.0]),
            flat_vertex([0.5, -0.5, 0.0], n, [0.0, 1.0]),
            flat_vertex([0.0, 0.5, 0.0], n, [0.5, 1.0]),
        ],
        vec![0, 1, 2],
    )
}

/// Stand-in craft used when no model is loaded: a flat dart pointing down -Z
pub fn dart() -> MeshData {
    let tips = [
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(-0.8, 0.0, 0.6),
        Vec3::new(0.8, 0.0, 0.6),
        Vec3::new(0.0, 0.3, 0.4),
        Vec3::new(0.0, -0.15, 0.4),
    ];
    let faces: [[u32; 3]; 6] = [[0, 1, 3], [0, 3, 2], [1, 2, 3], [0, 4, 1], [0, 2, 4], [1, 4, 2]];

    let mut vertices = Vec::with_capacity(faces.len() * 3);
    let mut indices = Vec::with_capacity(faces.len() * 3);
    for face in &faces {
        let [a, b, c] = face.map(|i| tips[i as usize]);
        let normal = (b - a).cross(&(c - a)).normalize();
        for p in [a, b, c] {
            indices.push(u32::try_from(vertices.len()).unwrap_or(u32::MAX));
            vertices.push(flat_vertex([p.x, p.y, p.z], [normal.x, normal.y, normal.z], [0.0, 0.0]));
        }
    }

    MeshData::new("dart", vertices, indices)
}
