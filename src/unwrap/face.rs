//! Per-triangle records flowing through the unwrap pipeline.

use super::dedup::VertexClasses;
use crate::error::{Result, UnwrapError};
use crate::types::{SourceMesh, WorldTransform};
use glam::{DVec2, DVec3};

/// Faces with an area at or below this are treated as degenerate.
pub const DEGENERATE_AREA: f64 = 1e-12;

/// Meshes addressable by a packed edge key.
pub const MAX_MESHES: usize = 1 << 16;
/// Vertices per mesh addressable by a packed edge key.
pub const MAX_VERTICES: usize = 1 << 24;

/// Direction-independent edge identifier.
///
/// Layout: mesh index in the top 16 bits, then the lower and the higher
/// canonical vertex index in 24 bits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u64);

impl EdgeKey {
    pub fn new(mesh: u32, a: u32, b: u32) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(((mesh as u64) << 48) | ((lo as u64) << 24) | hi as u64)
    }

    #[cfg(test)]
    pub fn mesh(&self) -> u32 {
        (self.0 >> 48) as u32
    }

    /// The two canonical vertex indices, lower first.
    #[cfg(test)]
    pub fn vertices(&self) -> (u32, u32) {
        (((self.0 >> 24) & 0xFF_FFFF) as u32, (self.0 & 0xFF_FFFF) as u32)
    }
}

/// Address of a face inside a [`FaceStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceHandle {
    pub mesh: u32,
    pub face: u32,
}

/// A triangle with its world-space geometry and working UVs.
#[derive(Debug, Clone)]
pub struct Face {
    /// Index of the source mesh in the mapper input.
    pub mesh: u32,
    /// Triangle offset in the source index buffer (in triangles).
    pub triangle: u32,
    /// Original vertex indices.
    pub vertices: [u32; 3],
    /// World-space corner positions.
    pub world: [DVec3; 3],
    /// Working UVs, rewritten by projection, rotation and packing.
    pub uv: [DVec2; 3],
    pub normal: DVec3,
    pub area: f64,
    /// Edge `k` joins corners `k` and `(k + 1) % 3`.
    pub edge_keys: [EdgeKey; 3],
}

impl Face {
    /// Zero-area and non-finite faces have no usable projection.
    pub fn is_degenerate(&self) -> bool {
        !self.area.is_finite() || self.area <= DEGENERATE_AREA
    }
}

/// Build one face per triangle of `mesh`.
pub fn build_faces(
    mesh_index: u32,
    mesh: &SourceMesh,
    transform: &WorldTransform,
    classes: &VertexClasses,
) -> Vec<Face> {
    mesh.indices
        .chunks_exact(3)
        .enumerate()
        .map(|(triangle, tri)| {
            let vertices = [tri[0], tri[1], tri[2]];
            let world = vertices.map(|v| transform.to_world(mesh.positions[v as usize]));

            let cross = (world[0] - world[1]).cross(world[2] - world[1]);
            let area = cross.length() / 2.0;

            let canonical = vertices.map(|v| classes.canonical(v));
            let edge_keys = [
                EdgeKey::new(mesh_index, canonical[0], canonical[1]),
                EdgeKey::new(mesh_index, canonical[1], canonical[2]),
                EdgeKey::new(mesh_index, canonical[2], canonical[0]),
            ];

            Face {
                mesh: mesh_index,
                triangle: triangle as u32,
                vertices,
                world,
                uv: [DVec2::ZERO; 3],
                normal: cross.normalize_or_zero(),
                area,
                edge_keys,
            }
        })
        .collect()
}

/// Check that a batch of meshes fits the packed edge-key layout.
pub fn check_limits(meshes: &[SourceMesh]) -> Result<()> {
    if meshes.len() > MAX_MESHES {
        return Err(UnwrapError::TooLarge(format!(
            "{} meshes (at most {} per batch)",
            meshes.len(),
            MAX_MESHES
        )));
    }
    if let Some(mesh) = meshes.iter().find(|m| m.vertex_count() > MAX_VERTICES) {
        return Err(UnwrapError::TooLarge(format!(
            "mesh '{}' has {} vertices (at most {})",
            mesh.name,
            mesh.vertex_count(),
            MAX_VERTICES
        )));
    }
    Ok(())
}

/// Faces of every mesh in a batch, addressed by [`FaceHandle`].
#[derive(Debug, Default)]
pub struct FaceStore {
    meshes: Vec<Vec<Face>>,
}

impl FaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the faces of the next mesh; returns its index.
    pub fn push_mesh(&mut self, faces: Vec<Face>) -> u32 {
        self.meshes.push(faces);
        (self.meshes.len() - 1) as u32
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, mesh: u32) -> &[Face] {
        &self.meshes[mesh as usize]
    }

    pub fn get(&self, handle: FaceHandle) -> &Face {
        &self.meshes[handle.mesh as usize][handle.face as usize]
    }

    pub fn get_mut(&mut self, handle: FaceHandle) -> &mut Face {
        &mut self.meshes[handle.mesh as usize][handle.face as usize]
    }
}
