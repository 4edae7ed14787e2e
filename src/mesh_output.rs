//! Canonical unwrap output types.
//!
//! [`UnwrapOutput`] and [`UnwrappedMesh`] are the primary public result
//! types. Each mesh carries replacement vertex streams (seam vertices
//! appended), a rewritten index buffer and the new lightmap UV channel,
//! with zero-copy byte accessors for GPU upload.

use crate::error::Result;
use crate::types::{AttributeKind, VertexAttribute};
use serde::Serialize;

/// One mesh after unwrapping.
///
/// Vertices `0..n` of the source mesh keep their indices; vertices split
/// along seams are appended after them.
#[derive(Debug, Clone, Serialize)]
pub struct UnwrappedMesh {
    /// Name of the source mesh.
    pub name: String,
    /// Local-space vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Source attribute streams, extended with the seam vertices.
    pub attributes: Vec<VertexAttribute>,
    /// The generated lightmap UVs, one per vertex, in `[0, 1]`.
    pub lightmap_uvs: Vec<[f32; 2]>,
    /// Triangle indices (three per triangle).
    pub indices: Vec<u32>,
    /// UV units per world unit for this mesh.
    pub world_to_texel_ratio: f64,
    /// Islands built for this mesh before packing.
    pub islands: usize,
    /// Vertices appended along seams.
    pub seam_vertices: usize,
}

impl UnwrappedMesh {
    /// Returns `true` if this mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of vertices, seam vertices included.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Look up an attribute stream by kind.
    pub fn attribute(&self, kind: &AttributeKind) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| &a.kind == kind)
    }

    /// Raw bytes of the positions array. Zero-allocation view.
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the lightmap UV array. Zero-allocation view.
    pub fn lightmap_uvs_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lightmap_uvs)
    }

    /// Raw bytes of the indices array. Zero-allocation view.
    pub fn indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Raw bytes of one attribute stream.
    pub fn attribute_bytes(&self, kind: &AttributeKind) -> Option<&[u8]> {
        self.attribute(kind).map(|a| bytemuck::cast_slice(&a.data[..]))
    }
}

/// The result of unwrapping a batch of meshes.
#[derive(Debug, Clone, Serialize)]
pub struct UnwrapOutput {
    /// Unwrapped meshes, in input order.
    pub meshes: Vec<UnwrappedMesh>,
    /// UV units per world unit. With shared packing every mesh has this
    /// ratio; otherwise it is the smallest per-mesh ratio.
    pub world_to_texel_ratio: f64,
}

impl UnwrapOutput {
    /// Returns `true` if no mesh has any vertices.
    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(|m| m.is_empty())
    }

    /// Find a mesh by name.
    pub fn mesh(&self, name: &str) -> Option<&UnwrappedMesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// Total vertex count across all meshes.
    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count()).sum()
    }

    /// Total triangle count across all meshes.
    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    /// Total islands across all meshes.
    pub fn total_islands(&self) -> usize {
        self.meshes.iter().map(|m| m.islands).sum()
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String> {
        crate::export::json::export_json(self)
    }

    /// Export to OBJ format, lightmap UVs as `vt`.
    pub fn to_obj(&self) -> Result<String> {
        crate::export::obj::export_obj(self)
    }

    /// Render the packed UV layout as a PNG.
    pub fn preview_png(&self, size: u32) -> Result<Vec<u8>> {
        crate::export::preview::render_preview_png(self, size)
    }
}
