//! # Lightmap UV
//!
//! A Rust library for generating lightmap UVs for triangle meshes.
//!
//! ## Overview
//!
//! Given a batch of meshes, the mapper computes a second UV channel that
//! has no overlapping triangles, groups faces pointing in similar
//! directions into connected islands, and packs every island into the unit
//! square. Vertices shared by two islands are split along the seam.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lightmap_uv::{SourceMesh, UvMapper, UnwrapConfig};
//!
//! let mesh = SourceMesh::new("floor", positions, indices);
//! let mapper = UvMapper::with_config(UnwrapConfig::default().with_island_margin(0.005));
//! let output = mapper.unwrap(&[mesh])?;
//!
//! for mesh in &output.meshes {
//!     upload(&mesh.positions, &mesh.lightmap_uvs, &mesh.indices);
//! }
//! let texels_per_unit = lightmap_size as f64 * output.world_to_texel_ratio;
//! ```
//!
//! ## Pipeline
//!
//! 1. Coincident vertices are grouped so split vertices still connect faces.
//! 2. Each triangle becomes a face record in world space.
//! 3. Faces are grouped by a few projection directions and flattened.
//! 4. Edge-connected faces in a group form islands, rotated to their
//!    minimum-area bounding box.
//! 5. Island boxes are packed into the unit square.
//! 6. Seams are resolved by duplicating vertices that received two UVs.

pub mod error;
pub mod types;
pub mod unwrap;
pub mod atlas;
pub mod export;
pub mod mesh_output;
pub mod scene;

// Re-export main types for convenience
pub use error::{UnwrapError, Result};
pub use types::{AttributeKind, SourceMesh, VertexAttribute, WorldTransform};
pub use unwrap::{UnwrapConfig, UvMapper};
pub use mesh_output::{UnwrapOutput, UnwrappedMesh};
pub use scene::Scene;
pub use export::{export_json, export_obj, render_preview_png};

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    scene::load_from_path(path)
}

/// Load a scene from JSON bytes (for WASM compatibility).
pub fn load_scene_from_bytes(data: &[u8]) -> Result<Scene> {
    scene::load_from_bytes(data)
}

/// Unwrap a batch of meshes with the given configuration.
pub fn unwrap_meshes(meshes: &[SourceMesh], config: UnwrapConfig) -> Result<UnwrapOutput> {
    UvMapper::with_config(config).unwrap(meshes)
}

#[cfg(feature = "wasm")]
pub mod wasm;
