//! Shared types used throughout the library.

mod attribute;
mod transform;

pub use attribute::{AttributeKind, VertexAttribute};
pub use transform::WorldTransform;

use crate::error::{Result, UnwrapError};
use crate::unwrap::dedup::MAX_COORDINATE;
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// A read-only triangle mesh handed to the UV mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMesh {
    /// Stable name, used to order meshes that share one packed UV space.
    pub name: String,
    /// Local-space vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices (three per triangle).
    pub indices: Vec<u32>,
    /// Optional per-vertex streams, copied verbatim into the output.
    #[serde(default)]
    pub attributes: Vec<VertexAttribute>,
    /// Local-to-world transform.
    #[serde(default)]
    pub world_transform: Mat4,
}

impl SourceMesh {
    pub fn new(name: impl Into<String>, positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices,
            attributes: Vec::new(),
            world_transform: Mat4::IDENTITY,
        }
    }

    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.world_transform = transform;
        self
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Look up an attribute stream by kind.
    pub fn attribute(&self, kind: &AttributeKind) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| &a.kind == kind)
    }

    /// Check that the buffers are internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(UnwrapError::IndexCount {
                mesh: self.name.clone(),
                count: self.indices.len(),
            });
        }

        let vertex_count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(UnwrapError::IndexOutOfRange {
                mesh: self.name.clone(),
                index,
                vertex_count,
            });
        }

        let usable = |v: f32| v.is_finite() && v.abs() <= MAX_COORDINATE;
        if let Some((vertex, &position)) = self
            .positions
            .iter()
            .enumerate()
            .find(|(_, p)| !p.iter().all(|&v| usable(v)))
        {
            return Err(UnwrapError::InvalidPosition {
                mesh: self.name.clone(),
                vertex,
                position,
            });
        }

        if !self.world_transform.is_finite() {
            return Err(UnwrapError::InvalidTransform {
                mesh: self.name.clone(),
            });
        }

        for attribute in &self.attributes {
            let expected = vertex_count * attribute.components;
            if attribute.components == 0 || attribute.data.len() != expected {
                return Err(UnwrapError::AttributeLength {
                    mesh: self.name.clone(),
                    attribute: attribute.kind.to_string(),
                    len: attribute.data.len(),
                    expected,
                });
            }
        }

        Ok(())
    }
}
