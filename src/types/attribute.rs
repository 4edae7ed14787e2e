//! Per-vertex attribute streams carried through the unwrap untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a vertex attribute stream holds.
///
/// The mapper never interprets attribute contents; the kind only names the
/// stream so the caller can write it back to the right vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Normal,
    Tangent,
    Color,
    /// A texture coordinate channel (0 = primary material UVs).
    TexCoord(u8),
    /// Skinning joint indices.
    Joints,
    /// Skinning weights.
    Weights,
    /// Anything else the host engine stores per vertex.
    Custom(String),
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Normal => write!(f, "normal"),
            AttributeKind::Tangent => write!(f, "tangent"),
            AttributeKind::Color => write!(f, "color"),
            AttributeKind::TexCoord(channel) => write!(f, "texcoord{}", channel),
            AttributeKind::Joints => write!(f, "joints"),
            AttributeKind::Weights => write!(f, "weights"),
            AttributeKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// A flat per-vertex attribute stream (`components` floats per vertex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexAttribute {
    pub kind: AttributeKind,
    pub components: usize,
    pub data: Vec<f32>,
}

impl VertexAttribute {
    pub fn new(kind: AttributeKind, components: usize, data: Vec<f32>) -> Self {
        Self {
            kind,
            components,
            data,
        }
    }

    /// Build a normal stream from 3-component vectors.
    pub fn normals(normals: &[[f32; 3]]) -> Self {
        Self::new(AttributeKind::Normal, 3, flatten(normals))
    }

    /// Build a tangent stream (xyz + handedness).
    pub fn tangents(tangents: &[[f32; 4]]) -> Self {
        Self::new(AttributeKind::Tangent, 4, flatten(tangents))
    }

    /// Build an RGBA color stream.
    pub fn colors(colors: &[[f32; 4]]) -> Self {
        Self::new(AttributeKind::Color, 4, flatten(colors))
    }

    /// Build a texture coordinate stream for the given channel.
    pub fn tex_coords(channel: u8, uvs: &[[f32; 2]]) -> Self {
        Self::new(AttributeKind::TexCoord(channel), 2, flatten(uvs))
    }

    /// Number of vertices covered by this stream.
    pub fn vertex_count(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.data.len() / self.components
        }
    }

    /// The attribute values of one vertex.
    pub fn vertex(&self, index: usize) -> &[f32] {
        let start = index * self.components;
        &self.data[start..start + self.components]
    }

    /// Append a copy of another vertex's values (used for seam duplicates).
    pub(crate) fn push_copy_of(&mut self, index: usize) {
        let start = index * self.components;
        self.data.extend_from_within(start..start + self.components);
    }
}

fn flatten<const N: usize>(values: &[[f32; N]]) -> Vec<f32> {
    values.iter().flat_map(|v| v.iter().copied()).collect()
}
