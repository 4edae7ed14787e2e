//! Error types for the lightmap UV mapper.
//!
//! Geometry problems (zero-area faces, meshes without a usable projection)
//! are never errors: the mapper degrades them to trivial UVs. The variants
//! below cover malformed input buffers, parameters and I/O around export.

use thiserror::Error;

/// Result type alias using UnwrapError.
pub type Result<T> = std::result::Result<T, UnwrapError>;

/// Main error type for unwrapping and export operations.
#[derive(Error, Debug)]
pub enum UnwrapError {
    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to format text output.
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index buffer length is not a multiple of three.
    #[error("Mesh '{mesh}' has {count} indices, which is not a multiple of 3")]
    IndexCount {
        /// Mesh name.
        mesh: String,
        /// Number of indices supplied.
        count: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("Mesh '{mesh}' index {index} is out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        /// Mesh name.
        mesh: String,
        /// The offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// An attribute stream does not match the vertex count.
    #[error("Mesh '{mesh}' attribute {attribute} has {len} floats, expected {expected}")]
    AttributeLength {
        /// Mesh name.
        mesh: String,
        /// Attribute kind, formatted.
        attribute: String,
        /// Number of floats supplied.
        len: usize,
        /// Number of floats expected (vertex count times components).
        expected: usize,
    },

    /// A vertex position is NaN, infinite or too large to quantise.
    #[error("Mesh '{mesh}' vertex {vertex} has an unusable position {position:?}")]
    InvalidPosition {
        /// Mesh name.
        mesh: String,
        /// Index of the offending vertex.
        vertex: usize,
        /// The position as supplied.
        position: [f32; 3],
    },

    /// The world transform has a NaN or infinite element.
    #[error("Mesh '{mesh}' has a non-finite world transform")]
    InvalidTransform {
        /// Mesh name.
        mesh: String,
    },

    /// Input exceeds what the packed edge keys can address.
    #[error("Input too large: {0}")]
    TooLarge(String),

    /// Invalid configuration value.
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value, formatted.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl UnwrapError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        UnwrapError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
