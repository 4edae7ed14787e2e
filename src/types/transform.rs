//! World transform applied to mesh positions before flattening.

use glam::{DMat4, DVec3, Mat4};

/// Local-to-world transform promoted to double precision.
///
/// Projection, hull fitting and packing all run in world units so that the
/// final texel ratio is comparable between meshes sharing one lightmap.
#[derive(Debug, Clone, Copy)]
pub struct WorldTransform {
    local_to_world: DMat4,
}

impl WorldTransform {
    pub fn new(matrix: Mat4) -> Self {
        Self {
            local_to_world: matrix.as_dmat4(),
        }
    }

    /// Check if this is an identity transform.
    pub fn is_identity(&self) -> bool {
        self.local_to_world == DMat4::IDENTITY
    }

    /// Transform a local-space position to world space.
    pub fn to_world(&self, position: [f32; 3]) -> DVec3 {
        let local = DVec3::new(position[0] as f64, position[1] as f64, position[2] as f64);
        if self.is_identity() {
            local
        } else {
            self.local_to_world.transform_point3(local)
        }
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}
