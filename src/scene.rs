//! Scene files: a batch of meshes plus optional unwrap settings, as JSON.
//!
//! ```json
//! { "meshes": [{ "name": "floor", "positions": [[0, 0, 0], ...], "indices": [0, 1, 2] }],
//!   "config": { "island_margin": 0.01 } }
//! ```

use crate::error::Result;
use crate::types::SourceMesh;
use crate::unwrap::UnwrapConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A batch of meshes to unwrap together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub meshes: Vec<SourceMesh>,
    /// Settings stored with the scene; callers may override them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<UnwrapConfig>,
}

impl Scene {
    pub fn new(meshes: Vec<SourceMesh>) -> Self {
        Self { meshes, config: None }
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Load a scene from a JSON file.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let data = std::fs::read(path.as_ref())?;
    load_from_bytes(&data)
}

/// Load a scene from JSON bytes.
pub fn load_from_bytes(data: &[u8]) -> Result<Scene> {
    let scene: Scene = serde_json::from_slice(data)?;
    log::debug!(
        "Loaded scene: {} meshes, {} vertices, {} triangles",
        scene.meshes.len(),
        scene.vertex_count(),
        scene.triangle_count()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnwrapError;
    use crate::types::AttributeKind;
    use glam::Mat4;
    use std::io::Write;

    const SCENE: &str = r#"{
        "meshes": [{
            "name": "floor",
            "positions": [[0, 0, 0], [1, 0, 0], [1, 0, 1]],
            "indices": [0, 1, 2],
            "attributes": [{ "kind": "normal", "components": 3, "data": [0, 1, 0, 0, 1, 0, 0, 1, 0] }]
        }],
        "config": { "island_margin": 0.01, "share_space": false }
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = load_from_bytes(SCENE.as_bytes()).unwrap();
        assert_eq!(scene.meshes.len(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "floor");
        assert_eq!(mesh.world_transform, Mat4::IDENTITY);
        assert!(mesh.attribute(&AttributeKind::Normal).is_some());

        let config = scene.config.unwrap();
        assert_eq!(config.island_margin, 0.01);
        assert!(!config.share_space);
        assert_eq!(config.projection_limit, 89.0);
    }

    #[test]
    fn test_scene_round_trip() {
        let scene = load_from_bytes(SCENE.as_bytes()).unwrap();
        let reparsed = load_from_bytes(scene.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed.meshes, scene.meshes);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();
        let scene = load_from_path(file.path()).unwrap();
        assert_eq!(scene.triangle_count(), 1);
        assert_eq!(scene.vertex_count(), 3);
    }

    #[test]
    fn test_malformed_scene() {
        assert!(matches!(load_from_bytes(b"{\"meshes\": 3}"), Err(UnwrapError::Json(_))));
        assert!(matches!(load_from_path("/nonexistent/scene.json"), Err(UnwrapError::Io(_))));
    }
}
