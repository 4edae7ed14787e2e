//! Lightmap UV generation.
//!
//! This module turns source meshes into meshes carrying a new,
//! non-overlapping UV channel packed into the unit square.

pub mod dedup;
pub mod face;
pub mod hull;
pub mod island;
pub mod projection;
pub mod seam;

pub use island::Island;

use crate::atlas::{pack_islands, MergeSettings, PackSettings, PackSummary};
use crate::error::{Result, UnwrapError};
use crate::mesh_output::{UnwrapOutput, UnwrappedMesh};
use crate::types::{SourceMesh, WorldTransform};
use dedup::VertexClasses;
use face::{build_faces, check_limits, Face, FaceStore};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Main unwrap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnwrapConfig {
    /// Padding around each island, as a fraction of the final UV square.
    pub island_margin: f64,
    /// Largest angle (degrees) between a face normal and its projection axis.
    pub projection_limit: f64,
    /// Blend between plain (0.0) and area-weighted (1.0) normal averaging.
    pub area_weight: f64,
    /// Treat coincident vertices as connected when building islands.
    pub remove_doubles: bool,
    /// Pack every mesh into one shared UV square.
    pub share_space: bool,
    /// Nest small islands inside the wasted space of larger ones.
    pub fill_holes: bool,
    /// Hole filling search density (1 to 100).
    pub fill_holes_quality: u32,
    /// Set from another thread to stop hole filling early.
    #[serde(skip)]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for UnwrapConfig {
    fn default() -> Self {
        Self {
            island_margin: 0.0,
            projection_limit: 89.0,
            area_weight: 0.0,
            remove_doubles: true,
            share_space: true,
            fill_holes: false,
            fill_holes_quality: 50,
            cancel: None,
        }
    }
}

impl UnwrapConfig {
    pub fn with_island_margin(mut self, margin: f64) -> Self {
        self.island_margin = margin;
        self
    }

    pub fn with_projection_limit(mut self, degrees: f64) -> Self {
        self.projection_limit = degrees;
        self
    }

    pub fn with_area_weight(mut self, weight: f64) -> Self {
        self.area_weight = weight;
        self
    }

    pub fn with_remove_doubles(mut self, enabled: bool) -> Self {
        self.remove_doubles = enabled;
        self
    }

    pub fn with_share_space(mut self, enabled: bool) -> Self {
        self.share_space = enabled;
        self
    }

    /// Enable hole filling at the given quality.
    pub fn with_fill_holes(mut self, quality: u32) -> Self {
        self.fill_holes = true;
        self.fill_holes_quality = quality;
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Reject parameters outside their meaningful range.
    pub fn validate(&self) -> Result<()> {
        if !self.island_margin.is_finite() || !(0.0..0.5).contains(&self.island_margin) {
            return Err(UnwrapError::invalid_param(
                "island_margin",
                self.island_margin,
                "must be in [0, 0.5)",
            ));
        }
        if !(self.projection_limit > 0.0 && self.projection_limit <= 180.0) {
            return Err(UnwrapError::invalid_param(
                "projection_limit",
                self.projection_limit,
                "must be in (0, 180] degrees",
            ));
        }
        if !(0.0..=1.0).contains(&self.area_weight) {
            return Err(UnwrapError::invalid_param(
                "area_weight",
                self.area_weight,
                "must be in [0, 1]",
            ));
        }
        if !(1..=100).contains(&self.fill_holes_quality) {
            return Err(UnwrapError::invalid_param(
                "fill_holes_quality",
                self.fill_holes_quality,
                "must be in 1..=100",
            ));
        }
        Ok(())
    }

    fn pack_settings(&self) -> PackSettings {
        PackSettings {
            margin: self.island_margin,
            merge: self.fill_holes.then(|| MergeSettings {
                quality: self.fill_holes_quality,
                cancel: self.cancel.clone(),
            }),
        }
    }
}

/// Per-mesh state between island building and seam resolution.
struct MeshWork {
    /// Position in the caller's input.
    source: usize,
    /// Faces with no usable geometry, emitted with UV (0, 0).
    degenerate: Vec<u32>,
    islands: Vec<Island>,
    island_count: usize,
}

/// The main UV mapper.
pub struct UvMapper {
    config: UnwrapConfig,
}

impl UvMapper {
    /// Create a mapper with default configuration.
    pub fn new() -> Self {
        Self {
            config: UnwrapConfig::default(),
        }
    }

    /// Create a mapper with custom configuration.
    pub fn with_config(config: UnwrapConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &UnwrapConfig {
        &self.config
    }

    /// Generate lightmap UVs for a batch of meshes.
    ///
    /// Output meshes are returned in input order. Processing order is by
    /// mesh name, so the result does not depend on how the caller ordered
    /// the batch.
    pub fn unwrap(&self, meshes: &[SourceMesh]) -> Result<UnwrapOutput> {
        self.config.validate()?;
        check_limits(meshes)?;
        for mesh in meshes {
            mesh.validate()?;
        }

        let mut order: Vec<usize> = (0..meshes.len()).collect();
        order.sort_by(|&a, &b| meshes[a].name.cmp(&meshes[b].name));

        log::info!(
            "Unwrapping {} meshes ({} triangles)",
            meshes.len(),
            meshes.iter().map(|m| m.triangle_count()).sum::<usize>()
        );

        let mut store = FaceStore::new();
        let mut work = Vec::with_capacity(meshes.len());
        for &source in &order {
            let (degenerate, islands) = self.build_mesh_islands(&meshes[source], &mut store);
            work.push(MeshWork {
                source,
                degenerate,
                island_count: islands.len(),
                islands,
            });
        }

        let settings = self.config.pack_settings();
        let mut ratios = vec![1.0; work.len()];
        let mut placed: Vec<Island> = Vec::new();

        if self.config.share_space {
            let mut islands: Vec<Island> = work.iter_mut().flat_map(|w| w.islands.drain(..)).collect();
            let summary = pack_islands(&mut islands, &mut store, &settings);
            ratios.fill(summary.scale);
            placed = islands;
        } else {
            for (slot, mesh_work) in work.iter_mut().enumerate() {
                let mut islands = std::mem::take(&mut mesh_work.islands);
                let summary: PackSummary = pack_islands(&mut islands, &mut store, &settings);
                ratios[slot] = summary.scale;
                placed.extend(islands);
            }
        }

        let world_to_texel_ratio = work
            .iter()
            .zip(&ratios)
            .filter(|(w, _)| w.island_count > 0)
            .map(|(_, &ratio)| ratio)
            .reduce(f64::min)
            .unwrap_or(1.0);

        // Seam resolution visits faces island by island, degenerate faces last.
        let mut face_order: Vec<Vec<u32>> = vec![Vec::new(); work.len()];
        for island in &placed {
            for handle in &island.faces {
                face_order[handle.mesh as usize].push(handle.face);
            }
        }

        let mut unwrapped: Vec<Option<UnwrappedMesh>> = vec![None; meshes.len()];
        for (slot, mesh_work) in work.iter().enumerate() {
            let mesh = &meshes[mesh_work.source];
            let faces = store.mesh(slot as u32);
            let mut visit = std::mem::take(&mut face_order[slot]);
            visit.extend_from_slice(&mesh_work.degenerate);
            debug_assert_eq!(visit.len(), faces.len());

            let buffers = seam::resolve_seams(mesh, faces, &visit);
            log::debug!(
                "Mesh '{}': {} islands, {} seam vertices added",
                mesh.name,
                mesh_work.island_count,
                buffers.duplicated
            );

            unwrapped[mesh_work.source] = Some(UnwrappedMesh {
                name: mesh.name.clone(),
                positions: buffers.positions,
                attributes: buffers.attributes,
                lightmap_uvs: buffers.uvs,
                indices: buffers.indices,
                world_to_texel_ratio: ratios[slot],
                islands: mesh_work.island_count,
                seam_vertices: buffers.duplicated,
            });
        }

        log::info!(
            "Packed {} islands, world to texel ratio {:.6}",
            work.iter().map(|w| w.island_count).sum::<usize>(),
            world_to_texel_ratio
        );

        Ok(UnwrapOutput {
            meshes: unwrapped.into_iter().flatten().collect(),
            world_to_texel_ratio,
        })
    }

    /// Build faces, projection groups and oriented islands for one mesh,
    /// adding its faces to `store`. Returns the degenerate faces and the islands.
    fn build_mesh_islands(&self, mesh: &SourceMesh, store: &mut FaceStore) -> (Vec<u32>, Vec<Island>) {
        let mesh_index = store.mesh_count() as u32;
        let classes = if self.config.remove_doubles {
            VertexClasses::build(&mesh.positions)
        } else {
            VertexClasses::identity(mesh.vertex_count())
        };
        let transform = WorldTransform::new(mesh.world_transform);
        let mut faces = build_faces(mesh_index, mesh, &transform, &classes);

        let (mut usable, mut degenerate): (Vec<u32>, Vec<u32>) =
            (0..faces.len() as u32).partition(|&i| !faces[i as usize].is_degenerate());
        usable.sort_by(|&a, &b| faces[b as usize].area.total_cmp(&faces[a as usize].area));

        let sorted: Vec<&Face> = usable.iter().map(|&i| &faces[i as usize]).collect();
        let vectors =
            projection::projection_vectors(&sorted, self.config.projection_limit, self.config.area_weight);
        if vectors.is_empty() {
            if !faces.is_empty() {
                log::warn!("Mesh '{}' has no usable faces, skipping projection", mesh.name);
            }
            degenerate.append(&mut usable);
            store.push_mesh(faces);
            return (degenerate, Vec::new());
        }

        let groups = projection::assign_groups(&faces, &usable, &vectors);
        log::debug!(
            "Mesh '{}': {} projection vectors, {} degenerate faces",
            mesh.name,
            vectors.len(),
            degenerate.len()
        );

        let mut islands = Vec::new();
        for group in &groups {
            projection::flatten_group(&mut faces, group);
            islands.extend(island::build_islands(mesh_index, &faces, &group.faces));
        }

        store.push_mesh(faces);
        for island in &islands {
            island.optimize_rotation(store);
        }

        (degenerate, islands)
    }
}

impl Default for UvMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VertexAttribute;
    use glam::{Mat4, Vec2, Vec3};

    /// Unit cube with 8 shared corners and consistent winding.
    fn cube(name: &str) -> SourceMesh {
        let positions = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        let quads: [[u32; 4]; 6] = [
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [1, 2, 6, 5],
            [0, 4, 7, 3],
        ];
        let indices = quads
            .iter()
            .flat_map(|q| [q[0], q[1], q[2], q[0], q[2], q[3]])
            .collect();
        SourceMesh::new(name, positions, indices)
    }

    fn quad(name: &str) -> SourceMesh {
        SourceMesh::new(
            name,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    fn assert_in_unit_square(mesh: &UnwrappedMesh) {
        for uv in &mesh.lightmap_uvs {
            assert!((0.0..=1.0).contains(&uv[0]) && (0.0..=1.0).contains(&uv[1]), "{:?}", uv);
        }
    }

    /// UV edge lengths equal world edge lengths times the ratio.
    fn assert_isometric(mesh: &UnwrappedMesh, ratio: f64, world_scale: f32) {
        for tri in mesh.indices.chunks_exact(3) {
            for k in 0..3 {
                let (a, b) = (tri[k] as usize, tri[(k + 1) % 3] as usize);
                let world = Vec3::from(mesh.positions[a]).distance(Vec3::from(mesh.positions[b])) * world_scale;
                let uv = Vec2::from(mesh.lightmap_uvs[a]).distance(Vec2::from(mesh.lightmap_uvs[b]));
                assert!((uv as f64 - world as f64 * ratio).abs() < 1e-5, "{} vs {}", uv, world);
            }
        }
    }

    fn uv_bounds(mesh: &UnwrappedMesh) -> ([f32; 2], [f32; 2]) {
        let mut min = [f32::MAX; 2];
        let mut max = [f32::MIN; 2];
        for uv in &mesh.lightmap_uvs {
            for axis in 0..2 {
                min[axis] = min[axis].min(uv[axis]);
                max[axis] = max[axis].max(uv[axis]);
            }
        }
        (min, max)
    }

    #[test]
    fn test_default_config() {
        let config = UnwrapConfig::default();
        assert_eq!(config.projection_limit, 89.0);
        assert!(config.remove_doubles);
        assert!(config.share_space);
        assert!(!config.fill_holes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(UnwrapConfig::default().with_area_weight(1.5).validate().is_err());
        assert!(UnwrapConfig::default().with_projection_limit(0.0).validate().is_err());
        assert!(UnwrapConfig::default().with_island_margin(-0.1).validate().is_err());
        assert!(UnwrapConfig::default().with_fill_holes(0).validate().is_err());
        assert!(UnwrapConfig::default().with_fill_holes(100).validate().is_ok());

        let err = UvMapper::with_config(UnwrapConfig::default().with_area_weight(f64::NAN))
            .unwrap(&[cube("cube")])
            .unwrap_err();
        assert!(matches!(err, UnwrapError::InvalidParameter { name: "area_weight", .. }));
    }

    #[test]
    fn test_config_from_json() {
        let config: UnwrapConfig = serde_json::from_str(r#"{"island_margin": 0.02, "fill_holes": true}"#).unwrap();
        assert_eq!(config.island_margin, 0.02);
        assert!(config.fill_holes);
        assert_eq!(config.projection_limit, 89.0);
        assert!(config.cancel.is_none());
    }

    #[test]
    fn test_invalid_mesh_is_rejected() {
        let bad = SourceMesh::new("bad", vec![[0.0; 3]; 3], vec![0, 1, 5]);
        let err = UvMapper::new().unwrap(&[bad]).unwrap_err();
        assert!(matches!(err, UnwrapError::IndexOutOfRange { index: 5, .. }));
    }

    #[test]
    fn test_non_finite_geometry_is_rejected() {
        let nan = SourceMesh::new(
            "nan",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [f32::NAN, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        let err = UvMapper::new().unwrap(&[nan]).unwrap_err();
        assert!(matches!(err, UnwrapError::InvalidPosition { vertex: 2, .. }));

        let huge = SourceMesh::new("huge", vec![[0.0; 3], [1e30, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![0, 1, 2]);
        let err = UvMapper::new().unwrap(&[huge]).unwrap_err();
        assert!(matches!(err, UnwrapError::InvalidPosition { vertex: 1, .. }));

        let mut matrix = Mat4::IDENTITY;
        matrix.y_axis.y = f32::NAN;
        let err = UvMapper::new().unwrap(&[cube("cube").with_transform(matrix)]).unwrap_err();
        assert!(matches!(err, UnwrapError::InvalidTransform { .. }));

        let matrix = Mat4::from_translation(Vec3::new(f32::INFINITY, 0.0, 0.0));
        let err = UvMapper::new().unwrap(&[cube("cube").with_transform(matrix)]).unwrap_err();
        assert!(matches!(err, UnwrapError::InvalidTransform { .. }));
    }

    #[test]
    fn test_unit_cube() {
        let output = UvMapper::new().unwrap(&[cube("cube")]).unwrap();
        let mesh = &output.meshes[0];

        assert_eq!(mesh.islands, 6);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.world_to_texel_ratio, output.world_to_texel_ratio);
        // Six unit boxes need at least two rows of at most three.
        assert!(output.world_to_texel_ratio > 0.2 && output.world_to_texel_ratio <= 0.5 + 1e-9);
        assert_in_unit_square(mesh);
        assert_isometric(mesh, output.world_to_texel_ratio, 1.0);
    }

    #[test]
    fn test_cube_projection_vectors() {
        let mesh = cube("cube");
        let classes = VertexClasses::build(&mesh.positions);
        let mut faces = build_faces(0, &mesh, &WorldTransform::default(), &classes);
        faces.sort_by(|a, b| b.area.total_cmp(&a.area));
        let refs: Vec<&Face> = faces.iter().collect();
        let vectors = projection::projection_vectors(&refs, 89.0, 0.0);
        assert_eq!(vectors.len(), 6);
        for v in &vectors {
            assert!((v.abs().max_element() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cube_seams_split_every_corner() {
        let config = UnwrapConfig::default().with_island_margin(0.01);
        let output = UvMapper::with_config(config).unwrap(&[cube("cube")]).unwrap();
        let mesh = &output.meshes[0];

        // Each corner touches three islands.
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.seam_vertices, 16);
        let mut used: Vec<u32> = mesh.indices.clone();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used.len(), 24);
        assert_isometric(mesh, output.world_to_texel_ratio, 1.0);
    }

    #[test]
    fn test_single_degenerate_triangle() {
        let mesh = SourceMesh::new("point", vec![[1.0, 2.0, 3.0]; 3], vec![0, 1, 2]);
        let output = UvMapper::new().unwrap(&[mesh]).unwrap();
        let out = &output.meshes[0];

        assert_eq!(out.islands, 0);
        assert_eq!(out.indices, vec![0, 1, 2]);
        assert_eq!(out.lightmap_uvs, vec![[0.0, 0.0]; 3]);
        assert_eq!(output.world_to_texel_ratio, 1.0);
    }

    #[test]
    fn test_degenerate_faces_are_kept() {
        let mut mesh = quad("quad");
        mesh.positions.push([5.0, 5.0, 5.0]);
        mesh.indices.extend_from_slice(&[4, 4, 4]);
        let output = UvMapper::new().unwrap(&[mesh]).unwrap();
        let out = &output.meshes[0];

        assert_eq!(out.triangle_count(), 3);
        assert_eq!(out.islands, 1);
        // Vertex 4 only appears in the degenerate face.
        assert_eq!(out.lightmap_uvs[out.indices[6] as usize], [0.0, 0.0]);
    }

    #[test]
    fn test_empty_input() {
        let output = UvMapper::new().unwrap(&[]).unwrap();
        assert!(output.meshes.is_empty());
        assert_eq!(output.world_to_texel_ratio, 1.0);

        let output = UvMapper::new().unwrap(&[SourceMesh::new("empty", vec![], vec![])]).unwrap();
        assert_eq!(output.meshes.len(), 1);
        assert_eq!(output.meshes[0].vertex_count(), 0);
    }

    #[test]
    fn test_shared_space_packs_meshes_together() {
        let output = UvMapper::new().unwrap(&[quad("b"), quad("a")]).unwrap();
        assert_eq!(output.meshes[0].name, "b");
        assert_eq!(output.meshes[1].name, "a");
        assert_eq!(output.meshes[0].world_to_texel_ratio, output.meshes[1].world_to_texel_ratio);

        let (a_min, a_max) = uv_bounds(&output.meshes[0]);
        let (b_min, b_max) = uv_bounds(&output.meshes[1]);
        let disjoint = a_max[0] <= b_min[0] + 1e-5
            || b_max[0] <= a_min[0] + 1e-5
            || a_max[1] <= b_min[1] + 1e-5
            || b_max[1] <= a_min[1] + 1e-5;
        assert!(disjoint);
        assert!(output.world_to_texel_ratio < 1.0);
    }

    #[test]
    fn test_separate_space_packs_meshes_alone() {
        let big = quad("big").with_transform(Mat4::from_scale(Vec3::splat(2.0)));
        let config = UnwrapConfig::default().with_share_space(false);
        let output = UvMapper::with_config(config).unwrap(&[quad("small"), big]).unwrap();

        assert!((output.meshes[0].world_to_texel_ratio - 1.0).abs() < 1e-9);
        assert!((output.meshes[1].world_to_texel_ratio - 0.5).abs() < 1e-9);
        assert!((output.world_to_texel_ratio - 0.5).abs() < 1e-9);
        for mesh in &output.meshes {
            let (min, max) = uv_bounds(mesh);
            assert!(min[0].abs() < 1e-5 && min[1].abs() < 1e-5);
            assert!((max[0] - 1.0).abs() < 1e-5 && (max[1] - 1.0).abs() < 1e-5);
        }
        assert_isometric(&output.meshes[1], 0.5, 2.0);
    }

    #[test]
    fn test_order_independent() {
        let a = UvMapper::new().unwrap(&[quad("a"), cube("b")]).unwrap();
        let b = UvMapper::new().unwrap(&[cube("b"), quad("a")]).unwrap();
        assert_eq!(a.meshes[0].lightmap_uvs, b.meshes[1].lightmap_uvs);
        assert_eq!(a.meshes[1].lightmap_uvs, b.meshes[0].lightmap_uvs);
        assert_eq!(a.world_to_texel_ratio, b.world_to_texel_ratio);
    }

    #[test]
    fn test_remove_doubles_connects_split_vertices() {
        // Quad whose triangles use separate vertex copies along the diagonal.
        let split = SourceMesh::new(
            "split",
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![0, 1, 2, 3, 4, 5],
        );

        let merged = UvMapper::new().unwrap(&[split.clone()]).unwrap();
        assert_eq!(merged.meshes[0].islands, 1);

        let config = UnwrapConfig::default().with_remove_doubles(false);
        let apart = UvMapper::with_config(config).unwrap(&[split]).unwrap();
        assert_eq!(apart.meshes[0].islands, 2);
    }

    #[test]
    fn test_attributes_follow_seam_vertices() {
        let normals: Vec<[f32; 3]> = cube("cube")
            .positions
            .iter()
            .map(|p| (Vec3::from(*p) - Vec3::splat(0.5)).normalize().into())
            .collect();
        let mesh = cube("cube").with_attribute(VertexAttribute::normals(&normals));
        let config = UnwrapConfig::default().with_island_margin(0.01);
        let output = UvMapper::with_config(config).unwrap(&[mesh]).unwrap();
        let out = &output.meshes[0];

        let normal_stream = &out.attributes[0];
        assert_eq!(normal_stream.vertex_count(), out.vertex_count());
        for (i, position) in out.positions.iter().enumerate() {
            let expected = (Vec3::from(*position) - Vec3::splat(0.5)).normalize();
            let actual = Vec3::from_slice(normal_stream.vertex(i));
            assert!(expected.distance(actual) < 1e-6);
        }
    }

    #[test]
    fn test_fill_holes_keeps_output_valid() {
        let config = UnwrapConfig::default().with_fill_holes(50).with_island_margin(0.005);
        let output = UvMapper::with_config(config).unwrap(&[cube("cube"), quad("quad")]).unwrap();
        for mesh in &output.meshes {
            assert_in_unit_square(mesh);
            assert_isometric(mesh, output.world_to_texel_ratio, 1.0);
        }
    }

    #[test]
    fn test_cancelled_flag_is_harmless() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = UnwrapConfig::default().with_fill_holes(10).with_cancel_flag(flag);
        let output = UvMapper::with_config(config).unwrap(&[cube("cube")]).unwrap();
        assert_eq!(output.meshes[0].islands, 6);
        assert_in_unit_square(&output.meshes[0]);
    }
}
