//! Seam resolution: give every vertex exactly one lightmap UV, splitting
//! vertices that sit on island boundaries.

use super::face::Face;
use crate::types::{SourceMesh, VertexAttribute};
use std::collections::HashMap;

/// Marks a UV slot nothing has written yet.
const UNWRITTEN: [f32; 2] = [-1.0, -1.0];

/// Vertex buffers after seam splitting.
#[derive(Debug, Clone)]
pub struct SeamBuffers {
    pub positions: Vec<[f32; 3]>,
    pub attributes: Vec<VertexAttribute>,
    pub indices: Vec<u32>,
    pub uvs: Vec<[f32; 2]>,
    /// Vertices appended to carry a second UV.
    pub duplicated: usize,
}

/// Write the faces' UVs into a copy of `mesh`, duplicating vertices as needed.
///
/// `order` lists face indices in the order corners are claimed: the first
/// face to reach a vertex keeps the original index.
pub fn resolve_seams(mesh: &SourceMesh, faces: &[Face], order: &[u32]) -> SeamBuffers {
    let mut buffers = SeamBuffers {
        positions: mesh.positions.clone(),
        attributes: mesh.attributes.clone(),
        indices: mesh.indices.clone(),
        uvs: vec![UNWRITTEN; mesh.vertex_count()],
        duplicated: 0,
    };
    // source vertex -> (uv, duplicate index)
    let mut duplicates: HashMap<u32, Vec<([f32; 2], u32)>> = HashMap::new();

    for &face_index in order {
        let face = &faces[face_index as usize];
        for corner in 0..3 {
            let source = face.vertices[corner];
            let uv = [face.uv[corner].x as f32, face.uv[corner].y as f32];
            let slot = &mut buffers.uvs[source as usize];

            if slot[0] < 0.0 {
                *slot = uv;
                continue;
            }
            if *slot == uv {
                continue;
            }

            let copies = duplicates.entry(source).or_default();
            let index = match copies.iter().find(|(existing, _)| *existing == uv) {
                Some(&(_, index)) => index,
                None => {
                    let index = buffers.positions.len() as u32;
                    buffers.positions.push(mesh.positions[source as usize]);
                    for attribute in &mut buffers.attributes {
                        attribute.push_copy_of(source as usize);
                    }
                    buffers.uvs.push(uv);
                    buffers.duplicated += 1;
                    copies.push((uv, index));
                    index
                }
            };
            buffers.indices[face.triangle as usize * 3 + corner] = index;
        }
    }

    // Vertices no triangle references.
    for uv in &mut buffers.uvs {
        if uv[0] < 0.0 {
            *uv = [0.0, 0.0];
        }
    }

    buffers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttributeKind, WorldTransform};
    use crate::unwrap::dedup::VertexClasses;
    use crate::unwrap::face::build_faces;
    use glam::DVec2;

    /// Quad made of two triangles sharing vertices 0 and 2, plus an unused vertex.
    fn quad() -> SourceMesh {
        SourceMesh::new(
            "quad",
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [9.0, 9.0, 9.0],
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .with_attribute(VertexAttribute::colors(&[
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    fn faces_with_uvs(mesh: &SourceMesh, uvs: [[DVec2; 3]; 2]) -> Vec<Face> {
        let classes = VertexClasses::build(&mesh.positions);
        let mut faces = build_faces(0, mesh, &WorldTransform::default(), &classes);
        faces[0].uv = uvs[0];
        faces[1].uv = uvs[1];
        faces
    }

    #[test]
    fn test_agreeing_uvs_do_not_split() {
        let mesh = quad();
        let p = |x: f64, y: f64| DVec2::new(x, y) * 0.5;
        let faces = faces_with_uvs(
            &mesh,
            [[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], [p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]],
        );
        let out = resolve_seams(&mesh, &faces, &[0, 1]);
        assert_eq!(out.duplicated, 0);
        assert_eq!(out.positions.len(), 5);
        assert_eq!(out.indices, mesh.indices);
        assert_eq!(out.uvs[2], [0.5, 0.5]);
        // Unreferenced vertex gets a valid UV.
        assert_eq!(out.uvs[4], [0.0, 0.0]);
    }

    #[test]
    fn test_disagreeing_uvs_split_shared_vertices() {
        let mesh = quad();
        let a = |x: f64, y: f64| DVec2::new(x, y) * 0.4;
        let b = |x: f64, y: f64| DVec2::new(0.5, 0.5) + DVec2::new(x, y) * 0.4;
        let faces = faces_with_uvs(
            &mesh,
            [[a(0.0, 0.0), a(1.0, 0.0), a(1.0, 1.0)], [b(0.0, 0.0), b(1.0, 1.0), b(0.0, 1.0)]],
        );
        let out = resolve_seams(&mesh, &faces, &[0, 1]);

        // Vertices 0 and 2 are split, vertex 3 is only used by the second face.
        assert_eq!(out.duplicated, 2);
        assert_eq!(out.positions.len(), 7);
        assert_eq!(&out.indices[..3], &[0, 1, 2]);
        assert_eq!(out.indices[3..], [5, 6, 3]);
        assert_eq!(out.positions[5], mesh.positions[0]);
        assert_eq!(out.positions[6], mesh.positions[2]);

        let colors = out.attributes.iter().find(|a| a.kind == AttributeKind::Color).unwrap();
        assert_eq!(colors.vertex_count(), 7);
        assert_eq!(colors.vertex(5), colors.vertex(0));
        assert_eq!(colors.vertex(6), colors.vertex(2));

        // Every vertex has one UV, and triangles see their own island's UVs.
        assert_eq!(out.uvs.len(), 7);
        assert_eq!(out.uvs[out.indices[3] as usize], [0.5, 0.5]);
        assert_eq!(out.uvs[out.indices[0] as usize], [0.0, 0.0]);
    }

    #[test]
    fn test_duplicates_are_reused() {
        // Three faces around vertex 0: the last two agree on its UV.
        let mesh = SourceMesh::new(
            "fan",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2, 0, 2, 3, 0, 3, 1],
        );
        let classes = VertexClasses::build(&mesh.positions);
        let mut faces = build_faces(0, &mesh, &WorldTransform::default(), &classes);
        faces[0].uv = [DVec2::new(0.0, 0.0), DVec2::new(0.1, 0.0), DVec2::new(0.1, 0.1)];
        faces[1].uv = [DVec2::new(0.5, 0.5), DVec2::new(0.6, 0.6), DVec2::new(0.5, 0.6)];
        faces[2].uv = [DVec2::new(0.5, 0.5), DVec2::new(0.5, 0.6), DVec2::new(0.9, 0.9)];

        let out = resolve_seams(&mesh, &faces, &[0, 1, 2]);
        assert_eq!(out.indices[3], out.indices[6]);
        assert_ne!(out.indices[3], 0);
    }
}
