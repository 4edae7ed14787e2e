//! Projection grouping: choose a few directions that every face can be
//! flattened along with limited distortion, then flatten each group.
//!
//! The direction search is a greedy heuristic. Its results depend on
//! candidate order, which is always scanned from the highest index down.

use super::face::Face;
use glam::{DVec2, DVec3};

/// A set of faces flattened along one projection vector.
#[derive(Debug, Clone)]
pub struct ProjectionGroup {
    pub axis: DVec3,
    /// Indices into the mesh's face list.
    pub faces: Vec<u32>,
}

/// Find projection vectors for a mesh.
///
/// `faces` must exclude degenerate faces and be sorted by area, largest
/// first. Returns an empty list only when `faces` is empty.
pub fn projection_vectors(faces: &[&Face], limit_degrees: f64, area_weight: f64) -> Vec<DVec3> {
    let Some(first) = faces.first() else {
        return Vec::new();
    };

    let limit_cos = limit_degrees.to_radians().cos();
    let half_limit_cos = (limit_degrees / 2.0).to_radians().cos();
    let weight = |face: &Face| face.area * area_weight + (1.0 - area_weight);

    let mut vectors: Vec<DVec3> = Vec::new();
    let mut remaining: Vec<&Face> = faces.to_vec();
    let mut accumulated: Vec<&Face> = Vec::new();
    let mut current = first.normal;

    loop {
        // Pull everything close to the current direction.
        let mut kept = Vec::with_capacity(remaining.len());
        for face in remaining.drain(..).rev() {
            if face.normal.dot(current) > half_limit_cos {
                accumulated.push(face);
            } else {
                kept.push(face);
            }
        }
        kept.reverse();
        remaining = kept;

        let average = accumulated
            .iter()
            .fold(DVec3::ZERO, |sum, face| sum + face.normal * weight(face));
        if average != DVec3::ZERO {
            vectors.push(average.normalize());
        }

        // Next seed: the remaining face least similar to every vector so far.
        let mut most_unique = 1.0;
        let mut most_unique_index = 0;
        for (index, face) in remaining.iter().enumerate().rev() {
            let similarity = vectors
                .iter()
                .map(|v| v.dot(face.normal))
                .fold(-1.0, f64::max);
            if similarity < most_unique {
                most_unique = similarity;
                most_unique_index = index;
            }
        }

        if most_unique < limit_cos {
            accumulated.clear();
            current = remaining[most_unique_index].normal;
        } else {
            break;
        }
    }

    vectors
}

/// Assign every face to the projection vector it is most aligned with.
///
/// Ties keep the earliest vector. Groups that end up empty are dropped.
pub fn assign_groups(faces: &[Face], candidates: &[u32], vectors: &[DVec3]) -> Vec<ProjectionGroup> {
    let mut groups: Vec<ProjectionGroup> = vectors
        .iter()
        .map(|&axis| ProjectionGroup {
            axis,
            faces: Vec::new(),
        })
        .collect();

    for &face_index in candidates {
        let normal = faces[face_index as usize].normal;
        let mut best = 0;
        let mut best_dot = normal.dot(vectors[0]);
        for (i, v) in vectors.iter().enumerate().skip(1) {
            let dot = normal.dot(*v);
            if dot > best_dot {
                best_dot = dot;
                best = i;
            }
        }
        groups[best].faces.push(face_index);
    }

    groups.retain(|g| !g.faces.is_empty());
    groups
}

/// Orthonormal basis whose Z axis is a projection vector.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionBasis {
    pub x: DVec3,
    pub y: DVec3,
    pub z: DVec3,
}

impl ProjectionBasis {
    pub fn new(axis: DVec3) -> Self {
        let z = axis.normalize();
        // World up is +Z unless the axis is nearly vertical.
        let up = if z.z.abs() > 0.9 { DVec3::Y } else { DVec3::Z };
        let x = up.cross(z).normalize();
        let y = z.cross(x);
        Self { x, y, z }
    }

    /// Basis-space X/Y of a world position.
    pub fn project(&self, point: DVec3) -> DVec2 {
        DVec2::new(point.dot(self.x), point.dot(self.y))
    }
}

/// Write initial UVs for every face of a group.
pub fn flatten_group(faces: &mut [Face], group: &ProjectionGroup) {
    let basis = ProjectionBasis::new(group.axis);
    for &face_index in &group.faces {
        let face = &mut faces[face_index as usize];
        face.uv = face.world.map(|p| basis.project(p));
    }
}
