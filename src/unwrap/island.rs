//! UV islands: edge-connected faces inside one projection group.

use super::face::{EdgeKey, Face, FaceHandle, FaceStore};
use super::hull::{convex_hull, min_area_angle, rotate, Bounds2};
use glam::DVec2;
use std::collections::{HashMap, VecDeque};
use std::f64::consts::FRAC_PI_2;

/// Height must exceed width by this much before an island is turned.
const ORIENTATION_EPSILON: f64 = 1e-5;

/// A connected set of faces sharing one projection.
#[derive(Debug, Clone, Default)]
pub struct Island {
    pub faces: Vec<FaceHandle>,
}

impl Island {
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Every UV corner of the island.
    pub fn uv_points<'a>(&'a self, store: &'a FaceStore) -> impl Iterator<Item = DVec2> + 'a {
        self.faces.iter().flat_map(move |&h| store.get(h).uv)
    }

    pub fn bounds(&self, store: &FaceStore) -> Option<Bounds2> {
        Bounds2::from_points(self.uv_points(store))
    }

    /// Sum of the 3D areas of the island's faces.
    pub fn face_area(&self, store: &FaceStore) -> f64 {
        self.faces.iter().map(|&h| store.get(h).area).sum()
    }

    /// Apply `f` to every UV of the island.
    pub fn map_uvs(&self, store: &mut FaceStore, f: impl Fn(DVec2) -> DVec2) {
        for &h in &self.faces {
            let face = store.get_mut(h);
            face.uv = face.uv.map(&f);
        }
    }

    /// Rotate the island to its minimum-area bounding box, landscape.
    pub fn optimize_rotation(&self, store: &mut FaceStore) {
        let points: Vec<DVec2> = self.uv_points(store).collect();
        let angle = min_area_angle(&convex_hull(&points));
        if angle != 0.0 {
            self.map_uvs(store, |uv| rotate(uv, -angle));
        }

        if let Some(bounds) = self.bounds(store) {
            if bounds.height() > bounds.width() + ORIENTATION_EPSILON {
                self.map_uvs(store, |uv| rotate(uv, FRAC_PI_2));
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Frontier,
    Done,
}

/// Split a projection group into edge-connected islands.
///
/// `group` holds indices into `faces`; the result covers each of them
/// exactly once.
pub fn build_islands(mesh: u32, faces: &[Face], group: &[u32]) -> Vec<Island> {
    let mut edge_users: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (local, &face_index) in group.iter().enumerate() {
        for key in faces[face_index as usize].edge_keys {
            edge_users.entry(key).or_default().push(local);
        }
    }

    let mut state = vec![Visit::Unvisited; group.len()];
    let mut islands = Vec::new();
    let mut frontier = VecDeque::new();

    for seed in 0..group.len() {
        if state[seed] != Visit::Unvisited {
            continue;
        }

        let mut island = Island::default();
        state[seed] = Visit::Frontier;
        frontier.push_back(seed);

        while let Some(local) = frontier.pop_front() {
            island.faces.push(FaceHandle {
                mesh,
                face: group[local],
            });
            for key in &faces[group[local] as usize].edge_keys {
                for &neighbor in &edge_users[key] {
                    if state[neighbor] == Visit::Unvisited {
                        state[neighbor] = Visit::Frontier;
                        frontier.push_back(neighbor);
                    }
                }
            }
            state[local] = Visit::Done;
        }

        islands.push(island);
    }

    islands
}
