//! Positional vertex equivalence classes.
//!
//! Meshes exported with hard normals or split UVs carry several vertex
//! indices at one position. Edge keys are built from the first index of each
//! class so those vertices still connect faces into islands. Geometry is
//! never merged here.

use std::collections::HashMap;

/// Rounding step applied to each coordinate before hashing.
pub const DEDUP_PRECISION: f64 = 1e-12;

/// Largest accepted coordinate magnitude. Beyond about 1.7e26 the
/// quantised key saturates and distinct positions collapse into one class.
pub const MAX_COORDINATE: f32 = 1e20;

type PositionKey = (i128, i128, i128);

fn quantize(position: [f32; 3]) -> PositionKey {
    let q = |v: f32| (v as f64 / DEDUP_PRECISION).round() as i128;
    (q(position[0]), q(position[1]), q(position[2]))
}

/// Mapping from vertex index to the sorted indices sharing its position.
#[derive(Debug, Clone, Default)]
pub struct VertexClasses {
    class_of: Vec<u32>,
    members: Vec<Vec<u32>>,
}

impl VertexClasses {
    /// Group vertices by quantised position.
    pub fn build(positions: &[[f32; 3]]) -> Self {
        let mut by_key: HashMap<PositionKey, u32> = HashMap::with_capacity(positions.len());
        let mut class_of = Vec::with_capacity(positions.len());
        let mut members: Vec<Vec<u32>> = Vec::new();

        for (index, position) in positions.iter().enumerate() {
            let class = *by_key.entry(quantize(*position)).or_insert_with(|| {
                members.push(Vec::new());
                (members.len() - 1) as u32
            });
            // Indices are visited in ascending order, so member lists stay sorted.
            members[class as usize].push(index as u32);
            class_of.push(class);
        }

        Self { class_of, members }
    }

    /// Every vertex in its own class (deduplication disabled).
    pub fn identity(vertex_count: usize) -> Self {
        Self {
            class_of: (0..vertex_count as u32).collect(),
            members: (0..vertex_count as u32).map(|i| vec![i]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.class_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_of.is_empty()
    }

    /// All indices at the same position as `index`, itself included, sorted.
    pub fn coincident(&self, index: u32) -> &[u32] {
        &self.members[self.class_of[index as usize] as usize]
    }

    /// The lowest index sharing the position of `index`.
    pub fn canonical(&self, index: u32) -> u32 {
        self.coincident(index)[0]
    }

    /// Number of distinct positions.
    pub fn class_count(&self) -> usize {
        self.members.len()
    }
}
