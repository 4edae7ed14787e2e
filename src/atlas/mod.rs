//! Island packing into the unit square.
//!
//! Each island is reduced to its bounding rectangle plus margin, the
//! rectangles are packed, and every UV is moved and scaled so the whole
//! layout lands in `[0, 1]²`.

mod merge;
mod packer;

pub use merge::{merge_islands, MergeSettings};
pub use packer::{pack, PackLayout};

use crate::unwrap::face::FaceStore;
use crate::unwrap::hull::Bounds2;
use crate::unwrap::island::Island;
use glam::DVec2;

/// Smallest box side handed to the packer.
const MIN_BOX_SIDE: f64 = 1e-12;

/// Packing parameters.
#[derive(Debug, Clone, Default)]
pub struct PackSettings {
    /// Padding between islands, as a fraction of the final UV square.
    pub margin: f64,
    /// Fill holes in large islands before packing.
    pub merge: Option<MergeSettings>,
}

/// Summary of one packing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackSummary {
    /// UV units per world unit.
    pub scale: f64,
    /// Packed width in world units.
    pub width: f64,
    /// Packed height in world units.
    pub height: f64,
    /// Fraction of the packed area covered by island boxes.
    pub fill: f64,
    /// Islands packed (after merging).
    pub islands: usize,
}

impl Default for PackSummary {
    fn default() -> Self {
        Self {
            scale: 1.0,
            width: 0.0,
            height: 0.0,
            fill: 0.0,
            islands: 0,
        }
    }
}

/// Pack islands and rewrite their UVs into the unit square.
pub fn pack_islands(islands: &mut Vec<Island>, store: &mut FaceStore, settings: &PackSettings) -> PackSummary {
    if let Some(merge) = &settings.merge {
        merge_islands(islands, store, merge);
    }

    let bounds: Vec<Bounds2> = islands.iter().filter_map(|i| i.bounds(store)).collect();
    if bounds.is_empty() {
        return PackSummary::default();
    }
    debug_assert_eq!(bounds.len(), islands.len());

    // The margin is given in final UV units; convert it with the packer's
    // starting estimate of the bin side.
    let total_area: f64 = bounds.iter().map(|b| b.width().max(MIN_BOX_SIDE) * b.height().max(MIN_BOX_SIDE)).sum();
    let margin = settings.margin * (total_area / 0.95).sqrt();

    let sizes: Vec<DVec2> = bounds
        .iter()
        .map(|b| {
            DVec2::new(
                (b.width() + 2.0 * margin).max(MIN_BOX_SIDE),
                (b.height() + 2.0 * margin).max(MIN_BOX_SIDE),
            )
        })
        .collect();

    let layout = pack(&sizes);
    let scale = layout.unit_scale();

    for ((island, b), position) in islands.iter().zip(&bounds).zip(&layout.positions) {
        let offset = *position + DVec2::splat(margin) - b.min;
        island.map_uvs(store, |uv| ((uv + offset) * scale).clamp(DVec2::ZERO, DVec2::ONE));
    }

    log::debug!(
        "Packed {} islands into {:.4} x {:.4} (fill {:.1}%)",
        islands.len(),
        layout.width,
        layout.height,
        layout.fill * 100.0
    );

    PackSummary {
        scale,
        width: layout.width,
        height: layout.height,
        fill: layout.fill,
        islands: islands.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unwrap::face::{EdgeKey, Face, FaceHandle};
    use glam::DVec3;

    fn square_island(store: &mut FaceStore, origin: DVec2, side: f64) -> Island {
        let p = |x: f64, y: f64| origin + DVec2::new(x, y) * side;
        let uvs = [
            [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)],
            [p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        ];
        let faces = uvs
            .iter()
            .enumerate()
            .map(|(i, &uv)| Face {
                mesh: 0,
                triangle: i as u32,
                vertices: [0, 1, 2],
                world: uv.map(|q| DVec3::new(q.x, q.y, 0.0)),
                uv,
                normal: DVec3::Z,
                area: side * side / 2.0,
                edge_keys: [EdgeKey::new(0, 0, 1), EdgeKey::new(0, 1, 2), EdgeKey::new(0, 2, 0)],
            })
            .collect();
        let mesh = store.push_mesh(faces);
        Island {
            faces: vec![FaceHandle { mesh, face: 0 }, FaceHandle { mesh, face: 1 }],
        }
    }

    #[test]
    fn test_no_islands() {
        let mut store = FaceStore::new();
        let summary = pack_islands(&mut Vec::new(), &mut store, &PackSettings::default());
        assert_eq!(summary.islands, 0);
        assert_eq!(summary.scale, 1.0);
    }

    #[test]
    fn test_islands_land_in_unit_square_without_overlap() {
        let mut store = FaceStore::new();
        let mut islands = vec![
            square_island(&mut store, DVec2::new(-5.0, 3.0), 2.0),
            square_island(&mut store, DVec2::new(100.0, 100.0), 1.0),
            square_island(&mut store, DVec2::new(0.0, 0.0), 1.0),
        ];
        let summary = pack_islands(&mut islands, &mut store, &PackSettings::default());

        assert_eq!(summary.islands, 3);
        assert!((summary.scale - 1.0 / summary.width.max(summary.height)).abs() < 1e-12);

        let boxes: Vec<Bounds2> = islands.iter().map(|i| i.bounds(&store).unwrap()).collect();
        for b in &boxes {
            assert!(b.min.x >= 0.0 && b.min.y >= 0.0 && b.max.x <= 1.0 && b.max.y <= 1.0);
        }
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                let (a, b) = (boxes[i], boxes[j]);
                let disjoint = a.max.x <= b.min.x + 1e-9
                    || b.max.x <= a.min.x + 1e-9
                    || a.max.y <= b.min.y + 1e-9
                    || b.max.y <= a.min.y + 1e-9;
                assert!(disjoint, "islands {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn test_margin_separates_islands() {
        let mut store = FaceStore::new();
        let mut islands = vec![
            square_island(&mut store, DVec2::ZERO, 1.0),
            square_island(&mut store, DVec2::ZERO, 1.0),
        ];
        let settings = PackSettings {
            margin: 0.05,
            merge: None,
        };
        pack_islands(&mut islands, &mut store, &settings);
        let a = islands[0].bounds(&store).unwrap();
        let b = islands[1].bounds(&store).unwrap();
        let gap_x = (b.min.x - a.max.x).max(a.min.x - b.max.x);
        let gap_y = (b.min.y - a.max.y).max(a.min.y - b.max.y);
        assert!(gap_x.max(gap_y) > 0.01);
        assert!(a.min.x > 0.0 && a.min.y > 0.0);
    }
}
