//! Hole filling: nest small islands inside the wasted bounding area of
//! larger ones before packing.
//!
//! Placements are found by sweeping candidate offsets across the target's
//! bounds and rejecting any that make boundary edges cross or put one
//! island's points inside the other's triangles.

use crate::unwrap::face::{EdgeKey, FaceStore};
use crate::unwrap::island::Island;
use glam::DVec2;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Islands narrower or shorter than this never move.
const MIN_EXTENT: f64 = 1e-9;

/// Hole filling parameters.
#[derive(Debug, Clone)]
pub struct MergeSettings {
    /// Search density, 1 (coarse) to 100 (exhaustive).
    pub quality: u32,
    /// Set to stop searching; merges already made are kept.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl MergeSettings {
    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// A boundary edge of an island in UV space.
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: DVec2,
    b: DVec2,
    length: f64,
}

/// An island with the bookkeeping the search needs.
#[derive(Debug)]
struct MergeCandidate {
    island: Island,
    /// Sum of face areas.
    face_area: f64,
    /// Bounding area not covered by faces.
    wasted_area: f64,
    bounds_area: f64,
    width: f64,
    height: f64,
    /// Boundary edges, longest first.
    edges: Vec<Segment>,
    /// Distinct UV corners.
    points: Vec<DVec2>,
}

impl MergeCandidate {
    /// Move the island to the origin and collect its outline.
    fn new(island: Island, store: &mut FaceStore) -> Option<Self> {
        let bounds = island.bounds(store)?;
        let offset = bounds.min;
        island.map_uvs(store, |uv| uv - offset);

        let face_area = island.face_area(store);
        let bounds_area = bounds.area();
        let (edges, points) = outline(&island, store);

        Some(Self {
            island,
            face_area,
            wasted_area: (bounds_area - face_area).abs(),
            bounds_area,
            width: bounds.width(),
            height: bounds.height(),
            edges,
            points,
        })
    }
}

/// Boundary segments (edge keys used once) and unique points of an island.
fn outline(island: &Island, store: &FaceStore) -> (Vec<Segment>, Vec<DVec2>) {
    let mut users: HashMap<EdgeKey, (usize, DVec2, DVec2)> = HashMap::new();
    let mut points = Vec::with_capacity(island.len() * 3);

    for &handle in &island.faces {
        let face = store.get(handle);
        for k in 0..3 {
            let a = face.uv[k];
            let b = face.uv[(k + 1) % 3];
            users
                .entry(face.edge_keys[k])
                .and_modify(|entry| entry.0 += 1)
                .or_insert((1, a, b));
            points.push(a);
        }
    }

    let mut edges: Vec<Segment> = users
        .into_values()
        .filter(|&(count, _, _)| count == 1)
        .map(|(_, a, b)| Segment {
            a,
            b,
            length: a.distance(b),
        })
        .collect();
    sort_longest_first(&mut edges);

    points.sort_by(|p, q| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)));
    points.dedup();

    (edges, points)
}

fn sort_longest_first(edges: &mut [Segment]) {
    edges.sort_by(|e, f| {
        f.length
            .total_cmp(&e.length)
            .then(e.a.x.total_cmp(&f.a.x))
            .then(e.a.y.total_cmp(&f.a.y))
    });
}

/// Proper or touching intersection of two segments. Parallel segments
/// never count.
fn segments_intersect(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> bool {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.perp_dot(s);
    if denom == 0.0 {
        return false;
    }
    let qp = b0 - a0;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Barycentric containment; zero-area triangles contain nothing.
fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let s1 = b - a;
    let s2 = c - a;
    let det = s1.perp_dot(s2);
    if det == 0.0 {
        return false;
    }
    let d = p - a;
    let u = d.perp_dot(s2) / det;
    let v = s1.perp_dot(d) / det;
    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}

fn point_in_island(p: DVec2, island: &Island, store: &FaceStore) -> bool {
    island.faces.iter().any(|&h| {
        let uv = store.get(h).uv;
        point_in_triangle(p, uv[0], uv[1], uv[2])
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    None,
    EdgesCross,
    SourceInside,
    TargetInside,
}

/// Test `source` moved by `offset` against `target`.
fn overlap(source: &MergeCandidate, target: &MergeCandidate, offset: DVec2, store: &FaceStore) -> Overlap {
    for e in &source.edges {
        for t in &target.edges {
            if segments_intersect(t.a, t.b, e.a + offset, e.b + offset) {
                return Overlap::EdgesCross;
            }
        }
    }
    if source
        .points
        .iter()
        .any(|&p| point_in_island(p + offset, &target.island, store))
    {
        return Overlap::SourceInside;
    }
    if target
        .points
        .iter()
        .any(|&p| point_in_island(p - offset, &source.island, store))
    {
        return Overlap::TargetInside;
    }
    Overlap::None
}

/// Move `source` into `target` at `offset`.
fn absorb(target: &mut MergeCandidate, source: &mut MergeCandidate, offset: DVec2, store: &mut FaceStore) {
    source.island.map_uvs(store, |uv| uv + offset);
    target.island.faces.append(&mut source.island.faces);

    target.edges.extend(source.edges.drain(..).map(|e| Segment {
        a: e.a + offset,
        b: e.b + offset,
        length: e.length,
    }));
    sort_longest_first(&mut target.edges);
    target.points.extend(source.points.drain(..).map(|p| p + offset));

    target.face_area += source.face_area;
    target.wasted_area -= source.face_area;
    source.wasted_area = 0.0;
}

/// Borrow two distinct candidates mutably.
fn pair_mut(list: &mut [MergeCandidate], a: usize, b: usize) -> (&mut MergeCandidate, &mut MergeCandidate) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = list.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = list.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

/// Merge islands into each other's free space. Returns the number of
/// islands absorbed; `islands` keeps only the non-empty ones.
pub fn merge_islands(islands: &mut Vec<Island>, store: &mut FaceStore, settings: &MergeSettings) -> usize {
    let mut candidates: Vec<MergeCandidate> = islands
        .drain(..)
        .filter_map(|island| MergeCandidate::new(island, store))
        .collect();

    let quality = settings.quality.clamp(1, 100) as f64;
    // Candidate offsets per source extent: 1 at quality 1, about 5 at 100.
    let step_quality = (quality - 1.0) / 25.0 + 1.0;
    let free_space_quality = 1.0 + ((100.0 - quality) / 100.0) * 5.0;

    // Smallest bounds first as sources; least efficient first as targets.
    let mut by_area: Vec<usize> = (0..candidates.len()).collect();
    by_area.sort_by(|&a, &b| candidates[a].bounds_area.total_cmp(&candidates[b].bounds_area));
    let mut by_waste: Vec<usize> = (0..candidates.len()).collect();
    by_waste.sort_by(|&a, &b| candidates[b].wasted_area.total_cmp(&candidates[a].wasted_area));

    let mut merged = 0;

    'sources: for &s in &by_area {
        for &t in &by_waste {
            if settings.cancelled() {
                log::info!("Island merge cancelled after {} merges", merged);
                break 'sources;
            }
            if s == t || candidates[s].island.is_empty() || candidates[t].island.is_empty() {
                continue;
            }

            let (source, target) = pair_mut(&mut candidates, s, t);
            if source.width <= MIN_EXTENT || source.height <= MIN_EXTENT {
                continue 'sources;
            }
            if !(target.wasted_area > source.face_area * free_space_quality
                && target.width > source.width
                && target.height > source.height)
            {
                continue;
            }

            let Some(offset) = find_offset(source, target, step_quality, store, settings) else {
                continue;
            };
            absorb(target, source, offset, store);
            merged += 1;

            if source.island.is_empty() {
                continue 'sources;
            }
        }
    }

    islands.extend(
        candidates
            .into_iter()
            .map(|c| c.island)
            .filter(|island| !island.is_empty()),
    );
    log::debug!("Merged {} islands, {} remain", merged, islands.len());
    merged
}

/// Sweep offsets of `source` across `target`'s bounds, row by row, and
/// return the first one where the two islands do not overlap.
///
/// Gives up between rows once the cancel flag is set.
fn find_offset(
    source: &MergeCandidate,
    target: &MergeCandidate,
    step_quality: f64,
    store: &FaceStore,
    settings: &MergeSettings,
) -> Option<DVec2> {
    // Offsets stay inside the target's bounds.
    let test_width = target.width - source.width;
    let test_height = target.height - source.height;
    let x_step = source.width / step_quality;
    let y_step = source.height / step_quality;

    let mut bottom = 0.0;
    while bottom <= test_height {
        if settings.cancelled() {
            return None;
        }
        let mut left = 0.0;
        while left <= test_width {
            let offset = DVec2::new(left, bottom);
            match overlap(source, target, offset, store) {
                Overlap::None => return Some(offset),
                // Skip a whole width: nearby offsets would land inside too.
                Overlap::SourceInside => left += source.width,
                Overlap::EdgesCross | Overlap::TargetInside => {}
            }
            left += x_step;
        }
        bottom += y_step;
    }
    None
}
