//! 2D convex hull and minimum-area bounding box fitting.

use glam::DVec2;

/// Axis-aligned bounds of a set of UV points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds2 {
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Rotate a point counter-clockwise about the origin.
pub fn rotate(point: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// Z component of `(a - o) x (b - o)`; positive for a left turn.
fn turn(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull by Andrew's monotone chain, counter-clockwise, no repeated
/// closing point. Collinear points are dropped.
pub fn convex_hull(points: &[DVec2]) -> Vec<DVec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<DVec2> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<DVec2> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Angle of the hull edge whose direction gives the smallest bounding box.
///
/// Rotating the points by the negated angle aligns that box with the axes.
/// Returns 0 for hulls with fewer than two points.
pub fn min_area_angle(hull: &[DVec2]) -> f64 {
    if hull.len() < 2 {
        return 0.0;
    }

    let mut best_area = f64::INFINITY;
    let mut best_angle = 0.0;

    for i in 0..hull.len() {
        let edge = hull[(i + 1) % hull.len()] - hull[i];
        let length = edge.length();
        if length <= f64::EPSILON {
            continue;
        }
        let dir = edge / length;
        let perp = DVec2::new(-dir.y, dir.x);

        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for &p in hull {
            let local = DVec2::new(p.dot(dir), p.dot(perp));
            min = min.min(local);
            max = max.max(local);
        }

        let area = (max.x - min.x) * (max.y - min.y);
        if area < best_area {
            best_area = area;
            best_angle = edge.y.atan2(edge.x);
        }
    }

    best_angle
}
