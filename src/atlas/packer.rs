//! Rectangle packing with a guillotine free-space list.
//!
//! Boxes go in tallest first. The bin starts as a single column wide enough
//! for the widest box and unbounded downwards; each placement splits the
//! space it lands in into at most two remainders.

use glam::DVec2;

/// Target utilisation used to size the starting bin width.
const START_FILL: f64 = 0.95;

/// A free region of the bin.
#[derive(Debug, Clone, Copy)]
struct FreeSpace {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Result of packing a set of boxes.
#[derive(Debug, Clone)]
pub struct PackLayout {
    /// Top-left corner of each box, in input order.
    pub positions: Vec<DVec2>,
    /// Width actually covered by boxes.
    pub width: f64,
    /// Height actually covered by boxes.
    pub height: f64,
    /// Box area divided by `width * height` (0 when nothing was packed).
    pub fill: f64,
}

impl PackLayout {
    /// Uniform scale that maps the layout into the unit square.
    pub fn unit_scale(&self) -> f64 {
        let side = self.width.max(self.height);
        if side > 0.0 {
            1.0 / side
        } else {
            1.0
        }
    }
}

/// Pack boxes given as `(width, height)` sizes.
pub fn pack(sizes: &[DVec2]) -> PackLayout {
    let mut area = 0.0;
    let mut max_width: f64 = 0.0;
    for size in sizes {
        area += size.x * size.y;
        max_width = max_width.max(size.x);
    }

    // Stable sort keeps input order among equal heights.
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| sizes[b].y.total_cmp(&sizes[a].y));

    let start_width = (area / START_FILL).sqrt().max(max_width);
    let mut spaces = vec![FreeSpace {
        x: 0.0,
        y: 0.0,
        w: start_width,
        h: f64::INFINITY,
    }];

    let mut positions = vec![DVec2::ZERO; sizes.len()];
    let mut width: f64 = 0.0;
    let mut height: f64 = 0.0;

    for index in order {
        let size = sizes[index];
        // Smaller, more recent spaces are tried first.
        let slot = spaces
            .iter()
            .rposition(|space| size.x <= space.w && size.y <= space.h);

        let position = match slot {
            Some(i) => {
                let space = spaces[i];
                let position = DVec2::new(space.x, space.y);

                if size.x == space.w && size.y == space.h {
                    spaces.swap_remove(i);
                } else if size.y == space.h {
                    spaces[i].x += size.x;
                    spaces[i].w -= size.x;
                } else if size.x == space.w {
                    spaces[i].y += size.y;
                    spaces[i].h -= size.y;
                } else {
                    spaces.push(FreeSpace {
                        x: space.x + size.x,
                        y: space.y,
                        w: space.w - size.x,
                        h: size.y,
                    });
                    spaces[i].y += size.y;
                    spaces[i].h -= size.y;
                }
                position
            }
            None => {
                // Nothing fits: grow the bin below everything placed so far.
                log::warn!("Box {} ({} x {}) fits no free space, growing bin", index, size.x, size.y);
                DVec2::new(0.0, height)
            }
        };

        positions[index] = position;
        width = width.max(position.x + size.x);
        height = height.max(position.y + size.y);
    }

    let fill = if width > 0.0 && height > 0.0 {
        area / (width * height)
    } else {
        0.0
    };

    PackLayout {
        positions,
        width,
        height,
        fill,
    }
}
