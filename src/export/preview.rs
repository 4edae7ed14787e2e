//! PNG preview of the packed lightmap layout.
//!
//! Triangles are filled with a dim per-mesh colour and outlined in the
//! full colour, over a dark background. V points up.

use crate::error::{Result, UnwrapError};
use crate::mesh_output::UnwrapOutput;
use image::{ImageEncoder, Rgba, RgbaImage};

/// Largest preview edge, in pixels.
pub const MAX_PREVIEW_SIZE: u32 = 8192;

const BACKGROUND: Rgba<u8> = Rgba([24, 24, 28, 255]);

const PALETTE: [[u8; 3]; 8] = [
    [230, 97, 80],
    [94, 186, 125],
    [86, 140, 230],
    [240, 190, 70],
    [180, 110, 220],
    [70, 200, 210],
    [235, 130, 180],
    [160, 200, 80],
];

fn mesh_color(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Render the layout into an RGBA image of `size` x `size` pixels.
pub fn render_preview(output: &UnwrapOutput, size: u32) -> Result<RgbaImage> {
    if size == 0 || size > MAX_PREVIEW_SIZE {
        return Err(UnwrapError::invalid_param(
            "preview_size",
            size,
            "must be in 1..=8192",
        ));
    }

    let mut image = RgbaImage::from_pixel(size, size, BACKGROUND);
    let scale = (size - 1) as f32;
    let to_pixel = |uv: [f32; 2]| [uv[0] * scale, (1.0 - uv[1]) * scale];

    for (mesh_index, mesh) in output.meshes.iter().enumerate() {
        let [r, g, b] = mesh_color(mesh_index);
        let fill = Rgba([r / 3, g / 3, b / 3, 255]);
        let edge = Rgba([r, g, b, 255]);

        for tri in mesh.indices.chunks_exact(3) {
            let corners = [tri[0], tri[1], tri[2]].map(|i| to_pixel(mesh.lightmap_uvs[i as usize]));
            fill_triangle(&mut image, corners, fill);
            for k in 0..3 {
                draw_line(&mut image, corners[k], corners[(k + 1) % 3], edge);
            }
        }
    }

    Ok(image)
}

/// Render the layout and encode it as PNG bytes.
pub fn render_preview_png(output: &UnwrapOutput, size: u32) -> Result<Vec<u8>> {
    let image = render_preview(output, size)?;

    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(bytes)
}

fn put(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two pixel-space points.
fn draw_line(image: &mut RgbaImage, from: [f32; 2], to: [f32; 2], color: Rgba<u8>) {
    let (mut x0, mut y0) = (from[0].round() as i64, from[1].round() as i64);
    let (x1, y1) = (to[0].round() as i64, to[1].round() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(image, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Fill pixels whose centre lies inside the triangle.
fn fill_triangle(image: &mut RgbaImage, corners: [[f32; 2]; 3], color: Rgba<u8>) {
    let [a, b, c] = corners;
    let edge = |p: [f32; 2], q: [f32; 2], x: f32, y: f32| (q[0] - p[0]) * (y - p[1]) - (q[1] - p[1]) * (x - p[0]);
    let area = edge(a, b, c[0], c[1]);
    if area == 0.0 {
        return;
    }

    let min_x = a[0].min(b[0]).min(c[0]).floor().max(0.0) as i64;
    let max_x = a[0].max(b[0]).max(c[0]).ceil() as i64;
    let min_y = a[1].min(b[1]).min(c[1]).floor().max(0.0) as i64;
    let max_y = a[1].max(b[1]).max(c[1]).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f32, y as f32);
            let w0 = edge(b, c, px, py) / area;
            let w1 = edge(c, a, px, py) / area;
            let w2 = edge(a, b, px, py) / area;
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                put(image, x, y, color);
            }
        }
    }
}
