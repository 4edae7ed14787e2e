//! Wavefront OBJ export.
//!
//! OBJ is a simple, widely-supported text-based 3D format.
//! Each mesh becomes an object; the lightmap channel is written as `vt`
//! and normals as `vn` when the mesh carries a normal stream.

use crate::error::Result;
use crate::mesh_output::UnwrapOutput;
use crate::types::AttributeKind;
use std::fmt::Write;

/// Export every mesh of an unwrap result to one OBJ document.
pub fn export_obj(output: &UnwrapOutput) -> Result<String> {
    let total_verts = output.total_vertices();
    let total_tris = output.total_triangles();

    // ~60 bytes per v/vt/vn line, ~40 per face
    let mut obj = String::with_capacity(256 + total_verts * 180 + total_tris * 40);

    writeln!(obj, "# lightmap-uv OBJ export")?;
    writeln!(obj, "# Vertices: {}", total_verts)?;
    writeln!(obj, "# Triangles: {}", total_tris)?;
    writeln!(obj, "# World to texel ratio: {}", output.world_to_texel_ratio)?;

    // OBJ indices are global and 1-based.
    let mut vertex_offset: usize = 1;

    for mesh in &output.meshes {
        writeln!(obj)?;
        writeln!(obj, "o {}", mesh.name)?;

        for p in &mesh.positions {
            writeln!(obj, "v {} {} {}", p[0], p[1], p[2])?;
        }
        for uv in &mesh.lightmap_uvs {
            writeln!(obj, "vt {} {}", uv[0], uv[1])?;
        }

        let normals = mesh
            .attribute(&AttributeKind::Normal)
            .filter(|a| a.components == 3 && a.vertex_count() == mesh.vertex_count());
        if let Some(normals) = normals {
            for n in normals.data.chunks_exact(3) {
                writeln!(obj, "vn {} {} {}", n[0], n[1], n[2])?;
            }
        }

        for tri in mesh.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0], tri[1], tri[2]].map(|i| i as usize + vertex_offset);
            if normals.is_some() {
                writeln!(obj, "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2}", i0, i1, i2)?;
            } else {
                writeln!(obj, "f {0}/{0} {1}/{1} {2}/{2}", i0, i1, i2)?;
            }
        }

        vertex_offset += mesh.vertex_count();
    }

    Ok(obj)
}
