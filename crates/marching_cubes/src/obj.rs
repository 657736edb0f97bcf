//! Wavefront OBJ export.
//!
//! Vertices are written in export id order, first all positions (`v`), then
//! all normals (`vn`), so a vertex's position and normal share one index and
//! faces use the `f a//a b//b c//c` form.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::Mesh;
use crate::vec3::Scalar;

/// Write `mesh` as OBJ text to `writer`.
pub fn write_obj<T: Scalar, W: Write>(mesh: &Mesh<T>, writer: &mut W) -> Result<()> {
  for vertex in mesh.vertices.values() {
    let p = vertex.position;
    writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
  }

  for vertex in mesh.vertices.values() {
    let n = vertex.normal;
    writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
  }

  for triangle in &mesh.triangles {
    // Triangles only reference assembled vertices
    if let Some([a, b, c]) = mesh.export_ids(triangle) {
      writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
  }

  Ok(())
}

/// Write `mesh` to the file at `path`, replacing it if it exists.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mc::save_obj"))]
pub fn save_obj<T: Scalar>(mesh: &Mesh<T>, path: impl AsRef<Path>) -> Result<()> {
  let mut writer = BufWriter::new(File::create(path.as_ref())?);
  write_obj(mesh, &mut writer)?;
  writer.flush()?;
  Ok(())
}

#[cfg(test)]
#[path = "obj_test.rs"]
mod obj_test;
