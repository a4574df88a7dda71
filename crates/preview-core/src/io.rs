//! STL loading (the geometry adapter behind every render strategy).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PreviewError, PreviewResult};
use crate::mesh::Mesh;

/// Load a mesh from an STL file (binary or ASCII).
///
/// Degenerate faces (repeated vertex indices) are dropped so every face in
/// the returned mesh references three distinct, in-range vertices. A file
/// that yields no usable geometry is a load error.
pub fn load_mesh(path: &Path) -> PreviewResult<Mesh> {
    let file = File::open(path).map_err(|e| PreviewError::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader).map_err(|e| PreviewError::Parse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());

    for v in &stl.vertices {
        mesh.vertices
            .push(nalgebra::Point3::new(v[0] as f64, v[1] as f64, v[2] as f64));
    }

    for face in &stl.faces {
        let indices = [
            face.vertices[0] as u32,
            face.vertices[1] as u32,
            face.vertices[2] as u32,
        ];

        // Skip degenerate triangles
        if indices[0] != indices[1] && indices[1] != indices[2] && indices[0] != indices[2] {
            mesh.faces.push(indices);
        }
    }

    if mesh.is_empty() {
        return Err(PreviewError::EmptyMesh {
            path: path.to_path_buf(),
        });
    }

    if let Some((min, max)) = mesh.bounds() {
        info!(
            "Loaded mesh: {} vertices, {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        );
        debug!(
            "Bounding box: [{:.1}, {:.1}, {:.1}] to [{:.1}, {:.1}, {:.1}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(mesh)
}

/// Check whether a path has the STL extension, compared case-insensitively.
pub fn is_stl_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("stl"))
        .unwrap_or(false)
}
