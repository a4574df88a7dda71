//! Core mesh data model.

use nalgebra::{Point3, Vector3};

/// A triangle mesh with indexed vertices and faces.
///
/// Owned transiently per render attempt: the loader produces it, a render
/// strategy consumes it, and it is dropped when the attempt finishes.
/// Every face index is in range of the vertex array; the loader enforces
/// this by dropping degenerate faces.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Number of vertices in the mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (triangles) in the mesh.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty (no vertices or faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Compute the axis-aligned bounding box.
    /// Returns (min_corner, max_corner) or None if mesh is empty.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for p in &self.vertices[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some((min, max))
    }

    /// Axis extents of the bounding box, or None if the mesh is empty.
    pub fn extents(&self) -> Option<Vector3<f64>> {
        self.bounds().map(|(min, max)| max - min)
    }

    /// Enclosed volume via the signed tetrahedron sum.
    ///
    /// Only meaningful for closed, consistently wound meshes; for open or
    /// non-manifold input the value is informational at best. Callers treat
    /// it as a display quantity, never as geometry input.
    pub fn volume(&self) -> f64 {
        let signed: f64 = self
            .faces
            .iter()
            .map(|&[i0, i1, i2]| {
                let v0 = self.vertices[i0 as usize].coords;
                let v1 = self.vertices[i1 as usize].coords;
                let v2 = self.vertices[i2 as usize].coords;
                v0.dot(&v1.cross(&v2)) / 6.0
            })
            .sum();
        signed.abs()
    }

    /// Resolve a face to its three vertex positions.
    #[inline]
    pub fn face_positions(&self, face: [u32; 3]) -> [Point3<f64>; 3] {
        [
            self.vertices[face[0] as usize],
            self.vertices[face[1] as usize],
            self.vertices[face[2] as usize],
        ]
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
