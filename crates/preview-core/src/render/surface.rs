//! Shaded surface rendering, the highest-fidelity strategy.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, Blend};
use imageproc::point::Point;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{PreviewError, PreviewResult};
use crate::io;
use crate::mesh::Mesh;
use crate::render::{RenderOptions, RenderStrategy, StrategyKind, DARK_BLUE, LIGHT_STEEL_BLUE, WHITE};

/// Fixed viewing angles, degrees.
const ELEVATION_DEG: f64 = 20.0;
const AZIMUTH_DEG: f64 = 45.0;

/// Fill opacity for shaded faces.
const FILL_ALPHA: u8 = 204;

/// Renders the mesh as a flat-shaded surface from a fixed isometric-style
/// viewpoint: orthographic camera at elevation 20°, azimuth 45°, equal
/// aspect on all three axes, painter-ordered faces with thin dark edges.
pub struct SurfaceRender;

impl RenderStrategy for SurfaceRender {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Surface
    }

    fn render(&self, source: &Path, dest: &Path, options: &RenderOptions) -> PreviewResult<()> {
        let mesh = io::load_mesh(source)?;
        draw_surface(&mesh, dest, options)
    }
}

fn draw_surface(mesh: &Mesh, dest: &Path, options: &RenderOptions) -> PreviewResult<()> {
    let (min, max) = mesh.bounds().ok_or_else(|| PreviewError::DegenerateGeometry {
        details: "mesh has no bounds".to_string(),
    })?;

    let span = max - min;
    // Half of the largest axis span; the view volume extends this far from
    // the midpoint on every axis so non-cubic meshes are not distorted.
    let max_range = span.x.max(span.y).max(span.z) / 2.0;
    if !max_range.is_finite() || max_range <= 0.0 {
        return Err(PreviewError::DegenerateGeometry {
            details: format!("zero-extent bounding box ({max_range})"),
        });
    }

    let mid = Point3::from((min.coords + max.coords) * 0.5);

    // Orthographic camera basis from the fixed viewing angles. `view` points
    // from the scene toward the camera; larger depth = closer.
    let elev = ELEVATION_DEG.to_radians();
    let azim = AZIMUTH_DEG.to_radians();
    let view = Vector3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin());
    let right = Vector3::new(-azim.sin(), azim.cos(), 0.0);
    let up = view.cross(&right);

    let light = Vector3::new(-0.4, -0.3, 0.85).normalize();

    let width = options.width;
    let height = options.height;
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    // The rotated view cube fits inside a sphere of radius max_range * sqrt(3).
    let scale = 0.95 * (width.min(height) as f64 / 2.0) / (max_range * 3.0_f64.sqrt());

    let to_screen = |p: &Point3<f64>| -> (f64, f64, f64) {
        let d = p - mid;
        (
            cx + d.dot(&right) * scale,
            cy - d.dot(&up) * scale,
            d.dot(&view),
        )
    };

    // Painter's algorithm: sort faces back to front by camera-space depth.
    let mut order: Vec<usize> = (0..mesh.face_count()).collect();
    let depths: Vec<f64> = mesh
        .faces
        .iter()
        .map(|&face| {
            let [v0, v1, v2] = mesh.face_positions(face);
            let centroid = Point3::from((v0.coords + v1.coords + v2.coords) / 3.0);
            (centroid - mid).dot(&view)
        })
        .collect();
    order.sort_by(|&a, &b| depths[a].total_cmp(&depths[b]));

    let mut canvas = Blend(RgbaImage::from_pixel(width, height, WHITE));
    let [r, g, b] = LIGHT_STEEL_BLUE;
    let edge_color = Rgba([DARK_BLUE[0], DARK_BLUE[1], DARK_BLUE[2], 255]);

    for face_idx in order {
        let [v0, v1, v2] = mesh.face_positions(mesh.faces[face_idx]);
        let s0 = to_screen(&v0);
        let s1 = to_screen(&v1);
        let s2 = to_screen(&v2);

        // Flat shading against the fixed light, with an ambient floor so
        // back-facing geometry stays visible.
        let normal = (v1 - v0).cross(&(v2 - v0));
        let shade = match normal.try_normalize(f64::EPSILON) {
            Some(n) => 0.3 + 0.7 * n.dot(&light).abs(),
            None => 0.3,
        };
        let fill = Rgba([
            (r as f64 * shade) as u8,
            (g as f64 * shade) as u8,
            (b as f64 * shade) as u8,
            FILL_ALPHA,
        ]);

        let poly = [
            Point::new(s0.0 as i32, s0.1 as i32),
            Point::new(s1.0 as i32, s1.1 as i32),
            Point::new(s2.0 as i32, s2.1 as i32),
        ];

        // Pixel-scale slivers collapse to repeated points, which the polygon
        // rasterizer rejects; their outline still gets drawn below.
        if poly[0] != poly[1] && poly[1] != poly[2] && poly[0] != poly[2] {
            draw_polygon_mut(&mut canvas, &poly, fill);
        }

        for (from, to) in [(s0, s1), (s1, s2), (s2, s0)] {
            draw_line_segment_mut(
                &mut canvas,
                (from.0 as f32, from.1 as f32),
                (to.0 as f32, to.1 as f32),
                edge_color,
            );
        }
    }

    debug!("Shaded {} faces at {}x{}", mesh.face_count(), width, height);

    canvas.0.save(dest).map_err(|e| PreviewError::ImageWrite {
        path: dest.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use tempfile::tempdir;

    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(5.0, 10.0, 0.0),
            Point3::new(5.0, 5.0, 10.0),
        ];
        mesh.faces = vec![[0, 1, 2], [0, 3, 1], [1, 3, 2], [2, 3, 0]];
        mesh
    }

    #[test]
    fn test_draw_surface_writes_png() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("tetra.png");

        draw_surface(&tetrahedron(), &dest, &RenderOptions::default()).expect("should render");

        assert!(dest.exists());
        assert!(std::fs::metadata(&dest).unwrap().len() > 0);
    }

    #[test]
    fn test_zero_extent_mesh_is_rejected() {
        let mut mesh = Mesh::new();
        mesh.vertices = vec![Point3::new(1.0, 1.0, 1.0); 3];
        mesh.faces = vec![[0, 1, 2]];

        let dir = tempdir().unwrap();
        let dest = dir.path().join("degenerate.png");

        let err = draw_surface(&mesh, &dest, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, PreviewError::DegenerateGeometry { .. }));
        assert!(!dest.exists(), "failed render must not leave a file behind");
    }

    #[test]
    fn test_missing_source_fails_without_output() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing.png");

        let result = SurfaceRender.render(
            Path::new("/nonexistent/part.stl"),
            &dest,
            &RenderOptions::default(),
        );

        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
