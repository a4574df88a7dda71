//! Projected 2D wireframe rendering, the middle fallback strategy.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, Blend};
use imageproc::point::Point;
use nalgebra::Point2;
use tracing::debug;

use crate::error::{PreviewError, PreviewResult};
use crate::io;
use crate::mesh::Mesh;
use crate::projection::project;
use crate::render::{RenderOptions, RenderStrategy, StrategyKind, LIGHT_STEEL_BLUE, STEEL_BLUE, WHITE};

/// Padding between the projected drawing and the canvas edge, pixels.
const PADDING: f64 = 16.0;

/// Outline opacity (matches the 0.6 alpha of the tool this replaces).
const EDGE_ALPHA: u8 = 153;

/// Fill opacity for the sampled faces (0.3 alpha).
const FILL_ALPHA: u8 = 77;

/// Renders every face as a closed triangle outline under the fixed oblique
/// projection, filling every n-th face translucently so dense meshes still
/// convey surface coverage without overdrawing.
pub struct WireframeRender;

impl RenderStrategy for WireframeRender {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Wireframe
    }

    fn render(&self, source: &Path, dest: &Path, options: &RenderOptions) -> PreviewResult<()> {
        let mesh = io::load_mesh(source)?;
        draw_wireframe(&mesh, dest, options)
    }
}

/// Whether the face at `face_idx` gets a translucent fill.
///
/// Stride sampling starting at index 0; a stride of 0 disables filling.
#[inline]
pub(crate) fn is_filled_face(face_idx: usize, stride: usize) -> bool {
    stride > 0 && face_idx % stride == 0
}

fn draw_wireframe(mesh: &Mesh, dest: &Path, options: &RenderOptions) -> PreviewResult<()> {
    let projected: Vec<Point2<f64>> = mesh.vertices.iter().map(project).collect();
    if projected.is_empty() {
        return Err(PreviewError::DegenerateGeometry {
            details: "mesh has no vertices".to_string(),
        });
    }

    // Equal-aspect fit of the projected extent into the padded canvas.
    let mut min = projected[0];
    let mut max = projected[0];
    for p in &projected[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    let span = (max.x - min.x).max(max.y - min.y);
    if !span.is_finite() || span <= 0.0 {
        return Err(PreviewError::DegenerateGeometry {
            details: format!("projected extent collapses to a point ({span})"),
        });
    }

    let width = options.width;
    let height = options.height;
    let scale = (width.min(height) as f64 - 2.0 * PADDING) / span;
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let mid_x = (min.x + max.x) / 2.0;
    let mid_y = (min.y + max.y) / 2.0;

    // Screen y grows downward; flip so the projection keeps its orientation.
    let to_screen =
        |p: &Point2<f64>| -> (f64, f64) { (cx + (p.x - mid_x) * scale, cy - (p.y - mid_y) * scale) };

    let mut canvas = Blend(RgbaImage::from_pixel(width, height, WHITE));
    let edge_color = Rgba([STEEL_BLUE[0], STEEL_BLUE[1], STEEL_BLUE[2], EDGE_ALPHA]);
    let fill_color = Rgba([
        LIGHT_STEEL_BLUE[0],
        LIGHT_STEEL_BLUE[1],
        LIGHT_STEEL_BLUE[2],
        FILL_ALPHA,
    ]);

    // Every face gets a closed triangle outline.
    for &face in &mesh.faces {
        let pts: Vec<(f64, f64)> = face
            .iter()
            .map(|&i| to_screen(&projected[i as usize]))
            .collect();

        for i in 0..3 {
            let from = pts[i];
            let to = pts[(i + 1) % 3]; // close the loop back to the first vertex
            draw_line_segment_mut(
                &mut canvas,
                (from.0 as f32, from.1 as f32),
                (to.0 as f32, to.1 as f32),
                edge_color,
            );
        }
    }

    // Sampled translucent fills on top of the outlines.
    let mut filled = 0usize;
    for (face_idx, &face) in mesh.faces.iter().enumerate() {
        if !is_filled_face(face_idx, options.fill_stride) {
            continue;
        }

        let poly: Vec<Point<i32>> = face
            .iter()
            .map(|&i| {
                let (x, y) = to_screen(&projected[i as usize]);
                Point::new(x as i32, y as i32)
            })
            .collect();

        // Sub-pixel faces collapse to repeated points the rasterizer rejects.
        if poly[0] != poly[1] && poly[1] != poly[2] && poly[0] != poly[2] {
            draw_polygon_mut(&mut canvas, &poly, fill_color);
            filled += 1;
        }
    }

    debug!(
        "Wireframe: {} faces outlined, {} filled (stride {})",
        mesh.face_count(),
        filled,
        options.fill_stride
    );

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

    #[test]
    fn test_fill_stride_sampling() {
        let filled: Vec<usize> = (0..23).filter(|&i| is_filled_face(i, 5)).collect();
        assert_eq!(filled, vec![0, 5, 10, 15, 20]);
    }

    #[test]
    fn test_fill_stride_zero_disables_filling() {
        assert!((0..100).all(|i| !is_filled_face(i, 0)));
    }

    #[test]
    fn test_fill_stride_one_fills_everything() {
        assert!((0..100).all(|i| is_filled_face(i, 1)));
    }

    #[test]
    fn test_draw_wireframe_writes_png() {
        let mut mesh = Mesh::new();
        mesh.vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        mesh.faces = vec![[0, 1, 2]];

        let dir = tempdir().unwrap();
        let dest = dir.path().join("triangle.png");

        draw_wireframe(&mesh, &dest, &RenderOptions::default()).expect("should render");
        assert!(dest.exists());
        assert!(std::fs::metadata(&dest).unwrap().len() > 0);
    }

    #[test]
    fn test_point_mesh_is_rejected() {
        let mut mesh = Mesh::new();
        mesh.vertices = vec![Point3::new(2.0, 2.0, 2.0); 3];
        mesh.faces = vec![[0, 1, 2]];

        let dir = tempdir().unwrap();
        let dest = dir.path().join("point.png");

        let err = draw_wireframe(&mesh, &dest, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, PreviewError::DegenerateGeometry { .. }));
        assert!(!dest.exists());
    }
}
