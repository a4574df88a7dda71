//! Schematic bounding-box card, the last-resort strategy.
//!
//! Produces a stylized information card rather than a geometric depiction,
//! so some preview exists for any mesh that loads at all.

use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, Blend};
use imageproc::rect::Rect;
use tracing::debug;

use crate::error::{PreviewError, PreviewResult};
use crate::io;
use crate::mesh::Mesh;
use crate::render::{RenderOptions, RenderStrategy, StrategyKind, BLACK, STEEL_BLUE, WHITE};

/// Embedded fallback font so text works with no font infrastructure at all.
const FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

const TEXT_SIZE: f32 = 16.0;
const LINE_HEIGHT: i32 = 20;
const BORDER_WIDTH: i32 = 3;

/// Renders a bordered card listing the source file name, face count,
/// volume, and bounding-box extents. The corner highlight is cosmetic and
/// not derived from mesh geometry.
pub struct BoundingBoxRender;

impl RenderStrategy for BoundingBoxRender {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BoundingBox
    }

    fn render(&self, source: &Path, dest: &Path, options: &RenderOptions) -> PreviewResult<()> {
        let mesh = io::load_mesh(source)?;
        draw_card(&mesh, source, dest, options)
    }
}

fn draw_card(mesh: &Mesh, source: &Path, dest: &Path, options: &RenderOptions) -> PreviewResult<()> {
    let width = options.width as i32;
    let height = options.height as i32;
    let margin = options.margin as i32;

    let inner_w = width - 2 * margin;
    let inner_h = height - 2 * margin;
    if inner_w <= 2 * BORDER_WIDTH || inner_h <= 2 * BORDER_WIDTH {
        return Err(PreviewError::Render {
            details: format!("canvas {width}x{height} too small for margin {margin}"),
        });
    }

    let font = FontRef::try_from_slice(FONT_BYTES).map_err(|e| PreviewError::Font {
        details: e.to_string(),
    })?;

    let mut img = RgbaImage::from_pixel(options.width, options.height, WHITE);
    let [r, g, b] = STEEL_BLUE;
    let border_color = Rgba([r, g, b, 255]);

    // Bordered rectangle inset from the canvas edges.
    for inset in 0..BORDER_WIDTH {
        draw_hollow_rect_mut(
            &mut img,
            Rect::at(margin + inset, margin + inset)
                .of_size((inner_w - 2 * inset) as u32, (inner_h - 2 * inset) as u32),
            border_color,
        );
    }

    // Decorative corner highlight: short segments fading out above the top
    // corners. Purely cosmetic.
    let mut canvas = Blend(img);
    let steps = options.corner_fade_steps as i32;
    for offset in 0..steps {
        let alpha = (255.0 * (1.0 - offset as f32 / steps as f32)) as u8;
        let fade = Rgba([r, g, b, alpha]);
        for corner_x in [margin, width - margin] {
            let x = (corner_x + offset) as f32;
            let y = (margin - offset) as f32;
            draw_line_segment_mut(&mut canvas, (x, y), (x + 1.0, y), fade);
        }
    }
    let mut img = canvas.0;

    // Mesh statistics block anchored above the card's bottom edge.
    let volume = mesh.volume();
    let extents = mesh.extents().unwrap_or_else(nalgebra::Vector3::zeros);
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let lines = [
        format!("File: {file_name}"),
        format!("Faces: {}", mesh.face_count()),
        format!("Volume: {volume:.2} units\u{b3}"),
        format!(
            "Size: {:.2} x {:.2} x {:.2} units",
            extents.x, extents.y, extents.z
        ),
    ];

    let scale = PxScale::from(TEXT_SIZE);
    let mut y = height - margin - LINE_HEIGHT * (lines.len() as i32 + 1);
    for line in &lines {
        draw_text_mut(&mut img, BLACK, margin + BORDER_WIDTH * 2, y, scale, &font, line);
        y += LINE_HEIGHT;
    }

    debug!(
        "Card for {:?}: {} faces, volume {:.2}",
        file_name,
        mesh.face_count(),
        volume
    );

    img.save(dest).map_err(|e| PreviewError::ImageWrite {
        path: dest.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use tempfile::tempdir;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 2.0),
        ];
        mesh.faces = vec![[0, 1, 2]];
        mesh
    }

    #[test]
    fn test_draw_card_writes_png() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("card.png");

        draw_card(&triangle(), Path::new("part.stl"), &dest, &RenderOptions::default())
            .expect("should render");

        assert!(dest.exists());
        assert!(std::fs::metadata(&dest).unwrap().len() > 0);
    }

    #[test]
    fn test_canvas_smaller_than_margin_is_rejected() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("tiny.png");

        let options = RenderOptions::with_size(64, 64); // margin 50 leaves no room
        let err = draw_card(&triangle(), Path::new("part.stl"), &dest, &options).unwrap_err();

        assert!(matches!(err, PreviewError::Render { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_embedded_font_parses() {
        assert!(FontRef::try_from_slice(FONT_BYTES).is_ok());
    }
}
