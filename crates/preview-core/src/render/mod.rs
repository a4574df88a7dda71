//! Render strategies for the preview fallback cascade.
//!
//! Three strategies of decreasing fidelity, each able to produce a PNG from
//! an STL file on its own:
//!
//! - [`SurfaceRender`]: shaded 3D surface view
//! - [`WireframeRender`]: projected 2D wireframe
//! - [`BoundingBoxRender`]: schematic card with mesh statistics
//!
//! Every strategy catches its own failures; the pipeline only ever sees a
//! `Result` and moves to the next strategy on error.

use std::fmt;
use std::path::Path;

use image::Rgba;

use crate::error::PreviewResult;

mod bounding_box;
mod surface;
mod wireframe;

pub use bounding_box::BoundingBoxRender;
pub use surface::SurfaceRender;
pub use wireframe::WireframeRender;

/// Identifies which render strategy produced a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Surface,
    Wireframe,
    BoundingBox,
}

impl StrategyKind {
    /// Short human-readable label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Surface => "3D surface",
            StrategyKind::Wireframe => "wireframe",
            StrategyKind::BoundingBox => "bounding box",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation parameters shared by all strategies.
///
/// The stride, margin, and fade values are presentation defaults carried
/// over from the tool this replaces; none of them is load-bearing and all
/// can be overridden by callers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output image width in pixels.
    pub width: u32,

    /// Output image height in pixels.
    pub height: u32,

    /// Fill every n-th face in the wireframe view (0 disables filling).
    pub fill_stride: usize,

    /// Inset of the bounding-box card rectangle from the canvas edges.
    pub margin: u32,

    /// Number of fading line segments in the card's corner highlight.
    pub corner_fade_steps: u32,
}

impl RenderOptions {
    /// Options with the given image size and default presentation values.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            fill_stride: 5,
            margin: 50,
            corner_fade_steps: 30,
        }
    }
}

/// A single rendering capability: attempt to turn one STL file into one
/// image file.
///
/// Implementations load the mesh themselves so a load failure counts
/// against the strategy that hit it, exactly like any drawing failure.
/// On success exactly one image exists at `dest`; on failure nothing was
/// written (strategies only save once all drawing succeeded).
pub trait RenderStrategy {
    /// Which strategy this is, for outcome tagging and logs.
    fn kind(&self) -> StrategyKind;

    /// Render `source` to a PNG at `dest`.
    fn render(&self, source: &Path, dest: &Path, options: &RenderOptions) -> PreviewResult<()>;
}

// Shared palette (steel blue family, matching the tool this replaces).
pub(crate) const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub(crate) const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub(crate) const STEEL_BLUE: [u8; 3] = [70, 130, 180];
pub(crate) const LIGHT_STEEL_BLUE: [u8; 3] = [176, 196, 222];
pub(crate) const DARK_BLUE: [u8; 3] = [0, 0, 139];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.width, 512);
        assert_eq!(options.height, 512);
        assert_eq!(options.fill_stride, 5);
        assert_eq!(options.margin, 50);
        assert_eq!(options.corner_fade_steps, 30);
    }

    #[test]
    fn test_with_size_keeps_presentation_defaults() {
        let options = RenderOptions::with_size(1024, 768);
        assert_eq!(options.width, 1024);
        assert_eq!(options.height, 768);
        assert_eq!(options.fill_stride, 5);
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(StrategyKind::Surface.label(), "3D surface");
        assert_eq!(StrategyKind::Wireframe.label(), "wireframe");
        assert_eq!(StrategyKind::BoundingBox.label(), "bounding box");
    }
}
