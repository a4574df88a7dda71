//! Batch STL preview generation with a three-tier rendering fallback.
//!
//! This crate turns directories of STL files into PNG preview images. For
//! each file it tries three rendering strategies of decreasing fidelity:
//!
//! 1. **Surface** — shaded 3D view from a fixed isometric-style viewpoint
//! 2. **Wireframe** — oblique 2D projection of every triangle edge
//! 3. **Bounding box** — schematic card with the mesh's statistics
//!
//! The first strategy that succeeds wins; a failure in any strategy
//! (unparseable file, degenerate geometry, drawing error) silently cascades
//! to the next. Only when all three fail does a file count as failed.
//!
//! # Example
//!
//! ```no_run
//! use preview_core::{BatchRunner, RenderOptions};
//!
//! let runner = BatchRunner::new("models/", "previews/", RenderOptions::default());
//! let stats = runner.run().unwrap();
//! println!("{} generated, {} failed", stats.success, stats.failure);
//! std::process::exit(stats.exit_code());
//! ```

mod error;

pub mod batch;
pub mod io;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod render;

// Re-export core types at crate root
pub use batch::{find_stl_files, BatchRunner, RunStatistics};
pub use error::{PreviewError, PreviewResult};
pub use mesh::Mesh;
pub use pipeline::{PipelineOutcome, PreviewPipeline, RenderJob};
pub use render::{
    BoundingBoxRender, RenderOptions, RenderStrategy, StrategyKind, SurfaceRender, WireframeRender,
};
