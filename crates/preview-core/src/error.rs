//! Error types for preview generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for preview operations.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Errors that can occur while generating previews.
///
/// The pipeline never lets one of these cross a strategy boundary: each
/// render strategy catches its own error and the next strategy in the
/// cascade runs. The variant only feeds the log line.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Error reading a mesh file.
    #[error("failed to read mesh from {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing an STL file.
    #[error("failed to parse STL from {path}: {details}")]
    Parse { path: PathBuf, details: String },

    /// Mesh has no usable vertices or faces.
    #[error("mesh is empty: {path}")]
    EmptyMesh { path: PathBuf },

    /// Mesh bounds are degenerate for the attempted projection.
    #[error("degenerate geometry: {details}")]
    DegenerateGeometry { details: String },

    /// A drawing primitive could not execute.
    #[error("rendering failed: {details}")]
    Render { details: String },

    /// The embedded font could not be loaded.
    #[error("invalid embedded font: {details}")]
    Font { details: String },

    /// Error writing an image file.
    #[error("failed to write image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Error creating the output directory.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error scanning the input directory.
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
