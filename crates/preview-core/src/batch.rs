//! Directory-wide batch orchestration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::error::{PreviewError, PreviewResult};
use crate::io::is_stl_file;
use crate::pipeline::{PipelineOutcome, PreviewPipeline, RenderJob};
use crate::render::RenderOptions;

/// Counters for one batch run.
///
/// Each job increments exactly one of success/failure/skipped after its
/// outcome is known; counters are never decremented and are read once at
/// the end to decide the exit status.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStatistics {
    /// Number of qualifying files discovered.
    pub total: usize,

    /// Previews generated this run.
    pub success: usize,

    /// Files for which every strategy failed.
    pub failure: usize,

    /// Files whose preview already existed.
    pub skipped: usize,

    /// Wall-clock duration of the run in seconds.
    pub elapsed_seconds: f64,
}

impl RunStatistics {
    /// Fold one outcome into the counters.
    pub fn record(&mut self, outcome: &PipelineOutcome) {
        self.total += 1;
        match outcome {
            PipelineOutcome::Success(_) => self.success += 1,
            PipelineOutcome::Failure => self.failure += 1,
            PipelineOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Process exit status for this run: nonzero only when at least one
    /// file ended in failure. Skips are not failures, and a run that found
    /// nothing to do is a success.
    pub fn exit_code(&self) -> i32 {
        if self.failure > 0 {
            1
        } else {
            0
        }
    }
}

/// Runs the preview pipeline over every STL file under an input root.
pub struct BatchRunner {
    input_dir: PathBuf,
    output_dir: PathBuf,
    options: RenderOptions,
}

impl BatchRunner {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: RenderOptions,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            options,
        }
    }

    /// Process every discovered file sequentially and return the counters.
    ///
    /// Only environment errors outside the render cascade (an unreadable
    /// input tree, an uncreatable output directory) abort the run; per-file
    /// rendering problems are folded into the statistics.
    pub fn run(&self) -> PreviewResult<RunStatistics> {
        let started = Instant::now();
        let mut stats = RunStatistics::default();

        info!("Scanning for STL files in: {}", self.input_dir.display());
        let files = find_stl_files(&self.input_dir)?;

        if files.is_empty() {
            info!("No STL files found");
            stats.elapsed_seconds = started.elapsed().as_secs_f64();
            return Ok(stats);
        }

        info!("Found {} STL files", files.len());

        fs::create_dir_all(&self.output_dir).map_err(|e| PreviewError::OutputDir {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let pipeline = PreviewPipeline::new(self.options.clone());

        for file in files {
            let job = RenderJob::new(file, &self.output_dir);
            let outcome = pipeline.run(&job);
            stats.record(&outcome);
        }

        stats.elapsed_seconds = started.elapsed().as_secs_f64();

        info!("Processing summary:");
        info!("  Total files processed: {}", stats.total);
        info!("  Successfully generated: {}", stats.success);
        info!("  Failed to generate: {}", stats.failure);
        info!("  Skipped (existing): {}", stats.skipped);
        info!("  Time taken: {:.2} seconds", stats.elapsed_seconds);

        Ok(stats)
    }
}

/// Recursively collect every file with the STL extension (case-insensitive)
/// under `root`. Discovery order follows the directory iterator and is not
/// guaranteed to be deterministic.
pub fn find_stl_files(root: &Path) -> PreviewResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(root, &mut files)?;
    Ok(files)
}

fn visit(dir: &Path, out: &mut Vec<PathBuf>) -> PreviewResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| PreviewError::Scan {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| PreviewError::Scan {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            visit(&path, out)?;
        } else if is_stl_file(&path) {
            out.push(path);
        }
    }

    Ok(())
}
