//! Per-file orchestration of the render strategy cascade.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::render::{
    BoundingBoxRender, RenderOptions, RenderStrategy, StrategyKind, SurfaceRender, WireframeRender,
};

/// One unit of work: a source STL file and its destination image path.
///
/// The destination is deterministic: the source base name with the
/// extension replaced by `.png`, placed flat in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl RenderJob {
    /// Build the job for `source`, deriving the destination inside
    /// `output_dir`.
    pub fn new(source: impl Into<PathBuf>, output_dir: &Path) -> Self {
        let source = source.into();
        let stem = source
            .file_stem()
            .unwrap_or_else(|| OsStr::new("preview"))
            .to_os_string();
        let mut name = stem;
        name.push(".png");
        let dest = output_dir.join(name);
        Self { source, dest }
    }
}

/// Final outcome of running the pipeline for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// A strategy produced the preview.
    Success(StrategyKind),

    /// Every strategy failed; no image exists at the destination.
    Failure,

    /// The destination already existed; nothing was attempted.
    Skipped,
}

/// Tries each render strategy in order until one succeeds.
///
/// The default pipeline holds the fixed trio surface → wireframe →
/// bounding box; membership and order are a design constant, not a
/// registration mechanism. Tests inject their own strategies through
/// [`PreviewPipeline::with_strategies`] to observe ordering.
pub struct PreviewPipeline {
    strategies: Vec<Box<dyn RenderStrategy>>,
    options: RenderOptions,
}

impl PreviewPipeline {
    /// Pipeline with the standard three-tier cascade.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_strategies(
            vec![
                Box::new(SurfaceRender),
                Box::new(WireframeRender),
                Box::new(BoundingBoxRender),
            ],
            options,
        )
    }

    /// Pipeline over a caller-supplied strategy sequence.
    pub fn with_strategies(strategies: Vec<Box<dyn RenderStrategy>>, options: RenderOptions) -> Self {
        Self { strategies, options }
    }

    /// Run the cascade for one job.
    ///
    /// Existing destinations are treated as immutable: the job is skipped
    /// without loading the mesh and never overwritten. Errors never
    /// propagate out of this method; failure is a returned outcome.
    pub fn run(&self, job: &RenderJob) -> PipelineOutcome {
        let display_name = job
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| job.source.display().to_string());

        if job.dest.exists() {
            info!("Preview already exists, skipping: {display_name}");
            return PipelineOutcome::Skipped;
        }

        for strategy in &self.strategies {
            let kind = strategy.kind();
            info!("Attempting {kind} preview for: {display_name}");

            match strategy.render(&job.source, &job.dest, &self.options) {
                Ok(()) => {
                    info!("{kind} preview generated successfully: {display_name}");
                    return PipelineOutcome::Success(kind);
                }
                Err(e) => {
                    warn!("{kind} rendering failed for {display_name}: {e}");
                }
            }
        }

        warn!("All rendering strategies failed for: {display_name}");
        PipelineOutcome::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PreviewError, PreviewResult};
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;

    /// Records every invocation and succeeds or fails on command.
    struct ScriptedStrategy {
        kind: StrategyKind,
        succeed: bool,
        calls: Rc<RefCell<Vec<StrategyKind>>>,
    }

    impl RenderStrategy for ScriptedStrategy {
        fn kind(&self) -> StrategyKind {
            self.kind
        }

        fn render(
            &self,
            _source: &std::path::Path,
            dest: &std::path::Path,
            _options: &RenderOptions,
        ) -> PreviewResult<()> {
            self.calls.borrow_mut().push(self.kind);
            if self.succeed {
                fs::write(dest, b"png").unwrap();
                Ok(())
            } else {
                Err(PreviewError::Render {
                    details: "scripted failure".to_string(),
                })
            }
        }
    }

    fn scripted_pipeline(
        plan: &[(StrategyKind, bool)],
    ) -> (PreviewPipeline, Rc<RefCell<Vec<StrategyKind>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let strategies: Vec<Box<dyn RenderStrategy>> = plan
            .iter()
            .map(|&(kind, succeed)| {
                Box::new(ScriptedStrategy {
                    kind,
                    succeed,
                    calls: Rc::clone(&calls),
                }) as Box<dyn RenderStrategy>
            })
            .collect();
        (
            PreviewPipeline::with_strategies(strategies, RenderOptions::default()),
            calls,
        )
    }

    fn standard_plan(surface: bool, wireframe: bool, bbox: bool) -> Vec<(StrategyKind, bool)> {
        vec![
            (StrategyKind::Surface, surface),
            (StrategyKind::Wireframe, wireframe),
            (StrategyKind::BoundingBox, bbox),
        ]
    }

    fn job_in(dir: &std::path::Path) -> RenderJob {
        RenderJob::new(dir.join("part.stl"), dir)
    }

    #[test]
    fn test_job_destination_derivation() {
        let job = RenderJob::new("/meshes/deep/nested/widget.STL", std::path::Path::new("/out"));
        assert_eq!(job.dest, PathBuf::from("/out/widget.png"));
    }

    #[test]
    fn test_job_destination_keeps_inner_dots() {
        let job = RenderJob::new("/meshes/part.v2.stl", std::path::Path::new("/out"));
        assert_eq!(job.dest, PathBuf::from("/out/part.v2.png"));
    }

    #[test]
    fn test_first_success_stops_cascade() {
        let dir = tempdir().unwrap();
        let (pipeline, calls) = scripted_pipeline(&standard_plan(true, true, true));

        let outcome = pipeline.run(&job_in(dir.path()));

        assert_eq!(outcome, PipelineOutcome::Success(StrategyKind::Surface));
        assert_eq!(*calls.borrow(), vec![StrategyKind::Surface]);
    }

    #[test]
    fn test_fallback_preserves_order() {
        let dir = tempdir().unwrap();
        let (pipeline, calls) = scripted_pipeline(&standard_plan(false, true, true));

        let outcome = pipeline.run(&job_in(dir.path()));

        assert_eq!(outcome, PipelineOutcome::Success(StrategyKind::Wireframe));
        assert_eq!(
            *calls.borrow(),
            vec![StrategyKind::Surface, StrategyKind::Wireframe]
        );
    }

    #[test]
    fn test_all_strategies_fail() {
        let dir = tempdir().unwrap();
        let (pipeline, calls) = scripted_pipeline(&standard_plan(false, false, false));
        let job = job_in(dir.path());

        let outcome = pipeline.run(&job);

        assert_eq!(outcome, PipelineOutcome::Failure);
        assert_eq!(
            *calls.borrow(),
            vec![
                StrategyKind::Surface,
                StrategyKind::Wireframe,
                StrategyKind::BoundingBox
            ]
        );
        assert!(!job.dest.exists());
    }

    #[test]
    fn test_existing_destination_is_skipped() {
        let dir = tempdir().unwrap();
        let job = job_in(dir.path());
        fs::write(&job.dest, b"existing").unwrap();

        let (pipeline, calls) = scripted_pipeline(&standard_plan(true, true, true));
        let outcome = pipeline.run(&job);

        assert_eq!(outcome, PipelineOutcome::Skipped);
        assert!(calls.borrow().is_empty(), "no strategy may run on skip");
        assert_eq!(fs::read(&job.dest).unwrap(), b"existing");
    }
}
