use super::plan::ExperimentPlan;
use crate::engine::error::EngineError;
use crate::engine::plan::JobPlan;
use crate::engine::plan::post_processing::SampledDataset;
use crate::engine::progress::ProgressReporter;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

const MANIFEST_HEADER: &str = "cell";

/// What a preparation run changed on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub directories_created: usize,
    pub plans_written: usize,
    pub manifests_written: usize,
}

/// Creates every directory the plan refers to and writes the per-job run plans and
/// sample manifests. Running it twice leaves the same tree behind.
#[instrument(skip_all, name = "prepare_workflow")]
pub fn run(
    plan: &ExperimentPlan,
    reporter: &ProgressReporter,
) -> Result<PrepareSummary, EngineError> {
    let mut summary = PrepareSummary::default();

    reporter.phase("Preparing outputs", || {
        reporter.task(&plan.jobs, |job| prepare_job(job, &mut summary))
    })?;

    info!(
        "Prepared {} job(s): {} new director(ies), {} sample manifest(s).",
        summary.plans_written, summary.directories_created, summary.manifests_written
    );
    Ok(summary)
}

fn prepare_job(job: &JobPlan, summary: &mut PrepareSummary) -> Result<(), EngineError> {
    ensure_dir(&job.layout.out_prefix, summary)?;
    if job.simulate {
        ensure_dir(&job.layout.simulations_dir, summary)?;
    }

    for task in &job.post_processing {
        ensure_dir(task.directory(), summary)?;
        if let Some(dataset) = task.sampled_dataset() {
            if write_manifest(dataset)? {
                summary.manifests_written += 1;
            }
        }
    }

    write_run_plan(job, &job.layout.run_plan)?;
    summary.plans_written += 1;
    Ok(())
}

fn ensure_dir(path: &Path, summary: &mut PrepareSummary) -> Result<(), EngineError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| io_error(path, e))?;
    debug!("Created directory '{}'.", path.display());
    summary.directories_created += 1;
    Ok(())
}

fn write_run_plan(job: &JobPlan, path: &Path) -> Result<(), EngineError> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_yaml::to_writer(&mut writer, job).map_err(|source| EngineError::PlanOutput {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    writer.flush().map_err(|e| io_error(path, e))
}

/// Returns `false` when the dataset could not be sampled and has no manifest.
fn write_manifest(dataset: &SampledDataset) -> Result<bool, EngineError> {
    let (Some(path), Some(cells)) = (&dataset.manifest, &dataset.sampled_cells) else {
        return Ok(false);
    };
    let manifest_error = |source| EngineError::Manifest {
        path: path.to_string_lossy().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(manifest_error)?;
    writer.write_record([MANIFEST_HEADER]).map_err(manifest_error)?;
    for cell in cells {
        writer.write_record([cell]).map_err(manifest_error)?;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(true)
}

fn io_error(path: &Path, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    }
}
