//! Deterministic run plans.
//!
//! A [`JobPlan`] describes everything a simulation engine needs to reproduce a job
//! without re-reading the configuration: the time grid, per-cell seeds and snapshot
//! indices, the output file layout and the post-processing datasets. All random
//! choices are drawn from the generator handed to [`plan_job`] and
//! [`post_processing::plan_post_processing`], in that order.

pub mod cells;
pub mod layout;
pub mod post_processing;
pub mod snapshots;
pub mod time_grid;

use crate::engine::config::JobSettings;
use crate::engine::utils::sampling::{SamplingError, sample_time_indices};
use cells::{CellPlan, attempt_seed, snapshot_column, trajectory_column};
use layout::OutputLayout;
use post_processing::PostProcessingTask;
use rand::Rng;
use serde::Serialize;
use snapshots::{SnapshotWindow, draw_snapshot_indices, snapshot_windows};
use thiserror::Error;
use time_grid::TimeGrid;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Simulation time must be positive and finite, got {0}")]
    InvalidSimulationTime(f64),
    #[error("Integration step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),
    #[error(
        "Simulation time {simulation_time} with step {step} yields {n_points} time point(s); at least 2 are required"
    )]
    TooFewTimePoints {
        simulation_time: f64,
        step: f64,
        n_points: usize,
    },
    #[error(
        "Simulation time {simulation_time} with step {step} yields more than {max} time points"
    )]
    TooManyTimePoints {
        simulation_time: f64,
        step: f64,
        max: usize,
    },
    #[error("{num_cells} cell(s) with {columns_per_cell} column(s) each overflow the cell count")]
    TooManyCells { num_cells: u32, columns_per_cell: u64 },
    #[error(
        "Snapshot window {index} is empty: {n_snapshots} snapshots cannot be spread over {steps} integration steps"
    )]
    EmptySnapshotWindow {
        index: usize,
        n_snapshots: u32,
        steps: usize,
    },
    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPlan {
    pub settings: JobSettings,
    /// Whether the engine should run the simulations of this job.
    pub simulate: bool,
    pub time_grid: TimeGrid,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snapshot_windows: Vec<SnapshotWindow>,
    /// Whether whole trajectories are grouped by k-means after simulation.
    pub clustering: bool,
    /// Number of cell columns in the job's expression matrix.
    pub cells_produced: u64,
    pub layout: OutputLayout,
    pub cells: Vec<CellPlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub post_processing: Vec<PostProcessingTask>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl JobPlan {
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn columns_per_cell(&self) -> usize {
        if self.settings.uses_snapshots() {
            self.settings.n_snapshots as usize
        } else {
            self.time_grid.steps()
        }
    }

    /// Label of column `index` of `ExpressionData.csv`, counting cell by cell.
    pub fn column_label(&self, index: u64) -> Option<String> {
        let per_cell = self.columns_per_cell() as u64;
        if per_cell == 0 || index >= self.cells_produced {
            return None;
        }
        let cell = self.cells.get(usize::try_from(index / per_cell).ok()?)?.cell;
        let offset = (index % per_cell) as usize;
        Some(if self.settings.uses_snapshots() {
            snapshot_column(cell, offset)
        } else {
            trajectory_column(cell, offset + 1)
        })
    }
}

/// Derives the plan of one job. Post-processing tasks are attached separately.
pub fn plan_job(
    settings: JobSettings,
    simulate: bool,
    rng: &mut impl Rng,
) -> Result<JobPlan, PlanError> {
    let time_grid = TimeGrid::new(settings.simulation_time, settings.integration_step_size)?;
    let windows = snapshot_windows(time_grid.steps(), settings.n_snapshots)?;
    let columns_per_cell = if settings.uses_snapshots() {
        settings.n_snapshots as u64
    } else {
        time_grid.steps() as u64
    };
    let cells_produced = (settings.num_cells as u64)
        .checked_mul(columns_per_cell)
        .ok_or(PlanError::TooManyCells {
            num_cells: settings.num_cells,
            columns_per_cell,
        })?;
    let clustering = settings.clustering_enabled();
    let layout = OutputLayout::new(&settings.out_prefix, clustering);

    let mut cells: Vec<CellPlan> = (0..settings.num_cells)
        .map(|cell| CellPlan {
            cell,
            seed: attempt_seed(cell, 1),
            output: layout.simulation_file(cell),
            snapshot_indices: (!windows.is_empty()).then(|| draw_snapshot_indices(&windows, rng)),
            sampled_output: None,
            sample_header: None,
        })
        .collect();

    if settings.writes_sampled_cells() {
        let times = sample_time_indices(time_grid.n_points(), cells.len(), rng)?;
        for (cell, time) in cells.iter_mut().zip(times) {
            cell.sampled_output = Some(layout.sampled_cell_file(cell.cell));
            cell.sample_header = Some(trajectory_column(cell.cell, time));
        }
    }

    let mut warnings = Vec::new();
    if settings.uses_snapshots() && settings.n_clusters > 1 {
        warnings.push(format!(
            "nClusters = {} is ignored because n_snapshots = {}; clustering is skipped",
            settings.n_clusters, settings.n_snapshots
        ));
    }
    if settings.uses_snapshots() && settings.sample_cells {
        warnings.push("sample_cells is ignored when n_snapshots > 0".to_string());
    }

    debug!(
        "Planned job '{}': {} time point(s), {} snapshot window(s), {} cell column(s).",
        settings.name,
        time_grid.n_points(),
        windows.len(),
        cells_produced
    );

    Ok(JobPlan {
        cells_produced,
        settings,
        simulate,
        time_grid,
        snapshot_windows: windows,
        clustering,
        layout,
        cells,
        post_processing: Vec::new(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mcad_config;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reference_settings() -> JobSettings {
        let config = mcad_config();
        JobSettings::resolve(&config.global_settings, &config.jobs[0]).unwrap()
    }

    #[test]
    fn reference_job_keeps_full_trajectories_and_clusters() {
        let plan = plan_job(reference_settings(), true, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(plan.time_grid.n_points(), 500);
        assert!(plan.snapshot_windows.is_empty());
        assert!(plan.clustering);
        assert!(plan.layout.cluster_ids.is_some());
        assert_eq!(plan.cells.len(), 5);
        assert_eq!(plan.cells_produced, 5 * 499);
        assert_eq!(plan.column_label(0).as_deref(), Some("E0_1"));
        assert_eq!(plan.column_label(4 * 499).as_deref(), Some("E4_1"));
        assert_eq!(plan.column_label(5 * 499 - 1).as_deref(), Some("E4_499"));
        assert_eq!(plan.column_label(5 * 499), None);
        assert_eq!(plan.cells[4].seed, 1004);
        assert!(plan.cells.iter().all(|c| c.snapshot_indices.is_none()));
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn snapshot_job_draws_one_index_per_window() {
        let mut settings = reference_settings();
        settings.n_snapshots = 5;
        let plan = plan_job(settings, true, &mut StdRng::seed_from_u64(9)).unwrap();

        assert!(!plan.clustering);
        assert_eq!(plan.snapshot_windows.len(), 5);
        assert_eq!(plan.cells_produced, 25);
        let second: Vec<_> = (5..10).filter_map(|i| plan.column_label(i)).collect();
        assert_eq!(second, vec!["E1_t0", "E1_t1", "E1_t2", "E1_t3", "E1_t4"]);
        for cell in &plan.cells {
            let indices = cell.snapshot_indices.as_ref().unwrap();
            assert_eq!(indices.len(), 5);
            assert!(
                indices
                    .iter()
                    .zip(&plan.snapshot_windows)
                    .all(|(&i, w)| w.contains(i))
            );
        }
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn same_seed_gives_identical_plans() {
        let mut settings = reference_settings();
        settings.n_snapshots = 8;
        let a = plan_job(settings.clone(), true, &mut StdRng::seed_from_u64(123)).unwrap();
        let b = plan_job(settings, true, &mut StdRng::seed_from_u64(123)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sampled_cells_get_a_header_and_file() {
        let mut settings = reference_settings();
        settings.sample_cells = true;
        let plan = plan_job(settings, true, &mut StdRng::seed_from_u64(1)).unwrap();

        for cell in &plan.cells {
            let header = cell.sample_header.as_deref().unwrap();
            let time: usize = header
                .strip_prefix(&format!("E{}_", cell.cell))
                .unwrap()
                .parse()
                .unwrap();
            assert!(time < 500);
            assert_eq!(
                cell.sampled_output.as_ref().unwrap(),
                &plan.layout.sampled_cell_file(cell.cell)
            );
        }
    }

    #[test]
    fn too_many_snapshots_fail_planning() {
        let mut settings = reference_settings();
        settings.n_snapshots = 500;
        assert!(matches!(
            plan_job(settings, true, &mut StdRng::seed_from_u64(0)),
            Err(PlanError::EmptySnapshotWindow { .. })
        ));
    }

    #[test]
    fn large_jobs_are_planned_without_per_column_state() {
        let mut settings = reference_settings();
        settings.simulation_time = 1000.0;
        settings.integration_step_size = 0.001;
        settings.num_cells = 1000;
        let plan = plan_job(settings, true, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(plan.cells.len(), 1000);
        assert!(plan.cells_produced > 900_000_000);
        let last = plan.column_label(plan.cells_produced - 1).unwrap();
        assert!(last.starts_with("E999_"));
    }
}
