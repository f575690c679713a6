use serde::Serialize;
use std::path::PathBuf;

/// Seed offset added for every simulation attempt of a cell.
pub const ATTEMPT_SEED_STRIDE: u64 = 1000;

/// What the engine must do for one simulated cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellPlan {
    pub cell: u32,
    /// Seed of the first simulation attempt; see [`attempt_seed`].
    pub seed: u64,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_indices: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampled_output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_header: Option<String>,
}

/// Seed of simulation attempt `attempt` (1-based) of `cell`.
///
/// A simulation whose expression collapses to zero is retried with the next attempt.
pub fn attempt_seed(cell: u32, attempt: u32) -> u64 {
    cell as u64 + ATTEMPT_SEED_STRIDE * attempt as u64
}

/// Column of time point `time_index` of a full trajectory. Time point 0 is not reported.
pub fn trajectory_column(cell: u32, time_index: usize) -> String {
    format!("E{}_{}", cell, time_index)
}

pub fn snapshot_column(cell: u32, snapshot: usize) -> String {
    format!("E{}_t{}", cell, snapshot)
}
