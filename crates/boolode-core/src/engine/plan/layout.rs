use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SIMULATIONS_DIR: &str = "simulations";
pub const EXPRESSION_DATA_FILE: &str = "ExpressionData.csv";
pub const PSEUDOTIME_FILE: &str = "PseudoTime.csv";
pub const REF_NETWORK_FILE: &str = "refNetwork.csv";
pub const CLUSTER_IDS_FILE: &str = "ClusterIds.csv";
pub const RUN_PLAN_FILE: &str = "run_plan.yaml";
pub const SAMPLE_MANIFEST_FILE: &str = "sampled_cells.csv";

/// Where a job's simulation engine is expected to write its artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLayout {
    pub out_prefix: PathBuf,
    pub simulations_dir: PathBuf,
    pub expression_data: PathBuf,
    pub pseudotime: PathBuf,
    pub ref_network: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_ids: Option<PathBuf>,
    pub run_plan: PathBuf,
}

impl OutputLayout {
    pub fn new(out_prefix: &Path, clustering: bool) -> Self {
        Self {
            out_prefix: out_prefix.to_path_buf(),
            simulations_dir: out_prefix.join(SIMULATIONS_DIR),
            expression_data: out_prefix.join(EXPRESSION_DATA_FILE),
            pseudotime: out_prefix.join(PSEUDOTIME_FILE),
            ref_network: out_prefix.join(REF_NETWORK_FILE),
            cluster_ids: clustering.then(|| out_prefix.join(CLUSTER_IDS_FILE)),
            run_plan: out_prefix.join(RUN_PLAN_FILE),
        }
    }

    pub fn simulation_file(&self, cell: u32) -> PathBuf {
        self.simulations_dir.join(format!("E{}.csv", cell))
    }

    pub fn sampled_cell_file(&self, cell: u32) -> PathBuf {
        self.simulations_dir.join(format!("E{}-cell.csv", cell))
    }

    /// Directories that must exist before the engine starts writing.
    pub fn directories(&self) -> [&Path; 2] {
        [&self.out_prefix, &self.simulations_dir]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_job_prefix() {
        let prefix = Path::new("Curated").join("mCAD");
        let layout = OutputLayout::new(&prefix, true);

        assert_eq!(layout.simulations_dir, prefix.join("simulations"));
        assert_eq!(layout.expression_data, prefix.join("ExpressionData.csv"));
        assert_eq!(layout.cluster_ids, Some(prefix.join("ClusterIds.csv")));
        assert_eq!(
            layout.simulation_file(3),
            prefix.join("simulations").join("E3.csv")
        );
        assert_eq!(
            layout.sampled_cell_file(0),
            prefix.join("simulations").join("E0-cell.csv")
        );
    }

    #[test]
    fn cluster_file_only_when_clustering() {
        let layout = OutputLayout::new(Path::new("out/job"), false);
        assert_eq!(layout.cluster_ids, None);
    }
}
