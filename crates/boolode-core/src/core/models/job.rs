use serde::{Deserialize, Serialize};

/// One entry of the `jobs` list: a model to simulate and how to sample it.
///
/// Only the keys present in the source document are written back on
/// serialization; the defaults for absent optional keys are applied later, when
/// the job is resolved into [`JobSettings`](crate::engine::config::JobSettings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// Identifier of the job, unique within the experiment.
    pub name: String,
    /// Filename of the Boolean model, relative to `model_dir`.
    pub model_definition: String,
    /// Filename of the initial-condition table, relative to `model_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_initial_conditions: Option<String>,
    /// Duration of simulated time.
    pub simulation_time: f64,
    /// Number of snapshot columns per cell. Absent or zero keeps the full trajectory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_snapshots: Option<u32>,
    /// Number of simulated trajectories.
    pub num_cells: u32,
    pub do_parallel: bool,
    #[serde(rename = "nClusters")]
    pub n_clusters: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_step_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_cells: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_protein: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize_trajectory: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_inputs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_strengths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_type: Option<String>,
}

impl Job {
    /// Creates a job with every optional key left unset.
    pub fn new(
        name: impl Into<String>,
        model_definition: impl Into<String>,
        simulation_time: f64,
        num_cells: u32,
    ) -> Self {
        Self {
            name: name.into(),
            model_definition: model_definition.into(),
            model_initial_conditions: None,
            simulation_time,
            n_snapshots: None,
            num_cells,
            do_parallel: false,
            n_clusters: 1,
            integration_step_size: None,
            sample_cells: None,
            write_protein: None,
            normalize_trajectory: None,
            parameter_inputs: None,
            parameter_set: None,
            interaction_strengths: None,
            species_type: None,
        }
    }

    pub fn with_initial_conditions(mut self, file: impl Into<String>) -> Self {
        self.model_initial_conditions = Some(file.into());
        self
    }

    pub fn with_snapshots(mut self, n: u32) -> Self {
        self.n_snapshots = Some(n);
        self
    }

    pub fn with_clusters(mut self, n: u32) -> Self {
        self.n_clusters = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.do_parallel = parallel;
        self
    }

    pub fn with_step_size(mut self, step: f64) -> Self {
        self.integration_step_size = Some(step);
        self
    }

    pub fn with_sample_cells(mut self, sample: bool) -> Self {
        self.sample_cells = Some(sample);
        self
    }

    /// The auxiliary input files named by this job, keyed by their configuration key.
    pub fn auxiliary_inputs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("parameter_inputs", self.parameter_inputs.as_deref()),
            ("parameter_set", self.parameter_set.as_deref()),
            ("interaction_strengths", self.interaction_strengths.as_deref()),
            ("species_type", self.species_type.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, file)| file.map(|f| (key, f)))
    }
}
