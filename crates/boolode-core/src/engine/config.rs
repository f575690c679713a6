use crate::core::models::job::Job;
use crate::core::models::settings::{GlobalSettings, ModelType};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Values used for the optional job keys that a document leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDefaults {
    pub integration_step_size: f64,
    pub n_snapshots: u32,
    pub sample_cells: bool,
    pub write_protein: bool,
    pub normalize_trajectory: bool,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            integration_step_size: 0.01,
            n_snapshots: 0,
            sample_cells: false,
            write_protein: false,
            normalize_trajectory: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Parallel,
    Sequential,
}

impl From<bool> for ExecutionMode {
    fn from(do_parallel: bool) -> Self {
        if do_parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }
}

/// Optional tables that refine the generated model, resolved against `model_dir`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuxiliaryInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_inputs: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_set: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_strengths: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_type: Option<PathBuf>,
}

impl AuxiliaryInputs {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("parameter_inputs", self.parameter_inputs.as_deref()),
            ("parameter_set", self.parameter_set.as_deref()),
            ("interaction_strengths", self.interaction_strengths.as_deref()),
            ("species_type", self.species_type.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, path)| path.map(|p| (key, p)))
    }
}

/// The fully resolved settings of one job: every path joined, every default applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSettings {
    pub name: String,
    pub model_type: ModelType,
    pub model_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ics_path: Option<PathBuf>,
    /// Directory receiving everything this job writes.
    pub out_prefix: PathBuf,
    pub simulation_time: f64,
    pub integration_step_size: f64,
    pub n_snapshots: u32,
    pub num_cells: u32,
    pub execution: ExecutionMode,
    pub n_clusters: u32,
    pub sample_cells: bool,
    pub write_protein: bool,
    pub normalize_trajectory: bool,
    pub auxiliary: AuxiliaryInputs,
}

impl JobSettings {
    pub fn resolve(global: &GlobalSettings, job: &Job) -> Result<Self, ConfigError> {
        Self::resolve_with(global, job, &JobDefaults::default())
    }

    pub fn resolve_with(
        global: &GlobalSettings,
        job: &Job,
        defaults: &JobDefaults,
    ) -> Result<Self, ConfigError> {
        let model_dir = global.model_dir_path();
        let in_model_dir = |file: &Option<String>| file.as_ref().map(|f| model_dir.join(f));

        JobSettingsBuilder::new()
            .name(job.name.clone())
            .model_type(global.modeltype)
            .model_path(model_dir.join(&job.model_definition))
            .ics_path(in_model_dir(&job.model_initial_conditions))
            .out_prefix(global.output_dir_path().join(&job.name))
            .simulation_time(job.simulation_time)
            .integration_step_size(
                job.integration_step_size
                    .unwrap_or(defaults.integration_step_size),
            )
            .n_snapshots(job.n_snapshots.unwrap_or(defaults.n_snapshots))
            .num_cells(job.num_cells)
            .execution(job.do_parallel.into())
            .n_clusters(job.n_clusters)
            .sample_cells(job.sample_cells.unwrap_or(defaults.sample_cells))
            .write_protein(job.write_protein.unwrap_or(defaults.write_protein))
            .normalize_trajectory(
                job.normalize_trajectory
                    .unwrap_or(defaults.normalize_trajectory),
            )
            .auxiliary(AuxiliaryInputs {
                parameter_inputs: in_model_dir(&job.parameter_inputs),
                parameter_set: in_model_dir(&job.parameter_set),
                interaction_strengths: in_model_dir(&job.interaction_strengths),
                species_type: in_model_dir(&job.species_type),
            })
            .build()
    }

    pub fn uses_snapshots(&self) -> bool {
        self.n_snapshots > 0
    }

    /// k-means over whole trajectories only makes sense without snapshot sampling.
    pub fn clustering_enabled(&self) -> bool {
        self.n_clusters > 1 && !self.uses_snapshots()
    }

    /// Per-cell sampling writes one extra file per simulation.
    pub fn writes_sampled_cells(&self) -> bool {
        self.sample_cells && !self.uses_snapshots()
    }
}

#[derive(Default)]
pub struct JobSettingsBuilder {
    name: Option<String>,
    model_type: Option<ModelType>,
    model_path: Option<PathBuf>,
    ics_path: Option<PathBuf>,
    out_prefix: Option<PathBuf>,
    simulation_time: Option<f64>,
    integration_step_size: Option<f64>,
    n_snapshots: Option<u32>,
    num_cells: Option<u32>,
    execution: Option<ExecutionMode>,
    n_clusters: Option<u32>,
    sample_cells: bool,
    write_protein: bool,
    normalize_trajectory: bool,
    auxiliary: AuxiliaryInputs,
}

impl JobSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn model_type(mut self, model_type: ModelType) -> Self {
        self.model_type = Some(model_type);
        self
    }
    pub fn model_path(mut self, path: PathBuf) -> Self {
        self.model_path = Some(path);
        self
    }
    pub fn ics_path(mut self, path: Option<PathBuf>) -> Self {
        self.ics_path = path;
        self
    }
    pub fn out_prefix(mut self, path: PathBuf) -> Self {
        self.out_prefix = Some(path);
        self
    }
    pub fn simulation_time(mut self, time: f64) -> Self {
        self.simulation_time = Some(time);
        self
    }
    pub fn integration_step_size(mut self, step: f64) -> Self {
        self.integration_step_size = Some(step);
        self
    }
    pub fn n_snapshots(mut self, n: u32) -> Self {
        self.n_snapshots = Some(n);
        self
    }
    pub fn num_cells(mut self, n: u32) -> Self {
        self.num_cells = Some(n);
        self
    }
    pub fn execution(mut self, mode: ExecutionMode) -> Self {
        self.execution = Some(mode);
        self
    }
    pub fn n_clusters(mut self, n: u32) -> Self {
        self.n_clusters = Some(n);
        self
    }
    pub fn sample_cells(mut self, sample: bool) -> Self {
        self.sample_cells = sample;
        self
    }
    pub fn write_protein(mut self, write: bool) -> Self {
        self.write_protein = write;
        self
    }
    pub fn normalize_trajectory(mut self, normalize: bool) -> Self {
        self.normalize_trajectory = normalize;
        self
    }
    pub fn auxiliary(mut self, auxiliary: AuxiliaryInputs) -> Self {
        self.auxiliary = auxiliary;
        self
    }

    pub fn build(self) -> Result<JobSettings, ConfigError> {
        Ok(JobSettings {
            name: self.name.ok_or(ConfigError::MissingParameter("name"))?,
            model_type: self
                .model_type
                .ok_or(ConfigError::MissingParameter("model_type"))?,
            model_path: self
                .model_path
                .ok_or(ConfigError::MissingParameter("model_path"))?,
            ics_path: self.ics_path,
            out_prefix: self
                .out_prefix
                .ok_or(ConfigError::MissingParameter("out_prefix"))?,
            simulation_time: self
                .simulation_time
                .ok_or(ConfigError::MissingParameter("simulation_time"))?,
            integration_step_size: self
                .integration_step_size
                .ok_or(ConfigError::MissingParameter("integration_step_size"))?,
            n_snapshots: self.n_snapshots.unwrap_or_default(),
            num_cells: self
                .num_cells
                .ok_or(ConfigError::MissingParameter("num_cells"))?,
            execution: self.execution.unwrap_or(ExecutionMode::Sequential),
            n_clusters: self.n_clusters.unwrap_or(1),
            sample_cells: self.sample_cells,
            write_protein: self.write_protein,
            normalize_trajectory: self.normalize_trajectory,
            auxiliary: self.auxiliary,
        })
    }
}
