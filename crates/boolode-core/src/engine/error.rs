use super::config::ConfigError;
use super::plan::PlanError;
use super::utils::sampling::SamplingError;
use super::validation::ValidationReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration is invalid:\n{0}")]
    Validation(ValidationReport),

    #[error("Job '{0}' not found in configuration")]
    JobNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Planning failed for job '{job}': {source}")]
    Plan { job: String, source: PlanError },

    #[error("Sampling failed for job '{job}': {source}")]
    Sampling { job: String, source: SamplingError },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write run plan '{path}': {source}")]
    PlanOutput {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to write sample manifest '{path}': {source}")]
    Manifest { path: String, source: csv::Error },
}
