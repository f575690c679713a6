use super::job::Job;
use super::post_processing::PostProcessing;
use super::settings::GlobalSettings;
use crate::core::io::format::{ConfigFormat, ConfigIoError};
use crate::core::io::toml::{TomlError, TomlFile};
use crate::core::io::traits::ConfigFile;
use crate::core::io::yaml::{YamlError, YamlFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete experiment document.
///
/// All three sections are required. Job order is the order of the source document
/// and is preserved through every operation of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    pub global_settings: GlobalSettings,
    pub jobs: Vec<Job>,
    pub post_processing: PostProcessing,
}

impl ExperimentConfig {
    pub fn new(global_settings: GlobalSettings) -> Self {
        Self {
            global_settings,
            jobs: Vec::new(),
            post_processing: PostProcessing::default(),
        }
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn with_post_processing(mut self, post_processing: PostProcessing) -> Self {
        self.post_processing = post_processing;
        self
    }

    /// Loads a document, choosing the codec from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let path = path.as_ref();
        match ConfigFormat::from_path(path)? {
            ConfigFormat::Yaml => {
                YamlFile::read_from_path(path).map_err(|source| ConfigIoError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            ConfigFormat::Toml => {
                TomlFile::read_from_path(path).map_err(|source| ConfigIoError::Toml {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Writes the document, choosing the codec from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let path = path.as_ref();
        match ConfigFormat::from_path(path)? {
            ConfigFormat::Yaml => {
                YamlFile::write_to_path(self, path).map_err(|source| ConfigIoError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            ConfigFormat::Toml => {
                TomlFile::write_to_path(self, path).map_err(|source| ConfigIoError::Toml {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, YamlError> {
        YamlFile::read_from(&mut text.as_bytes())
    }

    pub fn to_yaml_string(&self) -> Result<String, YamlError> {
        YamlFile::write_to_string(self)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, TomlError> {
        TomlFile::read_from(&mut text.as_bytes())
    }

    pub fn to_toml_string(&self) -> Result<String, TomlError> {
        TomlFile::write_to_string(self)
    }

    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.name == name)
    }

    pub fn job_mut(&mut self, name: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.name == name)
    }

    pub fn job_names(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|j| j.name.as_str())
    }
}
