use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use boolode::core::models::experiment::ExperimentConfig;
use boolode::core::models::job::Job;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Loads the configuration named on the command line and applies its `-S` overrides.
pub fn load(args: &ConfigArgs) -> Result<ExperimentConfig> {
    let mut config = load_file(&args.config)?;
    apply_set_values(&mut config, &args.set_values)?;
    Ok(config)
}

pub fn load_file(path: &Path) -> Result<ExperimentConfig> {
    debug!("Loading experiment configuration from file: {:?}", path);
    ExperimentConfig::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn apply_set_values(config: &mut ExperimentConfig, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let (key, value) = (key.trim(), value.trim());
        debug!("Applying override {} = {}", key, value);

        if let Some(field) = key.strip_prefix("global_settings.") {
            set_global(config, key, field, value)?;
        } else if let Some(rest) = key.strip_prefix("jobs.") {
            let Some((name, field)) = rest.rsplit_once('.') else {
                return Err(CliError::Config(format!(
                    "Invalid job key for --set: '{}'. Expected jobs.<name>.<field>.",
                    key
                )));
            };
            let job = config.job_mut(name).ok_or_else(|| {
                CliError::Config(format!("Job '{}' not found for --set key '{}'", name, key))
            })?;
            set_job(job, key, field, value)?;
        } else {
            return Err(unsupported(key));
        }
    }
    Ok(())
}

fn set_global(config: &mut ExperimentConfig, key: &str, field: &str, value: &str) -> Result<()> {
    let global = &mut config.global_settings;
    match field {
        "model_dir" => global.model_dir = value.to_string(),
        "output_dir" => global.output_dir = value.to_string(),
        "do_simulations" => global.do_simulations = parse_bool(key, value)?,
        "do_post_processing" => global.do_post_processing = parse_bool(key, value)?,
        "modeltype" => {
            global.modeltype = value
                .parse()
                .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?
        }
        _ => return Err(unsupported(key)),
    }
    Ok(())
}

fn set_job(job: &mut Job, key: &str, field: &str, value: &str) -> Result<()> {
    match field {
        "model_definition" => job.model_definition = value.to_string(),
        "model_initial_conditions" => job.model_initial_conditions = optional_file(value),
        "simulation_time" => job.simulation_time = parse(key, value, "float")?,
        "n_snapshots" => job.n_snapshots = Some(parse(key, value, "integer")?),
        "num_cells" => job.num_cells = parse(key, value, "integer")?,
        "do_parallel" => job.do_parallel = parse_bool(key, value)?,
        "nClusters" => job.n_clusters = parse(key, value, "integer")?,
        "integration_step_size" => job.integration_step_size = Some(parse(key, value, "float")?),
        "sample_cells" => job.sample_cells = Some(parse_bool(key, value)?),
        "write_protein" => job.write_protein = Some(parse_bool(key, value)?),
        "normalize_trajectory" => job.normalize_trajectory = Some(parse_bool(key, value)?),
        "parameter_inputs" => job.parameter_inputs = optional_file(value),
        "parameter_set" => job.parameter_set = optional_file(value),
        "interaction_strengths" => job.interaction_strengths = optional_file(value),
        "species_type" => job.species_type = optional_file(value),
        _ => return Err(unsupported(key)),
    }
    Ok(())
}

fn parse<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

/// Accepts the spellings YAML documents use: `true`, `True`, `TRUE` and the `false` forms.
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    parse(key, &value.to_ascii_lowercase(), "boolean")
}

/// An empty value unsets an optional file.
fn optional_file(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn unsupported(key: &str) -> CliError {
    CliError::Config(format!("Unsupported configuration key for --set: '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boolode::core::models::settings::ModelType;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    const CONFIG: &str = r#"
global_settings:
  model_dir: "data"
  output_dir: "Curated"
  do_simulations: True
  do_post_processing: True
  modeltype: 'hill'

jobs:
  - name: "mCAD"
    model_definition: "mCAD.txt"
    model_initial_conditions: "mCAD_ics.txt"
    simulation_time: 5
    num_cells: 5
    do_parallel: True
    nClusters: 2
  - name: "dyn.BF"
    model_definition: "dyn-BF.txt"
    simulation_time: 8
    num_cells: 100
    do_parallel: False
    nClusters: 1

post_processing:
  GenSamples:
    - sample_size: 500
      nDatasets: 1
"#;

    static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
        let path = TEST_DIR.path().join("config.yaml");
        fs::write(&path, CONFIG).expect("Failed to write test config");
        path
    });

    fn args(set_values: &[&str]) -> ConfigArgs {
        ConfigArgs {
            config: CONFIG_PATH.clone(),
            set_values: set_values.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn loads_file_without_overrides() {
        let config = load(&args(&[])).unwrap();
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.global_settings.modeltype, ModelType::Hill);
    }

    #[test]
    fn overrides_global_and_job_values() {
        let config = load(&args(&[
            "global_settings.output_dir=out",
            "global_settings.modeltype=heaviside",
            "global_settings.do_post_processing=False",
            "jobs.mCAD.num_cells=50",
            "jobs.mCAD.n_snapshots=4",
            "jobs.dyn.BF.integration_step_size=0.1",
            "jobs.mCAD.model_initial_conditions=",
        ]))
        .unwrap();

        assert_eq!(config.global_settings.output_dir, "out");
        assert_eq!(config.global_settings.modeltype, ModelType::Heaviside);
        assert!(!config.global_settings.do_post_processing);
        let mcad = config.job("mCAD").unwrap();
        assert_eq!(mcad.num_cells, 50);
        assert_eq!(mcad.n_snapshots, Some(4));
        assert_eq!(mcad.model_initial_conditions, None);
        assert_eq!(config.job("dyn.BF").unwrap().integration_step_size, Some(0.1));
    }

    #[test]
    fn rejects_malformed_overrides() {
        for bad in [
            "global_settings.output_dir",
            "global_settings.verbose=true",
            "jobs.mCAD.num_cells=-3",
            "jobs.missing.num_cells=3",
            "jobs.mCAD",
            "global_settings.modeltype=boolean",
            "seed=3",
        ] {
            assert!(
                matches!(load(&args(&[bad])), Err(CliError::Config(_))),
                "override '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn missing_file_is_a_parsing_error() {
        let path = TEST_DIR.path().join("absent.yaml");
        assert!(matches!(
            load_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
