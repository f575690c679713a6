use crate::core::models::experiment::ExperimentConfig;

/// The reference experiment: one Hill-type job and a single `GenSamples` step.
pub(crate) const MCAD_CONFIG: &str = r#"
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

post_processing:
  GenSamples:
    - sample_size: 500
      nDatasets: 1
#  DimRed:
#    - perplexity: 200
#  Dropouts:
#    - dropout: False
#      drop_cutoff: 0.5
#      drop_prob: 0.5
"#;

pub(crate) fn mcad_config() -> ExperimentConfig {
    ExperimentConfig::from_yaml_str(MCAD_CONFIG).expect("reference config must parse")
}
