use super::JobPlan;
use super::layout::{EXPRESSION_DATA_FILE, SAMPLE_MANIFEST_FILE};
use crate::core::models::post_processing::PostProcessing;
use crate::engine::utils::sampling::{SamplingError, sample_cell_indices};
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One dataset of cells sampled from a job's expression matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledDataset {
    pub sample_size: u32,
    /// 1-based index of the dataset among the `nDatasets` of its record.
    pub dataset: u32,
    pub directory: PathBuf,
    pub expression_data: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    #[serde(skip_serializing)]
    pub sampled_cells: Option<Vec<String>>,
}

impl SampledDataset {
    fn new(
        directory: PathBuf,
        sample_size: u32,
        dataset: u32,
        cells: Option<Vec<String>>,
    ) -> Self {
        Self {
            sample_size,
            dataset,
            expression_data: directory.join(EXPRESSION_DATA_FILE),
            manifest: cells.as_ref().map(|_| directory.join(SAMPLE_MANIFEST_FILE)),
            directory,
            sampled_cells: cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step")]
pub enum PostProcessingTask {
    GenSamples(SampledDataset),
    Dropouts {
        drop_cutoff: f64,
        drop_prob: f64,
        #[serde(flatten)]
        dataset: SampledDataset,
    },
    DimRed {
        perplexity: u32,
        directory: PathBuf,
    },
    Slingshot {
        perplexity: u32,
        directory: PathBuf,
    },
}

impl PostProcessingTask {
    pub fn directory(&self) -> &Path {
        match self {
            PostProcessingTask::GenSamples(dataset)
            | PostProcessingTask::Dropouts { dataset, .. } => &dataset.directory,
            PostProcessingTask::DimRed { directory, .. }
            | PostProcessingTask::Slingshot { directory, .. } => directory,
        }
    }

    pub fn sampled_dataset(&self) -> Option<&SampledDataset> {
        match self {
            PostProcessingTask::GenSamples(dataset)
            | PostProcessingTask::Dropouts { dataset, .. } => Some(dataset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostProcessingPlan {
    pub tasks: Vec<PostProcessingTask>,
    pub warnings: Vec<String>,
}

pub fn dataset_dir_name(job: &str, sample_size: u32, dataset: u32) -> String {
    format!("{}-{}-{}", job, sample_size, dataset)
}

pub fn dropout_dir_name(base: &str, drop_cutoff: f64, drop_prob: f64) -> String {
    format!("{}-{}-{}", base, drop_cutoff, drop_prob)
}

/// Expands the `post_processing` section into concrete tasks for one job.
///
/// Sampled datasets go directly under `output_dir`; every active `Dropouts` record
/// is applied to each of them. `DimRed` and `Slingshot` write under the job prefix.
/// A sample larger than the job's cell count is planned without a manifest and
/// reported as a warning.
pub fn plan_post_processing(
    job: &JobPlan,
    post: &PostProcessing,
    output_dir: &Path,
    rng: &mut impl Rng,
) -> Result<PostProcessingPlan, SamplingError> {
    let mut plan = PostProcessingPlan::default();
    let mut datasets = Vec::new();

    let population = job.cells_produced;
    for record in post.gen_samples() {
        for d in 1..=record.n_datasets {
            let size = record.sample_size as usize;
            let cells = if record.sample_size as u64 > population {
                plan.warnings.push(format!(
                    "GenSamples sample_size {} exceeds the {} cells produced by job '{}'; dataset {} is not sampled",
                    record.sample_size,
                    population,
                    job.name(),
                    d
                ));
                None
            } else {
                let picked = sample_cell_indices(population, size, rng)?;
                Some(
                    picked
                        .into_iter()
                        .filter_map(|i| job.column_label(i))
                        .collect(),
                )
            };
            let name = dataset_dir_name(job.name(), record.sample_size, d);
            let dataset =
                SampledDataset::new(output_dir.join(&name), record.sample_size, d, cells);
            datasets.push((name, dataset));
        }
    }

    plan.tasks.extend(
        datasets
            .iter()
            .map(|(_, dataset)| PostProcessingTask::GenSamples(dataset.clone())),
    );

    let active_dropouts: Vec<_> = post.active_dropouts().collect();
    if !active_dropouts.is_empty() && datasets.is_empty() {
        plan.warnings.push(format!(
            "Dropouts is active but job '{}' has no GenSamples dataset to apply it to",
            job.name()
        ));
    }
    for dropout in active_dropouts {
        for (name, base) in &datasets {
            let directory =
                output_dir.join(dropout_dir_name(name, dropout.drop_cutoff, dropout.drop_prob));
            plan.tasks.push(PostProcessingTask::Dropouts {
                drop_cutoff: dropout.drop_cutoff,
                drop_prob: dropout.drop_prob,
                dataset: SampledDataset::new(
                    directory,
                    base.sample_size,
                    base.dataset,
                    base.sampled_cells.clone(),
                ),
            });
        }
    }

    let out_prefix = &job.settings.out_prefix;
    plan.tasks.extend(post.dim_red().iter().map(|r| PostProcessingTask::DimRed {
        perplexity: r.perplexity,
        directory: out_prefix.join(format!("DimRed-{}", r.perplexity)),
    }));
    plan.tasks.extend(post.slingshot().iter().map(|r| PostProcessingTask::Slingshot {
        perplexity: r.perplexity,
        directory: out_prefix.join(format!("Slingshot-{}", r.perplexity)),
    }));

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::post_processing::{DimRed, Dropouts, GenSamples, Slingshot};
    use crate::engine::config::JobSettings;
    use crate::engine::plan::plan_job;
    use crate::testing::mcad_config;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reference_plan() -> JobPlan {
        let config = mcad_config();
        let settings = JobSettings::resolve(&config.global_settings, &config.jobs[0]).unwrap();
        plan_job(settings, true, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn reference_gen_samples_gives_one_dataset() {
        let config = mcad_config();
        let job = reference_plan();
        let plan = plan_post_processing(
            &job,
            &config.post_processing,
            Path::new("Curated"),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert!(plan.warnings.is_empty());
        assert_eq!(plan.tasks.len(), 1);
        let dataset = plan.tasks[0].sampled_dataset().unwrap();
        assert_eq!(dataset.directory, Path::new("Curated").join("mCAD-500-1"));
        assert_eq!(
            dataset.manifest,
            Some(dataset.directory.join("sampled_cells.csv"))
        );
        let cells = dataset.sampled_cells.as_ref().unwrap();
        assert_eq!(cells.len(), 500);
        let population: Vec<String> = (0..job.cells_produced)
            .filter_map(|i| job.column_label(i))
            .collect();
        let positions: Vec<usize> = cells
            .iter()
            .map(|c| population.iter().position(|p| p == c).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn oversized_sample_is_a_warning() {
        let job = reference_plan();
        let post = PostProcessing {
            gen_samples: Some(vec![GenSamples {
                sample_size: 10_000,
                n_datasets: 2,
            }]),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan_post_processing(&job, &post, Path::new("out"), &mut rng).unwrap();
        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(plan.warnings.len(), 2);
        assert!(
            plan.tasks
                .iter()
                .all(|t| t.sampled_dataset().unwrap().manifest.is_none())
        );
    }

    #[test]
    fn dropouts_apply_to_every_sampled_dataset() {
        let job = reference_plan();
        let post = PostProcessing {
            gen_samples: Some(vec![GenSamples {
                sample_size: 100,
                n_datasets: 2,
            }]),
            dropouts: Some(vec![
                Dropouts {
                    dropout: true,
                    drop_cutoff: 0.5,
                    drop_prob: 0.7,
                },
                Dropouts {
                    dropout: false,
                    drop_cutoff: 0.1,
                    drop_prob: 0.1,
                },
            ]),
            dim_red: Some(vec![DimRed { perplexity: 200 }]),
            slingshot: Some(vec![Slingshot { perplexity: 400 }]),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let plan = plan_post_processing(&job, &post, Path::new("out"), &mut rng).unwrap();

        let dirs: Vec<_> = plan
            .tasks
            .iter()
            .map(|t| t.directory().to_path_buf())
            .collect();
        let prefix = Path::new("Curated").join("mCAD");
        assert_eq!(
            dirs,
            vec![
                Path::new("out").join("mCAD-100-1"),
                Path::new("out").join("mCAD-100-2"),
                Path::new("out").join("mCAD-100-1-0.5-0.7"),
                Path::new("out").join("mCAD-100-2-0.5-0.7"),
                prefix.join("DimRed-200"),
                prefix.join("Slingshot-400"),
            ]
        );
        assert_eq!(
            plan.tasks[0].sampled_dataset().unwrap().sampled_cells,
            plan.tasks[2].sampled_dataset().unwrap().sampled_cells
        );
    }

    #[test]
    fn dropouts_without_samples_warn() {
        let job = reference_plan();
        let post = PostProcessing {
            dropouts: Some(vec![Dropouts {
                dropout: true,
                drop_cutoff: 0.5,
                drop_prob: 0.5,
            }]),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan_post_processing(&job, &post, Path::new("out"), &mut rng).unwrap();
        assert!(plan.tasks.is_empty());
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn tasks_serialize_with_step_tag() {
        let task = PostProcessingTask::DimRed {
            perplexity: 200,
            directory: PathBuf::from("out/DimRed-200"),
        };
        let yaml = serde_yaml::to_string(&task).unwrap();
        assert!(yaml.contains("step: DimRed"));
        assert!(yaml.contains("perplexity: 200"));
    }

    #[test]
    fn large_job_samples_only_the_requested_labels() {
        let config = mcad_config();
        let mut settings =
            JobSettings::resolve(&config.global_settings, &config.jobs[0]).unwrap();
        settings.simulation_time = 1000.0;
        settings.integration_step_size = 0.001;
        settings.num_cells = 1000;
        let job = plan_job(settings, true, &mut StdRng::seed_from_u64(0)).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let plan =
            plan_post_processing(&job, &config.post_processing, Path::new("out"), &mut rng)
                .unwrap();
        let cells = plan.tasks[0]
            .sampled_dataset()
            .unwrap()
            .sampled_cells
            .as_ref()
            .unwrap();
        assert_eq!(cells.len(), 500);
        assert!(cells.iter().all(|c| c.starts_with('E') && !c.contains("_t")));
    }
}
