use crate::core::models::experiment::ExperimentConfig;
use crate::core::models::job::Job;
use crate::engine::config::JobSettings;
use crate::engine::error::EngineError;
use crate::engine::plan::post_processing::plan_post_processing;
use crate::engine::plan::{JobPlan, plan_job};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::validation::validate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Restrict the plan to the job with this name.
    pub job: Option<String>,
    /// Base seed; job `i` of the configuration draws from `seed + i`.
    pub seed: u64,
}

impl PlanOptions {
    pub fn new(seed: u64) -> Self {
        Self { job: None, seed }
    }

    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentPlan {
    pub seed: u64,
    pub simulate: bool,
    pub post_process: bool,
    pub jobs: Vec<JobPlan>,
}

impl ExperimentPlan {
    pub fn job(&self, name: &str) -> Option<&JobPlan> {
        self.jobs.iter().find(|j| j.name() == name)
    }
}

#[instrument(skip_all, name = "plan_workflow", fields(seed = options.seed))]
pub fn run(
    config: &ExperimentConfig,
    options: &PlanOptions,
    reporter: &ProgressReporter,
) -> Result<ExperimentPlan, EngineError> {
    reporter.phase("Validation", || -> Result<(), EngineError> {
        let report = validate(config).into_result()?;
        for issue in report.warnings() {
            warn!("{}", issue);
            reporter.report(Progress::Warning(format!(
                "{}: {}",
                issue.location, issue.message
            )));
        }
        Ok(())
    })?;

    if let Some(name) = &options.job {
        if config.job(name).is_none() {
            return Err(EngineError::JobNotFound(name.clone()));
        }
    }

    let global = &config.global_settings;
    let selected: Vec<(usize, &Job)> = config
        .jobs
        .iter()
        .enumerate()
        .filter(|(_, job)| options.job.as_ref().is_none_or(|name| &job.name == name))
        .collect();

    let mut jobs = Vec::with_capacity(selected.len());
    reporter.phase("Planning", || {
        reporter.task(selected, |(index, job)| -> Result<(), EngineError> {
            let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(index as u64));
            let plan = plan_one(config, job, &mut rng)?;

            for warning in &plan.warnings {
                warn!(job = %job.name, "{}", warning);
                reporter.report(Progress::Warning(format!("{}: {}", job.name, warning)));
            }
            reporter.report(Progress::Message(format!(
                "{}: {} cell(s), {} post-processing task(s)",
                job.name,
                plan.cells.len(),
                plan.post_processing.len()
            )));
            jobs.push(plan);
            Ok(())
        })
    })?;
    info!("Planned {} job(s).", jobs.len());

    Ok(ExperimentPlan {
        seed: options.seed,
        simulate: global.do_simulations,
        post_process: global.do_post_processing,
        jobs,
    })
}

fn plan_one(
    config: &ExperimentConfig,
    job: &Job,
    rng: &mut StdRng,
) -> Result<JobPlan, EngineError> {
    let global = &config.global_settings;
    let settings = JobSettings::resolve(global, job)?;
    let mut plan = plan_job(settings, global.do_simulations, rng).map_err(|source| {
        EngineError::Plan {
            job: job.name.clone(),
            source,
        }
    })?;

    if global.do_post_processing {
        let post = plan_post_processing(
            &plan,
            &config.post_processing,
            &global.output_dir_path(),
            rng,
        )
        .map_err(|source| EngineError::Sampling {
            job: job.name.clone(),
            source,
        })?;
        plan.post_processing = post.tasks;
        plan.warnings.extend(post.warnings);
    }
    Ok(plan)
}
