use super::config::JobSettings;
use super::error::EngineError;
use super::plan::snapshots::snapshot_windows;
use super::plan::time_grid::TimeGrid;
use crate::core::io::initial_conditions::InitialConditions;
use crate::core::io::model_definition::ModelDefinition;
use crate::core::models::experiment::ExperimentConfig;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `jobs[0].num_cells`.
    pub location: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Every issue found in a configuration, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, location.into(), message.into());
    }

    pub fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, location.into(), message.into());
    }

    fn push(&mut self, severity: Severity, location: String, message: String) {
        self.issues.push(Issue {
            severity,
            location,
            message,
        });
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// Fails with the whole report when it holds at least one error.
    pub fn into_result(self) -> Result<ValidationReport, EngineError> {
        if self.has_errors() {
            Err(EngineError::Validation(self))
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Checks the schema rules that cannot be expressed by the types alone.
pub fn validate(config: &ExperimentConfig) -> ValidationReport {
    let mut report = ValidationReport::new();
    let global = &config.global_settings;
    let post = &config.post_processing;

    if global.model_dir.trim().is_empty() {
        report.error("global_settings.model_dir", "must not be empty");
    }
    if global.output_dir.trim().is_empty() {
        report.error("global_settings.output_dir", "must not be empty");
    }
    if config.jobs.is_empty() && global.do_simulations {
        report.warning("jobs", "no jobs defined but do_simulations is true");
    }

    for (i, record) in post.gen_samples().iter().enumerate() {
        let at = format!("post_processing.GenSamples[{}]", i);
        if record.sample_size == 0 {
            report.error(format!("{}.sample_size", at), "must be a positive integer");
        }
        if record.n_datasets == 0 {
            report.error(format!("{}.nDatasets", at), "must be a positive integer");
        }
    }
    for (i, record) in post.dropouts().iter().enumerate() {
        let at = format!("post_processing.Dropouts[{}]", i);
        if !(0.0..=1.0).contains(&record.drop_cutoff) {
            report.error(format!("{}.drop_cutoff", at), "must lie in [0, 1]");
        }
        if !(0.0..=1.0).contains(&record.drop_prob) {
            report.error(format!("{}.drop_prob", at), "must lie in [0, 1]");
        }
    }
    if post.active_dropouts().next().is_some() && post.gen_samples().is_empty() {
        report.warning(
            "post_processing.Dropouts",
            "active without any GenSamples dataset to apply it to",
        );
    }
    for (i, record) in post.dim_red().iter().enumerate() {
        if record.perplexity == 0 {
            report.error(
                format!("post_processing.DimRed[{}].perplexity", i),
                "must be a positive integer",
            );
        }
    }
    for (i, record) in post.slingshot().iter().enumerate() {
        if record.perplexity == 0 {
            report.error(
                format!("post_processing.Slingshot[{}].perplexity", i),
                "must be a positive integer",
            );
        }
    }

    let mut names = HashSet::new();
    for (i, job) in config.jobs.iter().enumerate() {
        let at = format!("jobs[{}]", i);

        if job.name.trim().is_empty() {
            report.error(format!("{}.name", at), "must not be empty");
        } else if !names.insert(job.name.as_str()) {
            report.error(
                format!("{}.name", at),
                format!("duplicate job name '{}'", job.name),
            );
        }
        if job.model_definition.trim().is_empty() {
            report.error(format!("{}.model_definition", at), "must not be empty");
        }
        for (key, file) in job.auxiliary_inputs() {
            if file.trim().is_empty() {
                report.error(format!("{}.{}", at, key), "must not be empty");
            }
        }
        if job.num_cells == 0 {
            report.error(format!("{}.num_cells", at), "must be a positive integer");
        }
        if job.n_clusters == 0 {
            report.error(format!("{}.nClusters", at), "must be at least 1");
        }

        let settings = match JobSettings::resolve(global, job) {
            Ok(settings) => settings,
            Err(e) => {
                report.error(at, e.to_string());
                continue;
            }
        };

        if !settings.simulation_time.is_finite() || settings.simulation_time <= 0.0 {
            report.error(
                format!("{}.simulation_time", at),
                "must be positive and finite",
            );
            continue;
        }
        if !settings.integration_step_size.is_finite() || settings.integration_step_size <= 0.0 {
            report.error(
                format!("{}.integration_step_size", at),
                "must be positive and finite",
            );
            continue;
        }
        let grid = match TimeGrid::new(settings.simulation_time, settings.integration_step_size) {
            Ok(grid) => grid,
            Err(e) => {
                report.error(format!("{}.simulation_time", at), e.to_string());
                continue;
            }
        };
        if let Err(e) = snapshot_windows(grid.steps(), settings.n_snapshots) {
            report.error(format!("{}.n_snapshots", at), e.to_string());
            continue;
        }

        if settings.uses_snapshots() && settings.n_clusters > 1 {
            report.warning(
                format!("{}.nClusters", at),
                "clustering is skipped when n_snapshots > 0",
            );
        }
        if settings.uses_snapshots() && settings.sample_cells {
            report.warning(
                format!("{}.sample_cells", at),
                "ignored when n_snapshots > 0",
            );
        }

        let per_cell = if settings.uses_snapshots() {
            settings.n_snapshots as u64
        } else {
            grid.steps() as u64
        };
        let Some(produced) = (settings.num_cells as u64).checked_mul(per_cell) else {
            report.error(
                format!("{}.num_cells", at),
                "number of cells times columns per cell overflows",
            );
            continue;
        };
        for (k, record) in post.gen_samples().iter().enumerate() {
            if record.sample_size as u64 > produced {
                report.warning(
                    format!("{}/post_processing.GenSamples[{}].sample_size", at, k),
                    format!(
                        "{} exceeds the {} cells produced by job '{}'",
                        record.sample_size, produced, job.name
                    ),
                );
            }
        }
    }

    debug!(
        "Validation finished with {} error(s) and {} warning(s).",
        report.errors().count(),
        report.warnings().count()
    );
    report
}

/// Checks that the input files named by each job exist and can be read.
pub fn check_files(config: &ExperimentConfig) -> ValidationReport {
    let mut report = ValidationReport::new();
    let model_dir = config.global_settings.model_dir_path();
    if !model_dir.is_dir() {
        report.error(
            "global_settings.model_dir",
            format!("directory '{}' does not exist", model_dir.display()),
        );
    }

    for (i, job) in config.jobs.iter().enumerate() {
        let at = format!("jobs[{}]", i);
        let settings = match JobSettings::resolve(&config.global_settings, job) {
            Ok(settings) => settings,
            Err(e) => {
                report.error(at, e.to_string());
                continue;
            }
        };

        let model = match ModelDefinition::load(&settings.model_path) {
            Ok(model) => {
                let undefined = model.undefined_regulators();
                if !undefined.is_empty() {
                    report.warning(
                        format!("{}.model_definition", at),
                        format!("regulators without a rule: {}", undefined.join(", ")),
                    );
                }
                Some(model)
            }
            Err(e) => {
                report.error(format!("{}.model_definition", at), e.to_string());
                None
            }
        };

        if let Some(ics_path) = &settings.ics_path {
            match InitialConditions::load(ics_path) {
                Ok(ics) => {
                    if let Some(model) = &model {
                        let unknown: Vec<&str> =
                            ics.genes().filter(|g| !model.contains(g)).collect();
                        if !unknown.is_empty() {
                            report.warning(
                                format!("{}.model_initial_conditions", at),
                                format!("genes not in the model: {}", unknown.join(", ")),
                            );
                        }
                    }
                }
                Err(e) => {
                    report.error(format!("{}.model_initial_conditions", at), e.to_string());
                }
            }
        }

        for (key, path) in settings.auxiliary.iter() {
            if !path.is_file() {
                report.error(
                    format!("{}.{}", at, key),
                    format!("file '{}' does not exist", path.display()),
                );
            }
        }
    }
    report
}
