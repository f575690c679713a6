use crate::cli::ValidateArgs;
use crate::config;
use crate::error::{CliError, Result};
use boolode::engine::validation::{self, ValidationReport};
use tracing::info;

pub fn run(args: ValidateArgs) -> Result<()> {
    let config = config::load(&args.config)?;

    let mut report = validation::validate(&config);
    if args.check_files {
        info!("Checking input files referenced by the configuration...");
        report.merge(validation::check_files(&config));
    }

    print!("{}", render(&report));

    let errors = report.errors().count();
    if errors > 0 {
        return Err(CliError::ValidationFailed(errors));
    }
    Ok(())
}

fn render(report: &ValidationReport) -> String {
    let mut out = String::new();
    if !report.is_empty() {
        out.push_str(&format!("{}\n", report));
    }
    let errors = report.errors().count();
    let warnings = report.warnings().count();
    if errors == 0 {
        out.push_str(&format!("Configuration is valid ({} warning(s)).\n", warnings));
    } else {
        out.push_str(&format!("{} error(s), {} warning(s).\n", errors, warnings));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigArgs;
    use std::path::Path;
    use tempfile::tempdir;

    fn args(config: &Path, set_values: &[&str], check_files: bool) -> ValidateArgs {
        ValidateArgs {
            config: ConfigArgs {
                config: config.to_path_buf(),
                set_values: set_values.iter().map(|s| s.to_string()).collect(),
            },
            check_files,
        }
    }

    fn demo_config() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/mCAD.yaml")
    }

    #[test]
    fn invalid_config_fails_with_its_error_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        let text = std::fs::read_to_string(demo_config())
            .unwrap()
            .replace("num_cells: 5", "num_cells: 0")
            .replace("simulation_time: 5", "simulation_time: -1");
        std::fs::write(&path, text).unwrap();

        let result = run(args(&path, &[], false));
        assert!(matches!(result, Err(CliError::ValidationFailed(2))));
    }

    #[test]
    fn overrides_are_validated_too() {
        let result = run(args(&demo_config(), &["jobs.mCAD.num_cells=0"], false));
        assert!(matches!(result, Err(CliError::ValidationFailed(n)) if n >= 1));
    }

    #[test]
    fn missing_model_files_fail_only_with_file_checks() {
        let dir = tempdir().unwrap();
        let model_dir = format!("global_settings.model_dir={}", dir.path().display());

        assert!(run(args(&demo_config(), &[&model_dir], false)).is_ok());
        assert!(matches!(
            run(args(&demo_config(), &[&model_dir], true)),
            Err(CliError::ValidationFailed(n)) if n >= 1
        ));
    }

    #[test]
    fn bundled_demo_passes_file_checks() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let mut config = config::load_file(&demos.join("mCAD.yaml")).unwrap();
        config.global_settings.model_dir = demos.join("data").to_string_lossy().to_string();

        let mut report = validation::validate(&config);
        report.merge(validation::check_files(&config));
        assert!(report.is_empty(), "unexpected issues:\n{}", report);
    }

    #[test]
    fn clean_report_renders_single_line() {
        assert_eq!(
            render(&ValidationReport::new()),
            "Configuration is valid (0 warning(s)).\n"
        );
    }

    #[test]
    fn issues_are_listed_before_the_summary() {
        let mut report = ValidationReport::new();
        report.error("jobs[0].num_cells", "must be a positive integer");
        report.warning("jobs[0].nClusters", "clustering is skipped when n_snapshots > 0");
        let text = render(&report);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("error: jobs[0].num_cells"));
        assert!(lines[1].starts_with("warning: jobs[0].nClusters"));
        assert_eq!(lines[2], "1 error(s), 1 warning(s).");
    }
}
