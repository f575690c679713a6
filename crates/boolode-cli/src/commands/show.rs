use crate::cli::ShowArgs;
use crate::config;
use crate::error::Result;
use boolode::core::models::experiment::ExperimentConfig;
use boolode::engine::config::JobSettings;
use boolode::engine::error::EngineError;
use boolode::engine::plan::time_grid::TimeGrid;

pub fn run(args: ShowArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    print!("{}", render(&config)?);
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn render(config: &ExperimentConfig) -> Result<String> {
    let global = &config.global_settings;
    let mut out = format!(
        "Model type:      {}\n\
         Model directory: {}\n\
         Output:          {}\n\
         Simulations:     {}\n\
         Post-processing: {}\n",
        global.modeltype,
        global.model_dir,
        global.output_dir,
        on_off(global.do_simulations),
        on_off(global.do_post_processing),
    );

    out.push_str(&format!("\nJobs ({}):\n", config.jobs.len()));
    for job in &config.jobs {
        let settings = JobSettings::resolve(global, job).map_err(EngineError::from)?;
        let points = TimeGrid::new(settings.simulation_time, settings.integration_step_size)
            .map(|g| g.n_points().to_string())
            .unwrap_or_else(|_| "invalid".to_string());
        let sampling = if settings.uses_snapshots() {
            format!("{} snapshot(s)", settings.n_snapshots)
        } else {
            "full trajectory".to_string()
        };
        let clustering = if settings.clustering_enabled() {
            format!("k = {}", settings.n_clusters)
        } else {
            "off".to_string()
        };
        out.push_str(&format!(
            "  {:<12} {} cell(s), t = {} ({} points), {}, {:?}, clustering {}\n",
            settings.name,
            settings.num_cells,
            settings.simulation_time,
            points,
            sampling,
            settings.execution,
            clustering
        ));
    }

    let steps = config.post_processing.active_steps();
    out.push_str(&format!("\nPost-processing steps ({}):\n", steps.len()));
    for step in steps {
        out.push_str(&format!("  {}\n", step));
    }
    Ok(out)
}
