use crate::cli::PlanArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use boolode::engine::progress::ProgressReporter;
use boolode::workflows::plan::{self, PlanOptions};
use boolode::workflows::prepare;
use tracing::info;

pub fn run(args: PlanArgs, quiet: bool) -> Result<()> {
    let config = config::load(&args.config)?;
    let options = PlanOptions {
        job: args.job,
        seed: args.seed,
    };

    let progress_handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the planning workflow...");
    let plan = plan::run(&config, &options, &reporter)?;
    info!("Materializing {} job plan(s) on disk...", plan.jobs.len());
    let summary = prepare::run(&plan, &reporter)?;

    println!(
        "Prepared {} job(s): {} new director(ies), {} sample manifest(s).",
        summary.plans_written, summary.directories_created, summary.manifests_written
    );
    for job in &plan.jobs {
        println!("  {} -> {}", job.name(), job.layout.run_plan.display());
    }
    let warnings = progress_handler.warning_count();
    if warnings > 0 {
        println!("{} warning(s) reported while planning.", warnings);
    }
    Ok(())
}

fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}
