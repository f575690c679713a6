use crate::cli::PlanArgs;
use crate::config;
use crate::error::{CliError, Result};
use boolode::engine::progress::ProgressReporter;
use boolode::workflows::plan::{self, PlanOptions};
use tracing::info;

pub fn run(args: PlanArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let options = PlanOptions {
        job: args.job,
        seed: args.seed,
    };

    info!("Invoking the planning workflow...");
    let plan = plan::run(&config, &options, &ProgressReporter::new())?;

    let yaml = serde_yaml::to_string(&plan)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to render plan: {}", e)))?;
    print!("{}", yaml);
    Ok(())
}
