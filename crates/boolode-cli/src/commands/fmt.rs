use crate::cli::FmtArgs;
use crate::config;
use crate::error::{CliError, Result};
use tracing::info;

pub fn run(args: FmtArgs) -> Result<()> {
    let config = config::load(&args.config)?;

    match &args.output {
        Some(path) => {
            info!("Writing normalized configuration to {:?}", path);
            config.save(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?;
            println!("Configuration written to: {}", path.display());
        }
        None => {
            let yaml = config.to_yaml_string().map_err(|e| CliError::FileParsing {
                path: args.config.config.clone(),
                source: e.into(),
            })?;
            print!("{}", yaml);
        }
    }
    Ok(())
}
