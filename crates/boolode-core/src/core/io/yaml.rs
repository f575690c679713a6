use super::traits::ConfigFile;
use crate::core::models::experiment::ExperimentConfig;
use std::io::{self, Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid YAML document: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// The native BoolODE configuration format.
///
/// Comments in the source document are not preserved on write.
pub struct YamlFile;

impl ConfigFile for YamlFile {
    type Error = YamlError;

    fn read_from(reader: &mut impl Read) -> Result<ExperimentConfig, Self::Error> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    fn write_to(config: &ExperimentConfig, writer: &mut impl Write) -> Result<(), Self::Error> {
        serde_yaml::to_writer(writer, config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MCAD_CONFIG, mcad_config};

    #[test]
    fn reads_reference_document() {
        let config = YamlFile::read_from(&mut MCAD_CONFIG.as_bytes()).unwrap();
        assert_eq!(config, mcad_config());
    }

    #[test]
    fn written_document_keeps_section_order() {
        let text = YamlFile::write_to_string(&mcad_config()).unwrap();
        let section = |key: &str| text.lines().position(|line| line == key).unwrap();
        let global = section("global_settings:");
        let jobs = section("jobs:");
        let post = section("post_processing:");
        assert!(global < jobs && jobs < post);
        assert!(text.contains("do_post_processing: true"));
        assert!(text.contains("nClusters: 2"));
        assert!(text.contains("nDatasets: 1"));
        assert!(!text.contains("DimRed"));
    }

    #[test]
    fn malformed_yaml_reports_parse_error() {
        let result = YamlFile::read_from(&mut "jobs: [".as_bytes());
        assert!(matches!(result, Err(YamlError::Parse(_))));
    }
}
