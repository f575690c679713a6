use super::traits::ConfigFile;
use crate::core::models::experiment::ExperimentConfig;
use std::io::{self, Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TomlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid TOML document: {0}")]
    Parse(#[from] ::toml::de::Error),
    #[error("Failed to serialize TOML document: {0}")]
    Serialize(#[from] ::toml::ser::Error),
}

/// TOML rendition of the experiment document, with the same keys as the YAML form.
pub struct TomlFile;

impl ConfigFile for TomlFile {
    type Error = TomlError;

    fn read_from(reader: &mut impl Read) -> Result<ExperimentConfig, Self::Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(::toml::from_str(&content)?)
    }

    fn write_to(config: &ExperimentConfig, writer: &mut impl Write) -> Result<(), Self::Error> {
        let content = ::toml::to_string(config)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }
}
