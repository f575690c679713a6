use crate::core::models::experiment::ExperimentConfig;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing experiment documents.
///
/// Implementors handle one serialization format each; the path-based helpers are
/// shared.
pub trait ConfigFile {
    /// The error type for I/O and format errors.
    type Error: Error + From<io::Error>;

    /// Reads an experiment from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content does not match the schema.
    fn read_from(reader: &mut impl Read) -> Result<ExperimentConfig, Self::Error>;

    /// Writes an experiment to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn write_to(config: &ExperimentConfig, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Serializes an experiment into a string.
    fn write_to_string(config: &ExperimentConfig) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(config, &mut buffer)?;
        let text = String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(text)
    }

    /// Reads an experiment from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes an experiment to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        config: &ExperimentConfig,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(config, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
