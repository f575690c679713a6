use super::toml::TomlError;
use super::yaml::YamlError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Serialization formats accepted for the experiment document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

#[derive(Debug, Error)]
pub enum ConfigIoError {
    #[error("Unsupported configuration format for '{path}'. Expected a .yaml, .yml or .toml file", path = path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to process YAML configuration '{path}': {source}", path = path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: YamlError,
    },

    #[error("Failed to process TOML configuration '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: TomlError,
    },
}

impl ConfigFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ConfigIoError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigIoError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("dir/config.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")).unwrap(),
            ConfigFormat::Toml
        );
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        assert!(ConfigFormat::from_path(Path::new("config.json")).is_err());
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }
}
