use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// The simulation formalism used to turn a Boolean model into ODEs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Continuous regulation through Hill functions.
    Hill,
    /// Step-function regulation.
    Heaviside,
}

impl ModelType {
    pub const ALL: [ModelType; 2] = [ModelType::Hill, ModelType::Heaviside];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Hill => "hill",
            ModelType::Heaviside => "heaviside",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported model type '{0}'. Expected one of: hill, heaviside")]
pub struct UnknownModelType(pub String);

impl FromStr for ModelType {
    type Err = UnknownModelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelType::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownModelType(s.to_string()))
    }
}

/// The `global_settings` section of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalSettings {
    /// Directory holding model definition and auxiliary input files.
    pub model_dir: String,
    /// Directory under which every job writes its outputs.
    pub output_dir: String,
    pub do_simulations: bool,
    pub do_post_processing: bool,
    pub modeltype: ModelType,
}

impl GlobalSettings {
    pub fn model_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.model_dir)
    }

    pub fn output_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_parses_supported_names() {
        assert_eq!("hill".parse::<ModelType>().unwrap(), ModelType::Hill);
        assert_eq!(" heaviside ".parse::<ModelType>().unwrap(), ModelType::Heaviside);
    }

    #[test]
    fn model_type_rejects_unknown_and_empty_names() {
        assert_eq!(
            "boolean".parse::<ModelType>(),
            Err(UnknownModelType("boolean".to_string()))
        );
        assert!("".parse::<ModelType>().is_err());
        assert!("Hill".parse::<ModelType>().is_err());
    }

    #[test]
    fn model_type_display_matches_serialized_form() {
        for model in ModelType::ALL {
            let yaml = serde_yaml::to_string(&model).unwrap();
            assert_eq!(yaml.trim(), model.to_string());
        }
    }

    #[test]
    fn global_settings_rejects_unknown_fields() {
        let yaml = r#"
model_dir: data
output_dir: out
do_simulations: true
do_post_processing: false
modeltype: hill
verbose: true
"#;
        assert!(serde_yaml::from_str::<GlobalSettings>(yaml).is_err());
    }
}
