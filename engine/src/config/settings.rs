// Pipeline settings. Defaults match the conventional `data/` -> `processed/` layout.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub target_product: String,
    pub output_prefix: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("processed"),
            target_product: "pink morsel".to_string(),
            output_prefix: "processed_".to_string(),
        }
    }
}

impl PipelineSettings {
    /// Reads settings from a JSON file. Keys left out keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let settings: PipelineSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.target_product.trim().is_empty() {
            return Err(EngineError::ConfigError("target_product must not be empty".to_string()));
        }
        if self.input_dir == self.output_dir && self.output_prefix.is_empty() {
            // Outputs would overwrite their own inputs.
            return Err(EngineError::ConfigError(
                "output_prefix must not be empty when input_dir equals output_dir".to_string(),
            ));
        }
        Ok(())
    }

    /// Output path for a given input file name.
    pub fn output_path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.output_prefix, file_name))
    }
}
