use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, RoundingPolicy};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dimensions: DimensionConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Absent keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Configuration specific to the dimension calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionConfig {
    pub rounding: RoundingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_nearest_rounding() {
        assert_eq!(AppConfig::default().dimensions.rounding, RoundingPolicy::Nearest);
        assert_eq!(AppConfig::from_json_str("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_rounding_policy() {
        let config = AppConfig::from_json_str(r#"{ "dimensions": { "rounding": "floor" } }"#).unwrap();
        assert_eq!(config.dimensions.rounding, RoundingPolicy::Floor);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = AppConfig::from_json_str(r#"{ "dimensions": { "rounding": "ceil" } }"#).unwrap_err();
        assert!(matches!(err, crate::ParamsError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::ParamsError::Io(_)));
    }
}
