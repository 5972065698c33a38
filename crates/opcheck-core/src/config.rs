//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [truthiness]
//! false_strings = ["false", "no", "off", "0", ""]
//!
//! [evaluation]
//! allow = true
//! ```

use crate::eval::{DEFAULT_FALSE_STRINGS, TextualTruthiness};
use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub truthiness: TruthinessConfig,
    pub evaluation: EvaluationConfig,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }
}

///
/// TruthinessConfig
///
/// Spellings the default truthiness interpreter reads as false.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TruthinessConfig {
    pub false_strings: Vec<String>,
}

impl TruthinessConfig {
    #[must_use]
    pub fn interpreter(&self) -> TextualTruthiness {
        TextualTruthiness::new(&self.false_strings)
    }
}

impl Default for TruthinessConfig {
    fn default() -> Self {
        Self {
            false_strings: DEFAULT_FALSE_STRINGS.iter().map(ToString::to_string).collect(),
        }
    }
}

///
/// EvaluationConfig
///
/// `allow = false` rejects `validate` and `then` before any evaluator runs.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    pub allow: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { allow: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();

        assert_eq!(config, EngineConfig::default());
        assert!(config.evaluation.allow);
        assert_eq!(config.truthiness.false_strings.len(), DEFAULT_FALSE_STRINGS.len());
    }

    #[test]
    fn sections_override_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [truthiness]
            false_strings = ["nope"]

            [evaluation]
            allow = false
            "#,
        )
        .unwrap();

        assert_eq!(config.truthiness.false_strings, vec!["nope".to_string()]);
        assert!(!config.evaluation.allow);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = EngineConfig::from_toml_str("[evaluation]\nalow = true\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EngineConfig::from_path("/definitely/not/here/opcheck.toml").unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
