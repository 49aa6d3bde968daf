//! Optional `chanmap.toml` configuration.
//!
//! Every key is optional; missing keys take the defaults below and command
//! line flags override whatever the file sets.
//!
//! ```toml
//! [input]
//! source_header_row = 15
//! target_header_row = 1
//!
//! [matching]
//! generic_fallback = true
//! metric = "token-set"
//! dictionary_threshold = 0.5
//! semantic_threshold = 0.5
//! semantic_window = 0.1
//!
//! [export]
//! threshold = 0.9
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chanmap_ingest::{DEFAULT_SOURCE_HEADER_ROW, DEFAULT_TARGET_HEADER_ROW};
use chanmap_map::MatchOptions;
use chanmap_model::DEFAULT_EXPORT_THRESHOLD;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILENAME: &str = "chanmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChanmapConfig {
    pub input: InputConfig,
    pub matching: MatchOptions,
    pub export: ExportConfig,
}

/// Header positions, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub source_header_row: usize,
    pub target_header_row: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source_header_row: DEFAULT_SOURCE_HEADER_ROW,
            target_header_row: DEFAULT_TARGET_HEADER_ROW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Minimum confidence for a match to be exported.
    pub threshold: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_EXPORT_THRESHOLD,
        }
    }
}

impl ChanmapConfig {
    /// Parses and validates configuration text; `path` is only used in errors.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Loads `explicit` when given, else `chanmap.toml` in `dir` if present,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILENAME);
                if !candidate.is_file() {
                    debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&text, &path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        };
        if self.input.source_header_row == 0 || self.input.target_header_row == 0 {
            return Err(invalid("header rows are 1-based".to_string()));
        }
        if !(0.0..=1.0).contains(&self.export.threshold) {
            return Err(invalid(format!(
                "export threshold {} is outside [0, 1]",
                self.export.threshold
            )));
        }
        let matching = &self.matching;
        for (name, value) in [
            ("dictionary_threshold", matching.dictionary_threshold),
            ("semantic_threshold", matching.semantic_threshold),
            ("semantic_window", matching.semantic_window),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} {value} is outside [0, 1]")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanmap_map::SimilarityMetric;

    fn parse(text: &str) -> Result<ChanmapConfig, ConfigError> {
        ChanmapConfig::from_toml(text, Path::new("chanmap.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), ChanmapConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [matching]
            metric = "sequence"
            generic_fallback = false

            [export]
            threshold = 0.95
            "#,
        )
        .unwrap();
        assert_eq!(config.matching.metric, SimilarityMetric::Sequence);
        assert!(!config.matching.generic_fallback);
        assert_eq!(config.matching.semantic_window, 0.1);
        assert_eq!(config.export.threshold, 0.95);
        assert_eq!(config.input.source_header_row, 15);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("[input]\nheader = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            parse("[export]\nthreshold = 1.5\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            parse("[input]\nsource_header_row = 0\n"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn defaults_serialize_as_documented() {
        insta::assert_json_snapshot!(ChanmapConfig::default(), @r#"
        {
          "input": {
            "source_header_row": 15,
            "target_header_row": 1
          },
          "matching": {
            "generic_fallback": true,
            "metric": "token-set",
            "dictionary_threshold": 0.5,
            "semantic_threshold": 0.5,
            "semantic_window": 0.1
          },
          "export": {
            "threshold": 0.9
          }
        }
        "#);
    }
}
