//! Engine configuration
//!
//! Handles loading of the tunables that bound the engine's work: the input
//! size and arrangement length limits, the complexity ceiling that diverts to sampling, and the
//! Monte Carlo draw counts. Every field has a default, so an empty file (or
//! no file at all) yields a working configuration.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest arrangement any configuration may allow; every draw and every
/// search path holds one arrangement of this length
pub const MAX_LENGTH_LIMIT: usize = 1024;

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EngineConfig {
    /// Maximum number of elements in the input multiset
    #[serde(default = "default_input_limit")]
    pub input_limit: usize,

    /// Maximum arrangement length; only reachable past the input size with repetition
    #[serde(default = "default_length_limit")]
    pub length_limit: usize,

    /// Estimated work above which exhaustive search is replaced by sampling
    #[serde(default = "default_complexity_ceiling")]
    pub complexity_ceiling: f64,

    /// Number of random draws made by the Monte Carlo strategies
    #[serde(default = "default_sample_runs")]
    pub sample_runs: u64,

    /// Minimum number of realisable draws needed to report an estimate
    #[serde(default = "default_min_valid_samples")]
    pub min_valid_samples: u64,

    /// Largest table (values x length x target) the bounded-sum DP may build
    #[serde(default = "default_sum_dp_limit")]
    pub sum_dp_limit: u64,

    /// Fixed seed for reproducible sampling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_input_limit() -> usize {
    32
}

fn default_length_limit() -> usize {
    32
}

fn default_complexity_ceiling() -> f64 {
    1e8
}

fn default_sample_runs() -> u64 {
    1 << 21
}

fn default_min_valid_samples() -> u64 {
    1 << 10
}

fn default_sum_dp_limit() -> u64 {
    1_000_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_limit: default_input_limit(),
            length_limit: default_length_limit(),
            complexity_ceiling: default_complexity_ceiling(),
            sample_runs: default_sample_runs(),
            min_valid_samples: default_min_valid_samples(),
            sum_dp_limit: default_sum_dp_limit(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse config from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_norway::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sample_runs == 0 {
            return Err(Error::Config("sample_runs must be positive".into()));
        }
        if !(self.complexity_ceiling > 0.0) {
            return Err(Error::Config(
                "complexity_ceiling must be a positive number".into(),
            ));
        }
        if self.length_limit > MAX_LENGTH_LIMIT {
            return Err(Error::Config(format!(
                "length_limit must not exceed {} (got {})",
                MAX_LENGTH_LIMIT, self.length_limit
            )));
        }
        if self.min_valid_samples > self.sample_runs {
            return Err(Error::Config(format!(
                "min_valid_samples ({}) exceeds sample_runs ({})",
                self.min_valid_samples, self.sample_runs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.input_limit, 32);
        assert_eq!(config.length_limit, 32);
        assert_eq!(config.sample_runs, 1 << 21);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let config = EngineConfig::from_yaml("sample_runs: 4096\nseed: 7\n").unwrap();
        assert_eq!(config.sample_runs, 4096);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.input_limit, 32);
    }

    #[test]
    fn test_json_config() {
        let config = EngineConfig::from_json(r#"{"complexity_ceiling": 1000.0}"#).unwrap();
        assert_eq!(config.complexity_ceiling, 1000.0);
    }

    #[test]
    fn test_validate_rejects_bad_sampling() {
        let err = EngineConfig::from_yaml("sample_runs: 16\nmin_valid_samples: 32\n").unwrap_err();
        assert!(err.to_string().contains("min_valid_samples"));

        let err = EngineConfig::from_yaml("sample_runs: 0\n").unwrap_err();
        assert!(err.to_string().contains("sample_runs"));
    }

    #[test]
    fn test_validate_rejects_non_positive_ceiling() {
        let err = EngineConfig::from_yaml("complexity_ceiling: 0\n").unwrap_err();
        assert!(err.to_string().contains("complexity_ceiling"));
    }

    #[test]
    fn test_validate_caps_length_limit() {
        let config = EngineConfig::from_yaml("length_limit: 64\n").unwrap();
        assert_eq!(config.length_limit, 64);

        let err = EngineConfig::from_yaml("length_limit: 1000000\n").unwrap_err();
        assert!(err.to_string().contains("length_limit"));
    }
}
