use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use diabrisk_classifiers::config::ModelConfig;
use diabrisk_classifiers::data_handling::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_SIZE};
use diabrisk_classifiers::io::DataSource;

/// Parameters for a training run. Every field has a default, so an empty
/// JSON object (or no file at all) reproduces the standard run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub data: DataSource,
    pub output_dir: PathBuf,
    pub test_size: f64,
    pub seed: u64,
    pub model: ModelConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            data: DataSource::default(),
            output_dir: PathBuf::from("."),
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SPLIT_SEED,
            model: ModelConfig::default(),
        }
    }
}

/// Load a training configuration from a JSON file.
pub fn load_train_config<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: TrainConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

impl TrainConfig {
    /// Config file (if any) with command line overrides applied.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => load_train_config(path)?,
            None => TrainConfig::default(),
        };

        if let Some(data) = matches.get_one::<DataSource>("data") {
            config.data = data.clone();
        }
        if let Some(output_dir) = matches.get_one::<PathBuf>("output_dir") {
            config.output_dir = output_dir.clone();
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = *seed;
        }
        if let Some(test_size) = matches.get_one::<f64>("test_size") {
            config.test_size = *test_size;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            anyhow::bail!("test_size must be between 0 and 1, got {}", self.test_size);
        }
        if let DataSource::Path(path) = &self.data {
            if !path.is_file() {
                anyhow::bail!("Data file does not exist: {}", path.display());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: TrainConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.seed, 42);
        assert!((cfg.test_size - 0.2).abs() < 1e-12);
        assert_eq!(cfg.data, DataSource::default());
        assert_eq!(cfg.output_dir, PathBuf::from("."));
    }

    #[test]
    fn out_of_range_test_size_is_rejected() {
        let cfg = TrainConfig {
            test_size: 1.5,
            ..TrainConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
