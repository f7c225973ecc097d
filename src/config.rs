//! Configuration structures for training
//!
//! Hyper-parameters live in an immutable `TrainingConfig` handed to the trainer. The binary
//! reads a `RunConfig` JSON file that also points at the datasets.
//!
//! # Example
//!
//! ```json
//! {
//!   "training": {
//!     "learning_rate": 0.1,
//!     "epochs": 1000,
//!     "zeta": 0.9,
//!     "hidden_size": 50,
//!     "init": { "kind": "normal", "mean": 0.0, "std_dev": 1e-6 },
//!     "seed": 42
//!   },
//!   "train": { "path": "data/train.csv", "x_size": 784, "y_size": 10 },
//!   "test": { "path": "data/test.csv", "x_size": 784, "y_size": 10 }
//! }
//! ```

use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{initialization::ParamInit, MlpErr, Result};

const DEFAULT_LEARNING_RATE: f64 = 0.1;
const DEFAULT_EPOCHS: usize = 1000;
const DEFAULT_ZETA: f64 = 0.9;
const DEFAULT_HIDDEN_SIZE: usize = 50;

/// The constants of a training run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingConfig {
    /// Learning rate before normalizing by the amount of training samples.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Amount of epochs to run, there's no early stopping.
    #[serde(default = "default_epochs")]
    pub epochs: NonZeroUsize,

    /// Factor the training targets are multiplied by.
    #[serde(default = "default_zeta")]
    pub zeta: f64,

    /// Amount of hidden units.
    #[serde(default = "default_hidden_size")]
    pub hidden_size: usize,

    /// Parameter initialization.
    #[serde(default)]
    pub init: ParamInit,

    /// Seed for the parameter initialization, taken from the OS when missing.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Amount of test errors sampled along training for the learning curve.
    #[serde(default)]
    pub learning_curve_points: Option<NonZeroUsize>,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_epochs() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_EPOCHS).unwrap_or(NonZeroUsize::MIN)
}

fn default_zeta() -> f64 {
    DEFAULT_ZETA
}

fn default_hidden_size() -> usize {
    DEFAULT_HIDDEN_SIZE
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            epochs: default_epochs(),
            zeta: default_zeta(),
            hidden_size: default_hidden_size(),
            init: ParamInit::default(),
            seed: None,
            learning_curve_points: None,
        }
    }
}

impl TrainingConfig {
    /// Checks every value is usable.
    ///
    /// # Errors
    /// Returns `MlpErr::InvalidConfig` or `MlpErr::InvalidInit` describing the first invalid
    /// value found.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return Err(MlpErr::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }

        if !self.zeta.is_finite() {
            return Err(MlpErr::InvalidConfig(format!(
                "zeta must be finite, got {}",
                self.zeta
            )));
        }

        if self.hidden_size == 0 {
            return Err(MlpErr::InvalidConfig(
                "hidden_size must be at least 1".into(),
            ));
        }

        self.init.validate()
    }
}

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// CSV file, one sample per line.
    pub path: PathBuf,
    pub x_size: usize,
    pub y_size: usize,
}

/// Everything the binary needs for a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub training: TrainingConfig,
    pub train: DatasetConfig,
    pub test: DatasetConfig,
}

impl RunConfig {
    /// Checks the training values and that both datasets describe the same samples.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;

        if self.train.x_size == 0 || self.train.y_size == 0 {
            return Err(MlpErr::InvalidConfig(
                "x_size and y_size must be at least 1".into(),
            ));
        }

        if (self.train.x_size, self.train.y_size) != (self.test.x_size, self.test.y_size) {
            return Err(MlpErr::InvalidConfig(format!(
                "train samples are {}+{} values but test samples are {}+{}",
                self.train.x_size, self.train.y_size, self.test.x_size, self.test.y_size
            )));
        }

        Ok(())
    }
}

/// Loads a run configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `RunConfig` and validates it. Relative
/// dataset paths are resolved against the directory of the config file.
///
/// # Returns
///
/// `Ok(RunConfig)` on success, or an error if the file cannot be read, the JSON is invalid or
/// a value is out of range.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| MlpErr::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config: RunConfig = serde_json::from_str(&contents)?;
    config.validate()?;

    if let Some(dir) = path.parent() {
        for dataset in [&mut config.train, &mut config.test] {
            if dataset.path.is_relative() {
                dataset.path = dir.join(&dataset.path);
            }
        }
    }

    Ok(config)
}
