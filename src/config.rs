use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::Stone;
use crate::error::ConfigError;
use crate::eval::EvaluatorKind;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub training: TrainingConfig,
}

/// Evaluator choice and where its parameters live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub evaluator: EvaluatorKind,
    pub heuristic_weights: PathBuf,
    pub network_weights: PathBuf,
    /// Fixed seed for network initialization and tie-breaks; OS entropy if unset
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            evaluator: EvaluatorKind::Neural,
            heuristic_weights: PathBuf::from("heuristic_weights.txt"),
            network_weights: PathBuf::from("nn_weights.txt"),
            seed: None,
        }
    }
}

/// Side the learning engine plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Black,
    White,
}

impl Side {
    pub fn stone(self) -> Stone {
        match self {
            Side::Black => Stone::Black,
            Side::White => Stone::White,
        }
    }
}

/// Self-play schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Games against the random mover
    pub random_games: usize,
    /// Games against the fixed heuristic engine
    pub sparring_games: usize,
    pub learner: Side,
    /// Whether the sparring engine runs the tactical override
    pub sparring_override: bool,
    /// Games between progress lines
    pub log_interval: usize,
    /// Games between checkpoint saves
    pub checkpoint_interval: usize,
    /// Games in the rolling win-rate window
    pub metrics_window: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            random_games: 2000,
            sparring_games: 3000,
            learner: Side::Black,
            sparring_override: false,
            log_interval: 100,
            checkpoint_interval: 1000,
            metrics_window: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if self.training.checkpoint_interval == 0 {
            return Err(ConfigError::Validation(
                "training.checkpoint_interval must be > 0".into(),
            ));
        }
        if self.training.metrics_window == 0 {
            return Err(ConfigError::Validation(
                "training.metrics_window must be > 0".into(),
            ));
        }
        if self.engine.heuristic_weights.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "engine.heuristic_weights must not be empty".into(),
            ));
        }
        if self.engine.network_weights.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "engine.network_weights must not be empty".into(),
            ));
        }
        if self.engine.heuristic_weights == self.engine.network_weights {
            return Err(ConfigError::Validation(
                "engine.heuristic_weights and engine.network_weights must differ".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
