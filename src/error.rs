use std::path::PathBuf;

/// Errors that can occur while reading or writing weight records.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to access weight file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unrecognized header in {path}: {header:?}")]
    Header { path: PathBuf, header: String },

    #[error("unsupported {record} record version {version} in {path}")]
    Version {
        path: PathBuf,
        record: &'static str,
        version: u32,
    },

    #[error("invalid number {token:?} in {path}")]
    Number { path: PathBuf, token: String },

    #[error("expected {expected} values in {path}, found {found}")]
    Shape {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur during a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("invalid training setup: {0}")]
    Config(#[from] ConfigError),

    #[error("final save failed: {0}")]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_error_display() {
        let err = PersistError::Shape {
            path: PathBuf::from("nn_weights.txt"),
            expected: 108,
            found: 12,
        };
        assert_eq!(err.to_string(), "expected 108 values in nn_weights.txt, found 12");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("training.log_interval must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: training.log_interval must be > 0"
        );
    }

    #[test]
    fn test_training_error_display() {
        let err = TrainingError::from(ConfigError::Validation("no games scheduled".into()));
        assert_eq!(
            err.to_string(),
            "invalid training setup: config validation error: no games scheduled"
        );
    }
}
