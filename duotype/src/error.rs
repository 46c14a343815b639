use std::path::PathBuf;

use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(ConfigError),

    #[error("Failed to read text from {}: {source}", .path.display())]
    ReadText {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(tracing_subscriber::util::TryInitError),

    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),
}
