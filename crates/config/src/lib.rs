mod config;
mod loader;

pub use config::{
    ComplexityConfig, ValidateConfig, DEFAULT_DEPTH_COST_FACTOR, DEFAULT_MAX_COMPLEXITY_SCORE,
    DEFAULT_OBJECT_COST, DEFAULT_SCALAR_COST,
};
pub use loader::{find_config, load_config, load_config_from_str};

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
