use thiserror::Error;
use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum DarkwoodError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to access config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // World generation errors
    #[error("Could not place tree {index} outside the clearing after {attempts} attempts")]
    PlacementExhausted { index: usize, attempts: u32 },

    // Asset errors
    #[error("Failed to load asset {path}: {reason}")]
    AssetLoadFailed { path: PathBuf, reason: String },
}

/// Result type alias for all operations
pub type DarkwoodResult<T> = Result<T, DarkwoodError>;
