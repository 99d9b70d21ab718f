use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NdkfigError {
    #[error(
        "Illegal value '{value}' for property \"{local_key}\" / \"{env_key}\". Must be 0/1/true/false if set"
    )]
    InvalidConfiguration {
        local_key: String,
        env_key: String,
        value: String,
    },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in declaration file")]
    UnknownKeys(Vec<NdkfigError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
