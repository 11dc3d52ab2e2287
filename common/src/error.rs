use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid action ({row}, {col}): cell is occupied or out of range")]
    InvalidAction { row: usize, col: usize },

    #[error("cannot parse move '{text}', expected 'row col'")]
    InvalidActionText { text: String },

    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[source] serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
