use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("missing required setting: {0}")]
    Missing(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChatloadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("chat error: {0}")]
    Chat(String),

    #[error("summary error: {0}")]
    Summary(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for ChatloadError {
    fn from(err: serde_json::Error) -> Self {
        ChatloadError::Summary(err.to_string())
    }
}
