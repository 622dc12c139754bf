use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ParsumError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("no evaluation job in flight")]
    NoActiveJob,

    #[error("Summarization service error: {0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ParsumError {
    /// Message suitable for terminal output.
    pub fn user_message(&self) -> String {
        match self {
            ParsumError::Api(api) => api.user_message(),
            other => other.to_string(),
        }
    }
}
