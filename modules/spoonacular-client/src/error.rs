use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpoonacularError>;

#[derive(Debug, Error)]
pub enum SpoonacularError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SpoonacularError {
    fn from(err: reqwest::Error) -> Self {
        SpoonacularError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SpoonacularError {
    fn from(err: serde_json::Error) -> Self {
        SpoonacularError::Parse(err.to_string())
    }
}
