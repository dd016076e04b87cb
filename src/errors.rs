use thiserror::Error;

/// Failures raised by the jar store and its storage backends.
#[derive(Debug, Error)]
pub enum JarError {
    #[error("Jar not found: {0}")]
    NotFound(String),
    #[error("Jar already exists: {0}")]
    DuplicateName(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, JarError>;

impl From<std::io::Error> for JarError {
    fn from(err: std::io::Error) -> Self {
        JarError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for JarError {
    fn from(err: serde_json::Error) -> Self {
        JarError::Storage(err.to_string())
    }
}

impl JarError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, JarError::NotFound(_))
    }
}
