use config_schema::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    /// Displays the located message; the wrapped error is not a `source()`
    /// so error chains print it once.
    #[error("{}", .0.located())]
    Validation(ValidationError),

    #[error("ID {0} redefined!")]
    DuplicateId(String),

    #[error("Platform not found: '{domain}.{platform}'")]
    UnknownPlatform { domain: String, platform: String },

    #[error("Platform already registered: '{domain}.{platform}'")]
    DuplicatePlatform { domain: String, platform: String },

    #[error("Rendering error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationError> for CodegenError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl CodegenError {
    /// The validation failure behind this error, if any.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodegenError>;
