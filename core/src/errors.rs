use thiserror::Error;

/// Message shown to the user whenever palette generation fails
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate color palette. Please check your input or try again later.";

/// Message carried by a response that does not describe a valid palette
pub const INVALID_COLOR_DATA_MESSAGE: &str = "Invalid color data received from API.";

/// Gemini API errors
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },
}

/// Result type for Gemini operations
pub type GeminiResult<T> = Result<T, GeminiError>;

/// What actually went wrong behind a [`GenerationError`]
#[derive(Error, Debug)]
pub enum FailureCause {
    /// The service answered, but not with a usable palette
    #[error("{}", INVALID_COLOR_DATA_MESSAGE)]
    InvalidColorData { reason: String },

    /// The call to the service itself failed
    #[error(transparent)]
    Service(#[from] GeminiError),
}

impl FailureCause {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidColorData {
            reason: reason.into(),
        }
    }
}

/// User-facing palette generation failure.
///
/// Always displays [`GENERATION_FAILED_MESSAGE`]; the underlying cause is
/// available through [`GenerationError::cause`] and `source()` for logging.
#[derive(Error, Debug)]
#[error("{}", GENERATION_FAILED_MESSAGE)]
pub struct GenerationError {
    #[source]
    cause: FailureCause,
}

impl GenerationError {
    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }
}

impl From<FailureCause> for GenerationError {
    fn from(cause: FailureCause) -> Self {
        Self { cause }
    }
}

impl From<GeminiError> for GenerationError {
    fn from(err: GeminiError) -> Self {
        Self {
            cause: FailureCause::Service(err),
        }
    }
}

/// Result type for palette generation
pub type GenerationResult<T> = Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_generation_error_hides_cause() {
        let err = GenerationError::from(FailureCause::invalid("colors has 4 entries"));
        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);

        let source = err.source().expect("cause should be the source");
        assert_eq!(source.to_string(), INVALID_COLOR_DATA_MESSAGE);
    }

    #[test]
    fn test_service_error_is_wrapped() {
        let err = GenerationError::from(GeminiError::HttpError {
            status_code: 503,
            message: "overloaded".to_string(),
        });
        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
        assert!(matches!(
            err.cause(),
            FailureCause::Service(GeminiError::HttpError { status_code: 503, .. })
        ));
    }
}
