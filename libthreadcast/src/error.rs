//! Error types for Threadcast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThreadcastError>;

#[derive(Error, Debug)]
pub enum ThreadcastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ThreadcastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ThreadcastError::InvalidInput(_) => 3,
            ThreadcastError::Workflow(WorkflowError::EmptyTopic)
            | ThreadcastError::Workflow(WorkflowError::ValidationFailed(_)) => 3,
            ThreadcastError::Workflow(WorkflowError::RateLimitExceeded) => 2,
            ThreadcastError::Workflow(_) => 1,
            ThreadcastError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Workflow failure taxonomy.
///
/// Every variant is locally recoverable: the workflow always returns to a
/// resting phase and the draft survives unless the operation succeeded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("Another operation is already in progress")]
    AlreadyInProgress,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Posting failed: {0}")]
    PostFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Transport-level failures.
///
/// These never cross the controller boundary; the controllers convert them
/// into [`WorkflowError`] conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Rate limit exceeded")]
    RateLimited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = ThreadcastError::InvalidInput("Empty content".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_validation_failures() {
        let empty = ThreadcastError::Workflow(WorkflowError::EmptyTopic);
        assert_eq!(empty.exit_code(), 3);

        let invalid = ThreadcastError::Workflow(WorkflowError::ValidationFailed(
            "post is too long".to_string(),
        ));
        assert_eq!(invalid.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_rate_limit() {
        let error = ThreadcastError::Workflow(WorkflowError::RateLimitExceeded);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_operational_failures() {
        let generation =
            ThreadcastError::Workflow(WorkflowError::GenerationFailed("timeout".to_string()));
        assert_eq!(generation.exit_code(), 1);

        let posting = ThreadcastError::Workflow(WorkflowError::PostFailed("500".to_string()));
        assert_eq!(posting.exit_code(), 1);

        let busy = ThreadcastError::Workflow(WorkflowError::AlreadyInProgress);
        assert_eq!(busy.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let config_error = ConfigError::MissingField("api.base_url".to_string());
        let error = ThreadcastError::Config(config_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting() {
        let error = ThreadcastError::Workflow(WorkflowError::ValidationFailed(
            "post is 285 characters, limit is 280".to_string(),
        ));
        assert_eq!(
            format!("{}", error),
            "Validation failed: post is 285 characters, limit is 280"
        );

        let error = ThreadcastError::InvalidInput("thread index 7 out of range".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid input: thread index 7 out of range"
        );
    }

    #[test]
    fn test_error_conversion_from_workflow_error() {
        let workflow_error = WorkflowError::RateLimitExceeded;
        let error: ThreadcastError = workflow_error.into();

        match error {
            ThreadcastError::Workflow(WorkflowError::RateLimitExceeded) => {}
            _ => panic!("Expected ThreadcastError::Workflow"),
        }
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("test".to_string());
        let error: ThreadcastError = config_error.into();

        match error {
            ThreadcastError::Config(_) => {}
            _ => panic!("Expected ThreadcastError::Config"),
        }
    }

    #[test]
    fn test_api_error_formatting() {
        assert_eq!(
            format!("{}", ApiError::Network("connection refused".to_string())),
            "Network error: connection refused"
        );
        assert_eq!(format!("{}", ApiError::Status(500)), "Server returned status 500");
        assert_eq!(format!("{}", ApiError::RateLimited), "Rate limit exceeded");
    }

    #[test]
    fn test_workflow_error_clone() {
        let original = WorkflowError::GenerationFailed("model overloaded".to_string());
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }
}
