//! Unified error types for Orabak

use thiserror::Error;

/// Unified error type for all Orabak operations
#[derive(Error, Debug)]
pub enum OrabakError {
    // Backend errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Failed to load {slice}: {message}")]
    LoadFailure { slice: String, message: String },

    #[error("Scheduler {command} failed: {message}")]
    CommandFailure { command: String, message: String },

    // Console errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// How a failure should be treated by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A read endpoint failed: degrade to absent or stale data and log
    LoadFailure,
    /// A scheduler command failed: surface a retryable failure to the operator
    CommandFailure,
}

impl OrabakError {
    /// Wrap a backend error raised while reading `slice`
    pub fn load(slice: impl Into<String>, source: &OrabakError) -> Self {
        Self::LoadFailure {
            slice: slice.into(),
            message: source.to_string(),
        }
    }

    /// Wrap a backend error raised while running a scheduler `command`
    pub fn command(command: impl Into<String>, source: &OrabakError) -> Self {
        Self::CommandFailure {
            command: command.into(),
            message: source.to_string(),
        }
    }

    /// Classify this error. Anything not raised by a command counts as a load failure.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::CommandFailure { .. } => ErrorClass::CommandFailure,
            _ => ErrorClass::LoadFailure,
        }
    }
}

/// Result type alias using OrabakError
pub type Result<T> = std::result::Result<T, OrabakError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_errors_classify_as_command_failures() {
        let source = OrabakError::Http {
            status: 503,
            body: "scheduler unavailable".to_string(),
        };
        let err = OrabakError::command("start", &source);
        assert_eq!(err.class(), ErrorClass::CommandFailure);
        assert!(err.to_string().contains("start"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_read_errors_classify_as_load_failures() {
        let err = OrabakError::load("health", &OrabakError::Transport("refused".into()));
        assert_eq!(err.class(), ErrorClass::LoadFailure);
        assert_eq!(
            OrabakError::Decode("eof".into()).class(),
            ErrorClass::LoadFailure
        );
    }
}
