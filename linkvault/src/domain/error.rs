// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot fetch metadata: {0}")]
    CannotFetchMetadata(String),

    #[error("Collaborator call failed: {0}")]
    Collaborator(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    /// Prefix the error message with additional context
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::InvalidUrl(msg) => DomainError::InvalidUrl(format!("{}: {}", context, msg)),
            DomainError::InvalidInput(msg) => {
                DomainError::InvalidInput(format!("{}: {}", context, msg))
            }
            DomainError::CannotFetchMetadata(msg) => {
                DomainError::CannotFetchMetadata(format!("{}: {}", context, msg))
            }
            DomainError::Collaborator(msg) => {
                DomainError::Collaborator(format!("{}: {}", context, msg))
            }
            DomainError::Serialization(msg) => {
                DomainError::Serialization(format!("{}: {}", context, msg))
            }
            DomainError::Clipboard(msg) => DomainError::Clipboard(format!("{}: {}", context, msg)),
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
            err => DomainError::Other(format!("{}: {}", context, err)),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Serialization(e.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_collaborator_error_when_adding_context_then_message_is_prefixed() {
        let err = DomainError::Collaborator("HTTP 500".to_string()).context("bulk create");
        assert_eq!(err.to_string(), "Collaborator call failed: bulk create: HTTP 500");
    }

    #[test]
    fn given_io_error_when_adding_context_then_becomes_other() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = DomainError::from(io).context("reading input");
        assert!(matches!(err, DomainError::Other(_)));
        assert!(err.to_string().contains("reading input"));
    }
}
