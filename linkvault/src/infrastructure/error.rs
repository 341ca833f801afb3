// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl From<reqwest::Error> for InfrastructureError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            InfrastructureError::Serialization(error.to_string())
        } else {
            InfrastructureError::Network(error.to_string())
        }
    }
}

// Gateway failures surface as collaborator errors; metadata lookups map separately
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Network(msg) => DomainError::Collaborator(msg),
            err @ InfrastructureError::HttpStatus { .. } => DomainError::Collaborator(err.to_string()),
            InfrastructureError::Serialization(msg) => DomainError::Serialization(msg),
            InfrastructureError::Clipboard(msg) => DomainError::Clipboard(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_http_status_when_converted_then_collaborator_error_keeps_status() {
        let err: DomainError = InfrastructureError::HttpStatus {
            status: 503,
            body: "maintenance".to_string(),
        }
        .into();

        assert!(matches!(&err, DomainError::Collaborator(msg) if msg == "HTTP 503: maintenance"));
    }
}
