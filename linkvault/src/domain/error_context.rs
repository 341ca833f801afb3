// src/domain/error_context.rs
use crate::application::error::ApplicationError;
use crate::cli::error::CliError;
use crate::domain::error::DomainError;

/// Attach context to fallible results without manual `map_err` formatting.
pub trait ErrorContext<T> {
    /// Add lazily built context to an error result
    fn with_context<F>(self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce() -> String;

    /// Add context to an error result with a static string
    fn context(self, msg: &'static str) -> Result<T, DomainError>;
}

/// Application-level error context
pub trait ApplicationErrorContext<T> {
    fn with_app_context<F>(self, f: F) -> Result<T, ApplicationError>
    where
        F: FnOnce() -> String;

    fn app_context(self, msg: &'static str) -> Result<T, ApplicationError>;
}

/// CLI-level error context
pub trait CliErrorContext<T> {
    fn with_cli_context<F>(self, f: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String;

    fn cli_context(self, msg: &'static str) -> Result<T, CliError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<DomainError>,
{
    fn with_context<F>(self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T, DomainError> {
        self.map_err(|e| e.into().context(msg))
    }
}

impl<T, E> ApplicationErrorContext<T> for Result<T, E>
where
    E: Into<ApplicationError>,
{
    fn with_app_context<F>(self, f: F) -> Result<T, ApplicationError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().context(f()))
    }

    fn app_context(self, msg: &'static str) -> Result<T, ApplicationError> {
        self.map_err(|e| e.into().context(msg))
    }
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CliError>,
{
    fn with_cli_context<F>(self, f: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().context(f()))
    }

    fn cli_context(self, msg: &'static str) -> Result<T, CliError> {
        self.map_err(|e| e.into().context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn given_io_error_when_add_context_then_returns_formatted_error() {
        let result: Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let contextual_result = result.context("reading import source");

        let err = contextual_result.unwrap_err();
        assert!(err.to_string().contains("reading import source"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn given_application_error_when_add_context_then_returns_contextual_error() {
        let result: Result<(), ApplicationError> =
            Err(ApplicationError::Other("gateway offline".to_string()));
        let contextual_result = result.app_context("listing bookmarks");

        assert!(contextual_result
            .unwrap_err()
            .to_string()
            .contains("listing bookmarks"));
    }

    #[test]
    fn given_cli_error_when_add_lazy_context_then_formats_once() {
        let result: Result<(), CliError> = Err(CliError::InvalidInput("empty".to_string()));
        let err = result
            .with_cli_context(|| format!("source {}", "bookmarks.html"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: source bookmarks.html: empty");
    }
}
