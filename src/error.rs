//! Error types and handling for the `Tripdesk` service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Main error type for the `Tripdesk` service
#[derive(Error, Debug)]
pub enum TripdeskError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// An itinerary entry with the same name already exists
    #[error("Duplicate entry: {message}")]
    Duplicate { message: String },

    /// A requested itinerary or entry does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripdeskError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new duplicate-entry error
    pub fn duplicate<S: Into<String>>(message: S) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// HTTP status this error surfaces as at the handler boundary
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TripdeskError::Validation { .. } => StatusCode::BAD_REQUEST,
            TripdeskError::NotFound { .. } => StatusCode::NOT_FOUND,
            TripdeskError::Duplicate { .. } => StatusCode::CONFLICT,
            TripdeskError::Config { .. }
            | TripdeskError::Upstream { .. }
            | TripdeskError::General { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for TripdeskError {
    fn from(source: reqwest::Error) -> Self {
        Self::Upstream {
            message: source.to_string(),
        }
    }
}

impl IntoResponse for TripdeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripdeskError::config("missing API key");
        assert!(matches!(config_err, TripdeskError::Config { .. }));

        let upstream_err = TripdeskError::upstream("connection failed");
        assert!(matches!(upstream_err, TripdeskError::Upstream { .. }));

        let validation_err = TripdeskError::validation("attraction name required");
        assert!(matches!(validation_err, TripdeskError::Validation { .. }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TripdeskError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TripdeskError::duplicate("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TripdeskError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TripdeskError::upstream("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            TripdeskError::general("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = TripdeskError::duplicate("'Louvre' is already in the itinerary");
        assert!(err.to_string().contains("Louvre"));

        let err = TripdeskError::not_found("no itinerary for user");
        assert!(err.to_string().starts_with("Not found"));
    }
}
