//! Error types and error handling
//!
//! Boot-time failures (missing template, duplicate alias, unknown controller)
//! abort [`AdminBuilder::build`](crate::bootstrap::AdminBuilder::build).
//! Request-time failures are terminal for the request only and map onto
//! standard HTTP statuses through [`IntoResponse`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Framework error type
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured template could not be resolved
    #[error("Template error: {0}")]
    Template(String),

    /// No model is registered under the requested alias or class
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// The repository has no record with the requested key
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// A dispatch target names a controller that was never registered
    #[error("Controller not found: {0}")]
    ControllerNotFound(String),

    /// The controller does not implement the requested action
    #[error("Action not found: {0}")]
    ActionNotFound(String),

    /// The model does not permit the requested action
    #[error("Action not allowed: {0}")]
    ActionNotAllowed(String),

    /// A route action is not of the form `Controller@action`
    #[error("Invalid route action: {0}")]
    InvalidRouteAction(String),

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Repository backend error
    #[error("Repository error: {0}")]
    Repository(String),

    /// View rendering error
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    /// Payload serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdminError {
    /// HTTP status this error is reported with
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ModelNotFound(_)
            | Self::RecordNotFound(_)
            | Self::ControllerNotFound(_)
            | Self::ActionNotFound(_) => StatusCode::NOT_FOUND,
            Self::ActionNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::InvalidRouteAction(_) => StatusCode::BAD_REQUEST,
            Self::Config(_)
            | Self::Template(_)
            | Self::Repository(_)
            | Self::Render(_)
            | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Admin request failed");
            return (status, "Internal server error").into_response();
        }

        tracing::debug!(error = %self, status = status.as_u16(), "Admin request rejected");
        (status, self.to_string()).into_response()
    }
}
