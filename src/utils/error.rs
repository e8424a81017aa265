//! Error handling module
//!
//! Defines error types and their translation into problem-detail HTTP responses

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title used when an error carries no title of its own
pub const DEFAULT_TITLE: &str = "API Error Occurred";

/// Detail used when an error message is blank
pub const DEFAULT_MESSAGE: &str = "API Error occurred. Please contact support or administrator.";

/// Title of not found errors raised for upstream 404s
pub const NOT_FOUND_TITLE: &str = "Resource not found";

/// Content type of problem-detail bodies
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream call failed, either with a non-success status or at the transport level
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Resource absent upstream
    #[error("{detail}")]
    NotFound {
        detail: String,
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Failure raised locally with an explicit status and title
    #[error("{detail}")]
    Domain {
        detail: String,
        title: Option<String>,
        status: u16,
    },

    /// Parameter constraint violations
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Route or query parameter that could not be converted to its type
    #[error("Parameter '{name}' must be a valid {expected}. Received: '{value}'")]
    InvalidParameter {
        name: String,
        expected: &'static str,
        value: String,
    },

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

/// Problem-detail response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    /// Problem type URI
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Human-readable explanation
    pub detail: String,
}

impl AppError {
    /// Wrap a reqwest failure, keeping the upstream status when there is one
    pub fn upstream(error: reqwest::Error) -> Self {
        AppError::Upstream {
            status: error
                .status()
                .map(|status| status.as_u16())
                .unwrap_or(500),
            message: error.to_string(),
            source: Some(error),
        }
    }

    /// Turn an upstream 404 into a not found error with the given detail
    ///
    /// Every other error is returned untouched.
    pub fn into_not_found(self, detail: &str) -> Self {
        if matches!(self, AppError::Upstream { status: 404, .. }) {
            AppError::NotFound {
                detail: detail.to_string(),
                source: Some(Box::new(self)),
            }
        } else {
            self
        }
    }

    /// Get HTTP status code
    ///
    /// Codes outside the valid HTTP range fall back to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream { status, .. } | AppError::Domain { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or_else(|_| {
                    tracing::info!(
                        "Error Code from Exception could not be mapped to a valid HttpStatus Code - {}",
                        status
                    );
                    StatusCode::INTERNAL_SERVER_ERROR
                })
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get problem title
    pub fn title(&self) -> &str {
        match self {
            AppError::NotFound { .. } => NOT_FOUND_TITLE,
            AppError::Domain { title, .. } => title.as_deref().unwrap_or(DEFAULT_TITLE),
            AppError::Validation(_) => "Validation Error",
            AppError::InvalidParameter { .. } => "Invalid Parameter",
            AppError::Upstream { .. } | AppError::Internal(_) => DEFAULT_TITLE,
        }
    }

    /// Get problem detail, falling back to a generic message when blank
    pub fn detail(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Convert to problem-detail format
    pub fn to_problem_detail(&self) -> ProblemDetail {
        ProblemDetail {
            problem_type: "about:blank".to_string(),
            title: self.title().to_string(),
            status: self.status_code().as_u16(),
            detail: self.detail(),
        }
    }

    /// Render the chain of underlying causes, if any
    pub fn cause_chain(&self) -> Option<String> {
        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            causes.push(cause.to_string());
            current = cause.source();
        }

        if causes.is_empty() {
            None
        } else {
            Some(causes.join(" <- "))
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.to_problem_detail();
        let status = StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let cause = self.cause_chain().unwrap_or_else(|| "none".to_string());

        tracing::error!(
            status = problem.status,
            title = %problem.title,
            cause = %cause,
            "Problem detail returned: {}",
            problem.detail
        );

        (status, [(header::CONTENT_TYPE, PROBLEM_JSON)], Json(problem)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create a 400 error with the "Bad Request" title
    pub fn bad_request(detail: impl Into<String>) -> AppError {
        AppError::Domain {
            detail: detail.into(),
            title: Some("Bad Request".to_string()),
            status: StatusCode::BAD_REQUEST.as_u16(),
        }
    }

    /// Create a not found error without an upstream cause
    pub fn not_found(detail: impl Into<String>) -> AppError {
        AppError::NotFound {
            detail: detail.into(),
            source: None,
        }
    }

    /// Create a single-message validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(vec![message.into()])
    }

    /// Create a type mismatch error for a parameter
    pub fn invalid_parameter(
        name: impl Into<String>,
        expected: &'static str,
        value: impl Into<String>,
    ) -> AppError {
        AppError::InvalidParameter {
            name: name.into(),
            expected,
            value: value.into(),
        }
    }

    /// Create internal error
    pub fn internal_error(message: impl Into<String>) -> AppError {
        AppError::Internal(message.into())
    }
}

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add internal error context
    fn internal_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn internal_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", message, e)))
    }
}
