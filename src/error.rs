//! Service error types with HTTP status code mapping.
//!
//! [`FyyurError`] is the central error type. Each variant maps to a specific
//! HTTP status code and structured JSON error response, and each has one
//! recovery path: validation failures go back to the client, not-found
//! stops the request, persistence failures roll the transaction back.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "validation failed: state `ZZ` is not a recognized state code",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`FyyurError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A venue record.
    Venue,
    /// An artist record.
    Artist,
    /// A show record.
    Show,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Venue => "venue",
            Self::Artist => "artist",
            Self::Show => "show",
        };
        f.write_str(name)
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum FyyurError {
    /// Submitted data was rejected before reaching the store.
    #[error("validation failed: {0}")]
    ValidationFailure(String),

    /// The requested record does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Kind of the missing record.
        kind: EntityKind,
        /// Requested identifier.
        id: i64,
    },

    /// A show references a record that the caller did not supply.
    ///
    /// Referential integrity belongs to the store, so reaching this means
    /// the data handed to the aggregation engine was inconsistent.
    #[error("show references missing {kind} {id}")]
    LookupFailure {
        /// Kind of the dangling reference.
        kind: EntityKind,
        /// Identifier that could not be resolved.
        id: i64,
    },

    /// The store failed; any open transaction was rolled back.
    #[error("persistence error: {0}")]
    PersistenceFailure(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FyyurError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::ValidationFailure(_) => 1001,
            Self::NotFound { .. } => 2001,
            Self::Internal(_) => 3000,
            Self::PersistenceFailure(_) => 3001,
            Self::LookupFailure { .. } => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailure(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::LookupFailure { .. } | Self::PersistenceFailure(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Shorthand for a [`FyyurError::ValidationFailure`].
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::ValidationFailure(message.into())
    }
}

impl IntoResponse for FyyurError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
