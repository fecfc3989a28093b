use crate::api::models::responses::{ErrorResponse, INTERNAL_SERVER_ERROR_MESSAGE, SimpleErrorResponse, StatusResponse};
use crate::db::errors::DbError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Required fields missing or falsy; the message lists every required field
    #[error("{message}")]
    BadRequest { message: String },

    /// Delete by identifier matched no row
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Client error reported with the bare `{"error": ...}` body (course updates)
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Rejected { status, .. } => *status,
            // Every data-layer failure is a 500, constraint violations included: the caller only
            // learns that the statement did not go through.
            Error::Internal { .. } | Error::Database(_) | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } | Error::Rejected { message, .. } => message.clone(),
            Error::NotFound { resource, id } => format!("{resource} with ID {id} not found"),
            Error::Internal { .. } | Error::Database(_) | Error::Other(_) => INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(db_err) if db_err.is_constraint_violation() => {
                tracing::warn!("Database constraint error: {:?}", db_err);
            }
            Error::Database(_) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } | Error::Rejected { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let message = self.user_message();

        match self {
            Error::NotFound { .. } => (status, Json(StatusResponse::error(message))).into_response(),
            Error::Rejected { .. } => (status, Json(SimpleErrorResponse { error: message })).into_response(),
            _ => (
                status,
                Json(ErrorResponse {
                    status_code: status.as_u16(),
                    message,
                }),
            )
                .into_response(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
