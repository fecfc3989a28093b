//! Response envelopes shared by every endpoint.
//!
//! Successful reads and creates wrap their payload in [`DataResponse`]. Failures use
//! [`ErrorResponse`] (`status_code` + `message`), except for the course update endpoint which
//! reports problems as [`SimpleErrorResponse`] (`error`). Deletes answer with [`StatusResponse`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned with every data-layer failure. Never carries internal details.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error!";

/// `{ "data": ... }` wrapper for rows and row lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{ "status_code": 400, "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body for clients that only read JSON
    #[schema(example = 400)]
    pub status_code: u16,
    #[schema(example = "Send please name, age, main_way!")]
    pub message: String,
}

/// `{ "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimpleErrorResponse {
    #[schema(example = "Course not found")]
    pub error: String,
}

/// Outcome of a delete: `status` is `"success"` or `"error"`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// `{ "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Course updated successfully")]
    pub message: String,
}
