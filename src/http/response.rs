//! Mapping handler outcomes to HTTP responses.
//!
//! # Design Decisions
//! - Every storage failure is a 500; the cause is logged, never returned
//! - Bodies are short plain-text messages

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::storage::StoreError;

pub const USER_CREATED: &str = "User created";
pub const USER_NOT_FOUND: &str = "User not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Lookup returned no rows.
    #[error("user not found")]
    UserNotFound,

    /// Any failure of the backing store.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::UserNotFound => USER_NOT_FOUND,
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "Storage operation failed");
                INTERNAL_SERVER_ERROR
            }
        };
        (self.status(), body).into_response()
    }
}
