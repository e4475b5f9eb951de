//! Route handlers.
//!
//! Neither handler validates its input: the body / path value goes to the
//! store as-is and the outcome is mapped to a status code.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::http::response::{ApiError, USER_CREATED};
use crate::http::server::AppState;
use crate::storage::User;

/// `POST /users`
///
/// Inserts the row; an existing row with the same id is overwritten. A body
/// whose values cannot be bound fails like any other storage call.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let user = User::from_body(&body)?;
    tracing::debug!(user_id = %user.id, "Creating user");
    state.store.insert(&user).await?;
    Ok((StatusCode::CREATED, USER_CREATED))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.store.find(&id).await?.ok_or(ApiError::UserNotFound)?;
    Ok(Json(user))
}
