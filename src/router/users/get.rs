//! Get a user by ID.

use axum::Json;
use axum::extract::{Path, State};

use crate::error::Result;
use crate::user::User;
use crate::{AppState, ServerError};

pub async fn handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>> {
    state
        .users
        .find_by_id(&user_id)
        .await?
        .map(Json)
        .ok_or(ServerError::NotFound)
}
