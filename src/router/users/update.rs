//! Partially update user data.

use axum::Json;
use axum::extract::{Path, State};

use crate::error::Result;
use crate::router::Valid;
use crate::user::{User, UserPatch};
use crate::{AppState, ServerError};

pub async fn handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Valid(body): Valid<UserPatch>,
) -> Result<Json<User>> {
    let user = state
        .users
        .update(&user_id, body)
        .await?
        .ok_or(ServerError::NotFound)?;

    tracing::info!(user_id = %user.id, "user updated");

    Ok(Json(user))
}
