//! Delete user from the store. There is no retention.

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::Result;
use crate::{AppState, ServerError};

pub async fn handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    if !state.users.delete(&user_id).await? {
        return Err(ServerError::NotFound);
    }

    tracing::info!(%user_id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}
