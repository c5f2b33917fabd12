//! Users-related HTTP API.
mod create;
mod delete;
mod get;
mod list;
mod update;

use axum::Router;
use axum::routing::get;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `GET /api/users` goes to `list`, `POST /api/users` to `create`.
        .route("/", get(list::handler).post(create::handler))
        // `GET`, `PATCH` and `DELETE /api/users/:ID`.
        .route(
            "/{user_id}",
            get(get::handler)
                .patch(update::handler)
                .delete(delete::handler),
        )
}
