//! List every user.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::Result;
use crate::user::User;

pub async fn handler(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use crate::user::{MemoryRepository, User};
    use crate::*;

    #[tokio::test]
    async fn test_list_handler() {
        let app = app(router::state(MemoryRepository::seeded(true)));

        let response =
            make_request(app, Method::GET, "/api/users", String::default()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Vec<User> = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].email, "dave@mail.com");
    }

    #[tokio::test]
    async fn test_list_handler_work_experience_is_text() {
        let app = app(router::state(MemoryRepository::seeded(true)));

        let response =
            make_request(app, Method::GET, "/api/users", String::default()).await;
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            body[0]["workExperience"],
            r#"[{"domain":"Technology","subdomain":"MERN Stack","experience":"3-5"}]"#
        );
        assert!(body[1].get("workExperience").is_none());
    }

    #[tokio::test]
    async fn test_list_handler_empty() {
        let app = app(router::state(MemoryRepository::default()));

        let response =
            make_request(app, Method::GET, "/api/users", String::default()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"[]");
    }
}
