//! Create a user.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use url::Url;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;
use crate::user::{NewUser, User};

/// Absolute URL of the user when the public URL is configured, path
/// otherwise.
fn location(base: &str, user_id: &str) -> String {
    let path = format!("api/users/{user_id}");

    Url::parse(base)
        .and_then(|mut url| {
            // `join` replaces the last segment unless it is a directory.
            if !url.path().ends_with('/') {
                let dir = format!("{}/", url.path());
                url.set_path(&dir);
            }
            url.join(&path)
        })
        .map(String::from)
        .unwrap_or_else(|_| format!("/{path}"))
}

/// Handler to create user.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<NewUser>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<User>)> {
    let user = state.users.create(body).await?;

    tracing::info!(user_id = %user.id, "user created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(&state.config.url, &user.id))],
        Json(user),
    ))
}

#[cfg(test)]
pub(super) mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;

    use super::location;
    use crate::user::{MemoryRepository, User};
    use crate::*;

    #[test]
    fn test_location() {
        assert_eq!(location("", "abc"), "/api/users/abc");
        assert_eq!(
            location("https://people.example.com/", "abc"),
            "https://people.example.com/api/users/abc"
        );
        assert_eq!(
            location("https://example.com/people", "abc"),
            "https://example.com/people/api/users/abc"
        );
    }

    #[tokio::test]
    async fn test_create_handler() {
        let state = router::state(MemoryRepository::default());
        let app = app(state.clone());

        let req_body = json!({
            "firstName": "Dave",
            "lastName": "Richards",
            "email": "dave@mail.com",
        });
        let response =
            make_request(app, Method::POST, "/api/users", req_body.to_string()).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let body: User = serde_json::from_slice(&body).unwrap();

        assert!(!body.id.is_empty());
        assert_eq!(body.first_name, "Dave");
        assert_eq!(body.last_name, "Richards");
        assert_eq!(body.email, "dave@mail.com");
        assert_eq!(raw.as_object().unwrap().len(), 4);
        assert_eq!(location, format!("/api/users/{}", body.id));

        let stored = state.users.find_by_id(&body.id).await.unwrap();
        assert_eq!(stored, Some(body));
    }

    #[tokio::test]
    async fn test_create_with_work_experience() {
        let app = app(router::state(MemoryRepository::default()));

        let req_body = json!({
            "firstName": "Dave",
            "lastName": "Richards",
            "email": "dave@mail.com",
            "workExperience": r#"[{"domain":"Technology","subdomain":"MERN Stack","experience":"3-5"}]"#,
        });
        let response =
            make_request(app, Method::POST, "/api/users", req_body.to_string()).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: User = serde_json::from_slice(&body).unwrap();
        let history = body.work_experience.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].subdomain, "MERN Stack");
    }

    #[tokio::test]
    async fn test_create_reports_every_invalid_field() {
        let state = router::state(MemoryRepository::default());
        let app = app(state.clone());

        let req_body = json!({
            "firstName": "",
            "lastName": "X",
            "email": "not-an-email",
        });
        let response =
            make_request(app, Method::POST, "/api/users", req_body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body["message"],
            r#"Validation error: Invalid email address at "email"; First name is required at "firstName""#
        );
        assert!(state.users.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_missing_fields() {
        let app = app(router::state(MemoryRepository::default()));

        let response =
            make_request(app, Method::POST, "/api/users", "{}".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = body["message"].as_str().unwrap();
        assert!(message.contains(r#"at "firstName""#));
        assert!(message.contains(r#"at "lastName""#));
        assert!(message.contains(r#"at "email""#));
    }

    #[tokio::test]
    async fn test_create_with_null_required_field() {
        let state = router::state(MemoryRepository::default());
        let app = app(state.clone());

        let response = make_request(
            app,
            Method::POST,
            "/api/users",
            r#"{"firstName":null,"lastName":"","email":"x"}"#.to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body["message"],
            r#"Validation error: Invalid email address at "email"; First name is required at "firstName"; Last name is required at "lastName""#
        );
        assert!(state.users.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_too_many_experiences() {
        let app = app(router::state(MemoryRepository::default()));

        let entry = json!({ "domain": "a", "subdomain": "b", "experience": "c" });
        let req_body = json!({
            "firstName": "Dave",
            "lastName": "Richards",
            "email": "dave@mail.com",
            "workExperience": [entry, entry, entry],
        });
        let response =
            make_request(app, Method::POST, "/api/users", req_body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body["message"],
            r#"Validation error: At most two work experience entries are allowed at "workExperience""#
        );
    }

    #[tokio::test]
    async fn test_create_with_malformed_json() {
        let app = app(router::state(MemoryRepository::default()));

        let response = make_request(
            app,
            Method::POST,
            "/api/users",
            r#"{"firstName": 12}"#.to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_create_with_taken_email() {
        let state = router::state(MemoryRepository::seeded(true));
        let app = app(state.clone());

        let req_body = json!({
            "firstName": "David",
            "lastName": "Richards",
            "email": "dave@mail.com",
        });
        let response =
            make_request(app, Method::POST, "/api/users", req_body.to_string()).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(state.users.list().await.unwrap().len(), 3);
    }
}
