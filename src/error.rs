//! Error handler for roster.

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::user::StoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{}", describe_validation_errors(.0))]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("User not found")]
    NotFound,

    #[error("Email is already in use")]
    EmailTaken,

    #[error("internal server error, {details}")]
    Internal {
        details: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken(_) => ServerError::EmailTaken,
            err => ServerError::Internal {
                details: "user store failure".to_owned(),
                source: Some(Box::new(err)),
            },
        }
    }
}

/// Error body sent to clients.
#[derive(Debug, Serialize)]
pub struct ResponseError {
    #[serde(skip)]
    status: StatusCode,
    message: String,
}

impl ResponseError {
    /// Update error status code.
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    /// Update `message` field.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Transform [`ResponseError`] into axum [`Response`].
    pub fn into_response(
        self,
    ) -> std::result::Result<Response, axum::http::Error> {
        if let Ok(body) = serde_json::to_string(&self) {
            Response::builder()
                .status(self.status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
        } else {
            Ok(internal_server_error())
        }
    }
}

impl Default for ResponseError {
    fn default() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_SERVER_ERROR.to_owned(),
        }
    }
}

/// Turn `first_name` into `firstName`. Already camelCased names are kept.
fn camel_case(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Build one human readable line out of every field error.
///
/// `Validation error: First name is required at "firstName"; Invalid email
/// address at "email"`.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut issues: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, issues)| {
            issues
                .iter()
                .map(move |issue| (camel_case(field), issue.to_string()))
        })
        .collect();
    issues.sort();

    let issues = issues
        .into_iter()
        .map(|(field, message)| format!("{message} at \"{field}\""))
        .collect::<Vec<_>>()
        .join("; ");

    format!("Validation error: {issues}")
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let response = ResponseError::default()
            .message(self.to_string())
            .status(StatusCode::BAD_REQUEST);

        let response = match &self {
            ServerError::Axum(rejection) => response.message(rejection.body_text()),

            ServerError::NotFound => response.status(StatusCode::NOT_FOUND),

            ServerError::EmailTaken => response.status(StatusCode::CONFLICT),

            ServerError::Internal { details, source } => {
                tracing::error!(err = ?source, %details, "server returned 500 status");

                ResponseError::default()
            },

            ServerError::Validation(_) => response,
        };

        response
            .into_response()
            .unwrap_or_else(|_| internal_server_error())
    }
}

fn internal_server_error() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({ "message": INTERNAL_SERVER_ERROR })
                .to_string()
                .into(),
        )
        .unwrap_or_else(|_| Response::new(INTERNAL_SERVER_ERROR.into()))
}
