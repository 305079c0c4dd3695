use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Field-level validation failure, rendered as a `field -> [messages]`
    /// map with status 422.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation error, for failures detected outside the
    /// `validator` derive (unique/foreign key violations and the like).
    pub fn field_error(field: &'static str, message: &str) -> Self {
        let mut error = ValidationError::new("invalid");
        error.message = Some(message.to_string().into());
        let mut errors = ValidationErrors::new();
        errors.add(field.into(), error);
        AppError::Validation(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Flatten `ValidationErrors` into `{"field": ["message", ...]}`.
fn validation_body(errors: &ValidationErrors) -> Value {
    let map: serde_json::Map<String, Value> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages: Vec<Value> = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(message) => Value::String(message.to_string()),
                    None => Value::String(e.code.to_string()),
                })
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect();
    Value::Object(map)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Database error occurred"}),
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, json!({"error": msg})),
            AppError::Validation(ref errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, validation_body(errors))
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, json!({"error": msg})),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, json!({"error": msg})),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(AppError::NotFound("Ad 7 not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Ad 7 not found");
    }

    #[tokio::test]
    async fn forbidden_is_403() {
        let (status, _) = body_json(AppError::Forbidden("denied".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let (status, _) = body_json(AppError::Unauthorized("no token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn field_error_renders_message_map() {
        let (status, body) = body_json(AppError::field_error("name", "already exists")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["name"][0], "already exists");
    }
}
