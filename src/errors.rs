//! Request-level error handling: every handler failure is converted here
//! into the uniform JSON envelope, so nothing escapes as an unhandled fault.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::models::{describe_field_errors, FieldErrors};
use crate::response::ApiResponse;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A single-message rejection, e.g. a missing search query.
    #[error("{0}")]
    Validation(String),

    /// Structured per-field validation failures; `context` names the
    /// operation that was attempted.
    #[error("{context}")]
    ValidationErrors {
        context: String,
        errors: FieldErrors,
    },

    #[error("{0}")]
    NotFound(String),

    /// A store fault; `context` is the operation message the envelope
    /// carries, `source` the underlying driver error.
    #[error("{context}")]
    Database {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Adapter for `map_err` on store calls: tags the driver error with the
    /// operation message.
    pub fn database(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Database {
            context: context.to_string(),
            source: anyhow::Error::new(source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body): (StatusCode, ApiResponse<Value>) = match &self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, ApiResponse::error(message.clone()))
            }
            AppError::ValidationErrors { context, errors } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error(context.clone())
                    .with_error_detail(describe_field_errors(errors))
                    .with_field_errors(errors.clone()),
            ),
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, ApiResponse::error(message.clone()))
            }
            AppError::Database { context, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::error(context.clone()).with_error_detail(source.to_string()),
            ),
        };

        tracing::error!(
            error = %self,
            status = %status,
            "Request error"
        );

        if let AppError::Database { source, .. } = &self {
            for cause in source.chain().skip(1) {
                tracing::error!("Caused by: {cause}");
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Top-level fallback: converts a panic escaping any handler into the
/// generic 500 envelope. Installed through `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    let body = ApiResponse::<Value>::error("Something went wrong!").with_error_detail(detail);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let error = AppError::NotFound("Video not found".to_string());
        let (status, body) = body_of(error.into_response()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Video not found");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn validation_errors_map_to_400_with_field_detail() {
        let mut errors = FieldErrors::new();
        errors
            .entry("url".to_string())
            .or_default()
            .push("Please provide a valid YouTube URL".to_string());

        let error = AppError::ValidationErrors {
            context: "Error creating video".to_string(),
            errors,
        };
        let (status, body) = body_of(error.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Error creating video");
        assert_eq!(body["error"], "url: Please provide a valid YouTube URL");
        assert_eq!(
            body["errors"]["url"][0],
            "Please provide a valid YouTube URL"
        );
    }

    #[tokio::test]
    async fn database_faults_map_to_500_with_detail() {
        let error = AppError::database("Error fetching videos")(sqlx::Error::PoolClosed);
        let (status, body) = body_of(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error fetching videos");
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn panics_become_the_generic_500_envelope() {
        let payload: Box<dyn Any + Send> = Box::new("boom".to_string());
        let (status, body) = body_of(handle_panic(payload)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Something went wrong!");
        assert_eq!(body["error"], "boom");
    }
}
