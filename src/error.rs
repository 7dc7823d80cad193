use std::collections::BTreeMap;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

/// Field name to the messages reported against it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("One or more validation errors occurred")]
    Validation(FieldErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    PayloadRejected(String),

    #[error("None of the requested media types can be produced")]
    NotAcceptable,

    #[error("Too many requests")]
    TooManyRequests,

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation failure.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        AppError::Validation(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::PayloadRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("The field {} is invalid.", field),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AppError::Validation(fields)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Unauthorized(format!("Invalid token: {}", err))
    }
}

/// Problem document returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let title = status.canonical_reason().unwrap_or("Error").to_string();

        let problem = match self {
            AppError::Database(ref e) => {
                tracing::error!(error = %e, "Database error");
                ProblemDetails {
                    title,
                    status: status.as_u16(),
                    detail: Some("A problem happened while handling your request".to_string()),
                    errors: None,
                }
            }
            AppError::Internal(ref message) => {
                tracing::error!(error = %message, "Internal error");
                ProblemDetails {
                    title,
                    status: status.as_u16(),
                    detail: Some("A problem happened while handling your request".to_string()),
                    errors: None,
                }
            }
            AppError::Validation(errors) => ProblemDetails {
                title: "One or more validation errors occurred.".to_string(),
                status: status.as_u16(),
                detail: None,
                errors: Some(errors),
            },
            other => ProblemDetails {
                title,
                status: status.as_u16(),
                detail: Some(other.to_string()),
                errors: None,
            },
        };

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}
