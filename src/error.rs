//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {name}={value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::NotNull => "not-null",
            ConstraintKind::Check => "check",
        })
    }
}

/// Failure of a statement issued through the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
    #[error("{kind} constraint {} violated: {message}", .constraint.as_deref().unwrap_or("(unnamed)"))]
    Constraint {
        kind: ConstraintKind,
        constraint: Option<String>,
        message: String,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("statement failed: {0}")]
    Statement(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Constraint {
                kind: ConstraintKind::ForeignKey,
                ..
            }
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let kind = match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                sqlx::error::ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                sqlx::error::ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            };
            if let Some(kind) = kind {
                return StoreError::Constraint {
                    kind,
                    constraint: db.constraint().map(str::to_string),
                    message: db.message().to_string(),
                };
            }
            // SQLSTATE class 22: data exception (value too long, out of range, bad text representation)
            if db.code().map(|c| c.starts_with("22")).unwrap_or(false) {
                return StoreError::InvalidInput(db.message().to_string());
            }
            return StoreError::Statement(e);
        }
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_) => StoreError::Unavailable(e),
            other => StoreError::Statement(other),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// Status code and machine-readable code for this error.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Store(e) => match e {
                StoreError::Constraint { kind, .. } => match kind {
                    ConstraintKind::Unique | ConstraintKind::ForeignKey => (StatusCode::CONFLICT, "conflict"),
                    ConstraintKind::NotNull | ConstraintKind::Check => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
                    }
                },
                StoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                StoreError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "database_unavailable"),
                StoreError::Statement(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "database unavailable".to_string(),
                _ => "an internal error occurred".to_string(),
            }
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            status: "error",
            code,
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn constraint(kind: ConstraintKind) -> AppError {
        AppError::Store(StoreError::Constraint {
            kind,
            constraint: Some("reviews_restaurant_id_fkey".into()),
            message: "violates constraint".into(),
        })
    }

    #[test]
    fn not_found_is_404() {
        let response = AppError::NotFound("restaurant 7".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn constraint_kinds_map_to_client_errors() {
        assert_eq!(constraint(ConstraintKind::ForeignKey).classify().0, StatusCode::CONFLICT);
        assert_eq!(constraint(ConstraintKind::Unique).classify().0, StatusCode::CONFLICT);
        assert_eq!(constraint(ConstraintKind::NotNull).classify().0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(constraint(ConstraintKind::Check).classify().0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn pool_errors_are_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(AppError::from(err).classify().0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn other_sqlx_errors_are_statement_failures() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Statement(_)));
        assert_eq!(AppError::from(err).classify().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn constraint_message_names_the_constraint() {
        let named = StoreError::Constraint {
            kind: ConstraintKind::ForeignKey,
            constraint: Some("reviews_restaurant_id_fkey".into()),
            message: "update or delete violates foreign key".into(),
        };
        assert_eq!(
            named.to_string(),
            "foreign key constraint reviews_restaurant_id_fkey violated: update or delete violates foreign key"
        );
        let unnamed = StoreError::Constraint {
            kind: ConstraintKind::NotNull,
            constraint: None,
            message: "null value in column".into(),
        };
        assert_eq!(unnamed.to_string(), "not-null constraint (unnamed) violated: null value in column");
    }

    #[test]
    fn foreign_key_detection() {
        let err = StoreError::Constraint {
            kind: ConstraintKind::ForeignKey,
            constraint: None,
            message: String::new(),
        };
        assert!(err.is_foreign_key_violation());
        assert!(!StoreError::InvalidInput("too long".into()).is_foreign_key_violation());
    }

    #[tokio::test]
    async fn error_envelope_shape() {
        let response = AppError::BadRequest("invalid id".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "bad_request");
        assert_eq!(body["message"], "bad request: invalid id");
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let response = AppError::Store(StoreError::Statement(sqlx::Error::RowNotFound)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "database_error");
        assert_eq!(body["message"], "an internal error occurred");
    }
}
