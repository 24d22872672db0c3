use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hogwarts_core::error::CoreError;
use hogwarts_db::error::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hogwarts_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the repository layer.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Db(DbError::Core(core)) => classify_core_error(core),
            AppError::Db(DbError::Storage(err)) => classify_sqlx_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error kind to an HTTP status, error code, and message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        CoreError::DuplicateName { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_NAME", err.to_string())
        }
        CoreError::Referential { .. } => {
            (StatusCode::CONFLICT, "REFERENTIAL_ERROR", err.to_string())
        }
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (constraint `uq_*`, code 23505) map to 409.
/// - Foreign-key violations (`fk_*`, 23503) map to 409 — a reference
///   the procedural checks missed turned out dangling.
/// - CHECK violations (`ck_*`, 23514) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_NAME",
                    format!("Unique constraint violated: {constraint}"),
                ),
                Some("23503") if constraint.starts_with("fk_") => (
                    StatusCode::CONFLICT,
                    "REFERENTIAL_ERROR",
                    format!("Referential constraint violated: {constraint}"),
                ),
                Some("23514") if constraint.starts_with("ck_") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Check constraint violated: {constraint}"),
                ),
                _ => internal(err),
            }
        }
        _ => internal(err),
    }
}

/// Log the real error, return a sanitized 500.
fn internal(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Storage error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORAGE_ERROR",
        "An internal storage error occurred".to_string(),
    )
}
