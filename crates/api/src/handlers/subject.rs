//! Handlers for the `/subjects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hogwarts_core::error::CoreError;
use hogwarts_core::types::DbId;
use hogwarts_core::validation::validate_name;
use hogwarts_db::models::subject::{CreateSubject, SubjectWithCharacters, UpdateSubject};
use hogwarts_db::repositories::SubjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/subjects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<SubjectWithCharacters>)> {
    validate_name("name", &input.name)?;
    let subject = SubjectRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubjectWithCharacters::new(subject, Vec::new())),
    ))
}

/// GET /api/v1/subjects
pub async fn list_all(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SubjectWithCharacters>>> {
    let subjects = SubjectRepo::list_all(&state.pool).await?;
    Ok(Json(subjects))
}

/// GET /api/v1/subjects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SubjectWithCharacters>> {
    let subject = SubjectRepo::find_with_characters(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// PUT /api/v1/subjects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<SubjectWithCharacters>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    SubjectRepo::update(&state.pool, id, &input).await?;
    let subject = SubjectRepo::find_with_characters(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// DELETE /api/v1/subjects/{id}
///
/// Enrollment rows for the subject are removed first.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    SubjectRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
