//! Handlers for the `/characters` resource.
//!
//! Character writes are where the omission-vs-null distinction
//! matters: an absent `houseId` leaves the attachment untouched while
//! an explicit `null` detaches, and an absent `subjectIds` leaves the
//! enrollment set untouched while a supplied list replaces it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hogwarts_core::error::CoreError;
use hogwarts_core::roles::validate_role;
use hogwarts_core::types::DbId;
use hogwarts_core::validation::validate_name;
use hogwarts_db::models::character::{CharacterWithRelations, CreateCharacter, UpdateCharacter};
use hogwarts_db::repositories::CharacterRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<CharacterWithRelations>)> {
    validate_name("firstName", &input.first_name)?;
    validate_name("lastName", &input.last_name)?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    let character = CharacterRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/characters
pub async fn list_all(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CharacterWithRelations>>> {
    let characters = CharacterRepo::list_all(&state.pool).await?;
    Ok(Json(characters))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterWithRelations>> {
    let character = CharacterRepo::find_with_relations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// PUT /api/v1/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<Json<CharacterWithRelations>> {
    if let Some(first_name) = &input.first_name {
        validate_name("firstName", first_name)?;
    }
    if let Some(last_name) = &input.last_name {
        validate_name("lastName", last_name)?;
    }
    if let Some(Some(role)) = &input.role {
        validate_role(role)?;
    }
    let character = CharacterRepo::update(&state.pool, id, &input).await?;
    Ok(Json(character))
}

/// DELETE /api/v1/characters/{id}
///
/// Enrollment rows for the character are removed first.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    CharacterRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
