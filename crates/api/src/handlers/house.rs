//! Handlers for the `/houses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hogwarts_core::error::CoreError;
use hogwarts_core::types::DbId;
use hogwarts_core::validation::validate_name;
use hogwarts_db::models::house::{CreateHouse, HouseWithCharacters, UpdateHouse};
use hogwarts_db::repositories::HouseRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/houses
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateHouse>,
) -> AppResult<(StatusCode, Json<HouseWithCharacters>)> {
    validate_name("name", &input.name)?;
    let house = HouseRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(HouseWithCharacters::new(house, Vec::new())),
    ))
}

/// GET /api/v1/houses
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<HouseWithCharacters>>> {
    let houses = HouseRepo::list_all(&state.pool).await?;
    Ok(Json(houses))
}

/// GET /api/v1/houses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<HouseWithCharacters>> {
    let house = HouseRepo::find_with_characters(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "House", id }))?;
    Ok(Json(house))
}

/// PUT /api/v1/houses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHouse>,
) -> AppResult<Json<HouseWithCharacters>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    HouseRepo::update(&state.pool, id, &input).await?;
    let house = HouseRepo::find_with_characters(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "House", id }))?;
    Ok(Json(house))
}

/// DELETE /api/v1/houses/{id}
///
/// Member characters are detached, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    HouseRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
