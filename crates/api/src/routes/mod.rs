//! Route composition.

pub mod character;
pub mod health;
pub mod house;
pub mod subject;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/houses", house::router())
        .nest("/characters", character::router())
        .nest("/subjects", subject::router())
}
